//! OpenGL Shaders
//!
//! This module defines the [`Shader`] and [`ShaderProgram`] handles and the [`ShaderCompiler`]
//! that produces them from source strings or files. It also provides the [`Uniform`] trait for
//! setting uniform variables in shader programs.

use std::path::Path;
use std::sync::Arc;

use glam::{Mat4, Vec4};
use glow::HasContext;

use super::ShaderDriver;
use crate::asset::FileLoader;
use crate::config::FailurePolicy;
use crate::error::{Error, Result};

/// The pipeline stage a shader object targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    pub fn gl_enum(self) -> u32 {
        match self {
            ShaderStage::Vertex => glow::VERTEX_SHADER,
            ShaderStage::Fragment => glow::FRAGMENT_SHADER,
        }
    }
}

impl std::fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShaderStage::Vertex => write!(f, "vertex"),
            ShaderStage::Fragment => write!(f, "fragment"),
        }
    }
}

/// Represents an individual compiled shader object. Deleted when dropped.
pub struct Shader<D: ShaderDriver = glow::Context> {
    driver: Arc<D>,
    id: D::Shader,
    stage: ShaderStage,
}

impl<D: ShaderDriver> Shader<D> {
    pub fn id(&self) -> D::Shader {
        self.id
    }

    pub fn stage(&self) -> ShaderStage {
        self.stage
    }
}

impl<D: ShaderDriver> Drop for Shader<D> {
    fn drop(&mut self) {
        self.driver.delete_shader(self.id);
    }
}

/// Represents a linked shader program. Deleted when dropped.
///
/// A program does not borrow the shaders it was linked from; they can be dropped as soon as
/// linking is done.
pub struct ShaderProgram<D: ShaderDriver = glow::Context> {
    driver: Arc<D>,
    id: D::Program,
}

impl<D: ShaderDriver> ShaderProgram<D> {
    pub fn id(&self) -> D::Program {
        self.id
    }

    /// Binds the shader program for use.
    pub fn use_program(&self) {
        self.driver.use_program(Some(self.id));
    }
}

impl ShaderProgram<glow::Context> {
    /// Sets a uniform variable in the shader program.
    pub fn set_uniform<T: Uniform>(&self, name: &str, value: T) {
        value.set_uniform(&self.driver, self.id, name);
    }
}

impl<D: ShaderDriver> Drop for ShaderProgram<D> {
    fn drop(&mut self) {
        self.driver.delete_program(self.id);
    }
}

/// Represents a uniform variable in a shader program.
pub trait Uniform {
    /// Sets the value of the uniform variable in the given shader program.
    fn set_uniform(&self, gl: &glow::Context, program: glow::Program, name: &str);
}

impl Uniform for Vec4 {
    fn set_uniform(&self, gl: &glow::Context, program: glow::Program, name: &str) {
        unsafe {
            let location = gl.get_uniform_location(program, name);
            if let Some(loc) = location {
                gl.uniform_4_f32(Some(&loc), self.x, self.y, self.z, self.w);
            }
        }
    }
}

impl Uniform for Mat4 {
    fn set_uniform(&self, gl: &glow::Context, program: glow::Program, name: &str) {
        unsafe {
            let location = gl.get_uniform_location(program, name);
            if let Some(loc) = location {
                gl.uniform_matrix_4_f32_slice(Some(&loc), false, self.as_ref());
            }
        }
    }
}

impl<T: Uniform> Uniform for &T {
    fn set_uniform(&self, gl: &glow::Context, program: glow::Program, name: &str) {
        (*self).set_uniform(gl, program, name);
    }
}

/// Compiles shaders and links programs, applying a [`FailurePolicy`] to driver diagnostics.
///
/// With [`FailurePolicy::Error`] a failed compile or link releases the object and returns an
/// error. With [`FailurePolicy::Lenient`] the diagnostics are logged and the unusable object is
/// handed back anyway.
pub struct ShaderCompiler<D: ShaderDriver = glow::Context> {
    driver: Arc<D>,
    loader: FileLoader,
    policy: FailurePolicy,
}

impl<D: ShaderDriver> ShaderCompiler<D> {
    pub fn new(driver: &Arc<D>, loader: FileLoader, policy: FailurePolicy) -> Self {
        Self {
            driver: Arc::clone(driver),
            loader,
            policy,
        }
    }

    /// Compiles `source` for `stage`. An empty source gives `None` without calling the driver.
    pub fn compile(&self, source: &str, stage: ShaderStage) -> Result<Option<Shader<D>>> {
        if source.is_empty() {
            return Ok(None);
        }

        let id = self.driver.create_shader(stage).map_err(Error::Driver)?;
        let shader = Shader {
            driver: Arc::clone(&self.driver),
            id,
            stage,
        };

        self.driver.shader_source(id, source);
        self.driver.compile_shader(id);

        let success = self.driver.shader_compile_status(id);
        let log = self.driver.shader_info_log(id);
        let log = log.trim_end();

        if success {
            if !log.is_empty() {
                log::warn!("{stage} shader compiled with warnings:\n{log}");
            }
        } else {
            match self.policy {
                FailurePolicy::Error => {
                    return Err(Error::Compile {
                        stage,
                        log: log.to_string(),
                    });
                }
                FailurePolicy::Lenient => {
                    log::error!("{stage} shader failed to compile:\n{log}");
                }
            }
        }

        Ok(Some(shader))
    }

    /// Loads the file at `path` and compiles it for `stage`.
    pub fn compile_file(
        &self,
        path: impl AsRef<Path>,
        stage: ShaderStage,
    ) -> Result<Option<Shader<D>>> {
        let source = self.loader.load(path)?;
        self.compile(&source, stage)
    }

    /// Links a vertex and a fragment shader. The caller keeps ownership of both shaders.
    pub fn link(&self, vertex: &Shader<D>, fragment: &Shader<D>) -> Result<ShaderProgram<D>> {
        self.link_shaders(&[vertex, fragment])
    }

    /// Links a program from any set of compiled shaders.
    ///
    /// The shaders are detached again after linking, so dropping them never affects the program.
    pub fn link_shaders(&self, shaders: &[&Shader<D>]) -> Result<ShaderProgram<D>> {
        let id = self.driver.create_program().map_err(Error::Driver)?;
        let program = ShaderProgram {
            driver: Arc::clone(&self.driver),
            id,
        };

        for shader in shaders {
            self.driver.attach_shader(id, shader.id);
        }

        self.driver.link_program(id);

        let success = self.driver.program_link_status(id);
        let log = self.driver.program_info_log(id);
        let log = log.trim_end();

        if success {
            if !log.is_empty() {
                log::warn!("Shader program linked with warnings:\n{log}");
            }
        } else {
            match self.policy {
                FailurePolicy::Error => {
                    return Err(Error::Link {
                        log: log.to_string(),
                    });
                }
                FailurePolicy::Lenient => {
                    log::error!("Shader program failed to link:\n{log}");
                }
            }
        }

        for shader in shaders {
            self.driver.detach_shader(id, shader.id);
        }

        Ok(program)
    }

    /// Compiles both sources and links whichever stages are present.
    ///
    /// The intermediate shader objects are released before this returns.
    pub fn program_from_sources(
        &self,
        vertex_source: &str,
        fragment_source: &str,
    ) -> Result<ShaderProgram<D>> {
        let vertex = self.compile(vertex_source, ShaderStage::Vertex)?;
        let fragment = self.compile(fragment_source, ShaderStage::Fragment)?;

        let shaders: Vec<&Shader<D>> = vertex.iter().chain(fragment.iter()).collect();
        self.link_shaders(&shaders)
    }

    /// Loads both files and links them into a program.
    pub fn program_from_files(
        &self,
        vertex_path: impl AsRef<Path>,
        fragment_path: impl AsRef<Path>,
    ) -> Result<ShaderProgram<D>> {
        let vertex_source = self.loader.load(vertex_path)?;
        let fragment_source = self.loader.load(fragment_path)?;
        self.program_from_sources(&vertex_source, &fragment_source)
    }
}

#[cfg(test)]
mod tests {
    use super::super::driver::testing::{Call, FakeDriver};
    use super::*;
    use crate::asset::ResourceDir;

    const PASS_THROUGH: &str = "#version 450 core\n\
        layout(location = 0) in vec3 position;\n\
        void main() { gl_Position = vec4(position, 1.0); }\n";
    const SOLID: &str = "#version 450 core\n\
        out vec4 color;\n\
        void main() { color = vec4(1.0); }\n";

    fn compiler(policy: FailurePolicy) -> (Arc<FakeDriver>, ShaderCompiler<FakeDriver>) {
        let driver = Arc::new(FakeDriver::default());
        let loader = FileLoader::new(ResourceDir::new("/nonexistent"), FailurePolicy::Error);
        let compiler = ShaderCompiler::new(&driver, loader, policy);
        (driver, compiler)
    }

    #[test]
    fn test_empty_source_never_reaches_driver() {
        let (driver, compiler) = compiler(FailurePolicy::Error);
        assert!(compiler.compile("", ShaderStage::Vertex).unwrap().is_none());
        assert!(driver.calls().is_empty());
    }

    #[test]
    fn test_compile_valid_shader() {
        let (driver, compiler) = compiler(FailurePolicy::Error);
        let shader = compiler
            .compile(PASS_THROUGH, ShaderStage::Vertex)
            .unwrap()
            .unwrap();
        assert_eq!(shader.id(), 1);
        assert_eq!(shader.stage(), ShaderStage::Vertex);
        assert_eq!(
            driver.calls(),
            vec![
                Call::CreateShader(ShaderStage::Vertex, 1),
                Call::ShaderSource(1),
                Call::CompileShader(1),
            ]
        );

        drop(shader);
        assert_eq!(driver.calls().last(), Some(&Call::DeleteShader(1)));
    }

    #[test]
    fn test_warnings_do_not_fail_compilation() {
        let (_driver, compiler) = compiler(FailurePolicy::Error);
        let source = format!("{PASS_THROUGH}// deprecated\n");
        assert!(compiler.compile(&source, ShaderStage::Vertex).unwrap().is_some());
    }

    #[test]
    fn test_compile_failure_releases_shader() {
        let (driver, compiler) = compiler(FailurePolicy::Error);
        match compiler.compile("#error nope", ShaderStage::Fragment) {
            Err(Error::Compile { stage, log }) => {
                assert_eq!(stage, ShaderStage::Fragment);
                assert_eq!(log, "0:1(1): error: #error directive");
            }
            other => panic!("expected a compile error, got {:?}", other.map(|s| s.is_some())),
        }
        assert_eq!(driver.calls().last(), Some(&Call::DeleteShader(1)));
    }

    #[test]
    fn test_lenient_compile_failure_keeps_shader() {
        let (driver, compiler) = compiler(FailurePolicy::Lenient);
        let shader = compiler.compile("#error nope", ShaderStage::Fragment).unwrap();
        assert!(shader.is_some());
        assert!(!driver.calls().contains(&Call::DeleteShader(1)));
    }

    #[test]
    fn test_program_from_sources_releases_shaders() {
        let (driver, compiler) = compiler(FailurePolicy::Error);
        let program = compiler.program_from_sources(PASS_THROUGH, SOLID).unwrap();
        assert_eq!(program.id(), 3);

        let calls = driver.calls();
        assert!(calls.contains(&Call::AttachShader(3, 1)));
        assert!(calls.contains(&Call::AttachShader(3, 2)));
        assert!(calls.contains(&Call::LinkProgram(3)));
        assert!(calls.contains(&Call::DeleteShader(1)));
        assert!(calls.contains(&Call::DeleteShader(2)));
        assert!(!calls.contains(&Call::DeleteProgram(3)));

        program.use_program();
        drop(program);
        let calls = driver.calls();
        assert_eq!(
            calls[calls.len() - 2..],
            [Call::UseProgram(Some(3)), Call::DeleteProgram(3)]
        );
        assert_eq!(
            calls.iter().filter(|c| **c == Call::DeleteProgram(3)).count(),
            1
        );
    }

    #[test]
    fn test_link_keeps_caller_shaders() {
        let (driver, compiler) = compiler(FailurePolicy::Error);
        let vertex = compiler
            .compile(PASS_THROUGH, ShaderStage::Vertex)
            .unwrap()
            .unwrap();
        let fragment = compiler
            .compile(SOLID, ShaderStage::Fragment)
            .unwrap()
            .unwrap();

        let _program = compiler.link(&vertex, &fragment).unwrap();
        let calls = driver.calls();
        assert!(calls.contains(&Call::DetachShader(3, 1)));
        assert!(calls.contains(&Call::DetachShader(3, 2)));
        assert!(!calls.contains(&Call::DeleteShader(1)));
        assert!(!calls.contains(&Call::DeleteShader(2)));
    }

    #[test]
    fn test_link_failure_reports_log() {
        let (driver, compiler) = compiler(FailurePolicy::Error);
        driver.fail_link.set(true);

        match compiler.program_from_sources(PASS_THROUGH, SOLID) {
            Err(Error::Link { log }) => assert!(log.contains("v_color")),
            other => panic!("expected a link error, got ok: {}", other.is_ok()),
        }
        assert!(driver.calls().contains(&Call::DeleteProgram(3)));
    }

    #[test]
    fn test_lenient_link_failure_returns_program() {
        let (driver, compiler) = compiler(FailurePolicy::Lenient);
        driver.fail_link.set(true);
        assert!(compiler.program_from_sources(PASS_THROUGH, SOLID).is_ok());
    }

    #[test]
    fn test_missing_stage_is_skipped() {
        let (driver, compiler) = compiler(FailurePolicy::Error);
        let program = compiler.program_from_sources(PASS_THROUGH, "").unwrap();
        assert_eq!(program.id(), 2);
        let attached = driver
            .calls()
            .into_iter()
            .filter(|c| matches!(c, Call::AttachShader(..)))
            .count();
        assert_eq!(attached, 1);
    }

    #[test]
    fn test_refused_shader_is_a_driver_error() {
        let (driver, compiler) = compiler(FailurePolicy::Lenient);
        driver.fail_create_shader.set(true);

        match compiler.compile(PASS_THROUGH, ShaderStage::Vertex) {
            Err(Error::Driver(message)) => assert!(message.contains("glCreateShader")),
            other => panic!("expected a driver error, got ok: {}", other.is_ok()),
        }
        assert!(driver.calls().is_empty());
    }

    #[test]
    fn test_refused_program_releases_compiled_shaders() {
        let (driver, compiler) = compiler(FailurePolicy::Error);
        driver.fail_create_program.set(true);

        match compiler.program_from_sources(PASS_THROUGH, SOLID) {
            Err(Error::Driver(message)) => assert!(message.contains("glCreateProgram")),
            other => panic!("expected a driver error, got ok: {}", other.is_ok()),
        }
        let calls = driver.calls();
        assert!(calls.contains(&Call::DeleteShader(1)));
        assert!(calls.contains(&Call::DeleteShader(2)));
        assert!(!calls.iter().any(|c| matches!(c, Call::CreateProgram(_))));
    }

    #[test]
    fn test_program_from_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("shader_test.vert"), PASS_THROUGH).unwrap();
        std::fs::write(dir.path().join("shader_test.frag"), SOLID).unwrap();

        let driver = Arc::new(FakeDriver::default());
        let loader = FileLoader::new(ResourceDir::new(dir.path()), FailurePolicy::Error);
        let compiler = ShaderCompiler::new(&driver, loader, FailurePolicy::Error);

        let program = compiler
            .program_from_files("shader_test.vert", "shader_test.frag")
            .unwrap();
        assert_eq!(program.id(), 3);
        assert_eq!(
            driver.calls()[0],
            Call::CreateShader(ShaderStage::Vertex, 1)
        );
    }

    #[test]
    fn test_missing_shader_file_fails_before_driver() {
        let (driver, compiler) = compiler(FailurePolicy::Error);
        assert!(matches!(
            compiler.compile_file("shader_missing_test.vert", ShaderStage::Vertex),
            Err(Error::MissingFile { .. })
        ));
        assert!(driver.calls().is_empty());
    }
}
