//! Module providing the `Scene` trait and the tutorial stages built on it.
//!
//! Each [`Stage`] is one step of the tutorial and builds exactly one scene.

use glam::Vec3;

use crate::abs::{
    App, EntryPoints, IndirectCommands, Mesh, Position, ShaderCompiler, ShaderProgram, check_gl,
};
use crate::draw::DrawMethod;
use crate::error::Result;
use crate::input::InputState;

pub mod camera;
pub mod draw_methods;
pub mod triangle;
pub mod window;

/// One clip-space triangle, wound counter-clockwise.
pub const TRIANGLE: [Position; 3] = [
    Position([-1.0, -1.0, 0.0]),
    Position([1.0, -1.0, 0.0]),
    Position([0.0, 1.0, 0.0]),
];
pub const TRIANGLE_INDICES: [u32; 3] = [0, 1, 2];

/// The Scene trait defines the common interface for all tutorial stages.
pub trait Scene {
    /// Updates the scene state once per frame, before rendering.
    fn update(&mut self, _input: &InputState, _delta_time: f32) {}

    /// Renders the scene.
    fn render(&mut self, gl: &glow::Context) -> Result<()>;
}

/// The tutorial stages, in the order they are taught.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Window,
    Triangle,
    DrawMethods,
    Camera,
}

impl std::str::FromStr for Stage {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "window" => Ok(Stage::Window),
            "triangle" => Ok(Stage::Triangle),
            "draw-methods" => Ok(Stage::DrawMethods),
            "camera" => Ok(Stage::Camera),
            _ => Err(format!(
                "Unknown stage '{s}', expected one of: window, triangle, draw-methods, camera"
            )),
        }
    }
}

impl Stage {
    pub fn title(self) -> &'static str {
        match self {
            Stage::Window => "SDL Window",
            Stage::Triangle => "Hello Triangle!",
            Stage::DrawMethods => "Draw Methods",
            Stage::Camera => "First Person Camera",
        }
    }

    /// Whether the stage wants the mouse captured for relative motion.
    pub fn captures_mouse(self) -> bool {
        self == Stage::Camera
    }

    /// Builds the stage's scene, compiling whatever shaders it needs.
    pub fn build(self, app: &App, compiler: &ShaderCompiler) -> Result<Box<dyn Scene>> {
        let scene: Box<dyn Scene> = match self {
            Stage::Window => Box::new(window::WindowScene::new(&app.gl)),
            Stage::Triangle => Box::new(triangle::TriangleScene::new(app, compiler)?),
            Stage::DrawMethods => Box::new(draw_methods::DrawMethodsScene::new(app, compiler)?),
            Stage::Camera => Box::new(camera::CameraScene::new(
                app,
                compiler,
                Vec3::new(0.0, 0.0, 3.0),
            )?),
        };
        Ok(scene)
    }
}

/// The triangle mesh and the flat-colored program most stages draw with.
pub(crate) struct TriangleResources {
    mesh: Mesh,
    commands: IndirectCommands,
    pub program: ShaderProgram,
    entry_points: EntryPoints,
}

impl TriangleResources {
    pub fn new(app: &App, compiler: &ShaderCompiler, vertex_path: &str) -> Result<Self> {
        let gl = &app.gl;
        let mesh = Mesh::new(gl, &TRIANGLE, &TRIANGLE_INDICES)?;
        check_gl(gl, "Loading triangle")?;

        let commands = IndirectCommands::for_mesh(gl, &mesh)?;
        check_gl(gl, "Loading command buffers")?;

        let program = compiler.program_from_files(vertex_path, "basic.frag")?;
        check_gl(gl, "Linking shader program")?;

        Ok(Self {
            mesh,
            commands,
            program,
            entry_points: app.entry_points,
        })
    }

    /// Draws the triangle once with `method`.
    pub fn draw(&self, gl: &glow::Context, method: DrawMethod) {
        method.draw(gl, &self.entry_points, &self.mesh, &self.commands);
    }
}
