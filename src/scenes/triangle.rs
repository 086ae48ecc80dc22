use glam::Vec4;
use glow::HasContext;

use super::{Scene, TriangleResources};
use crate::abs::{App, ShaderCompiler, check_gl};
use crate::draw::DrawMethod;
use crate::error::Result;

/// Hello triangle: one `glDrawArrays` per frame.
pub struct TriangleScene {
    resources: TriangleResources,
}

impl TriangleScene {
    pub fn new(app: &App, compiler: &ShaderCompiler) -> Result<Self> {
        Ok(Self {
            resources: TriangleResources::new(app, compiler, "basic.vert")?,
        })
    }
}

impl Scene for TriangleScene {
    fn render(&mut self, gl: &glow::Context) -> Result<()> {
        unsafe {
            gl.clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT);
        }

        let program = &self.resources.program;
        program.use_program();
        program.set_uniform("u_color", Vec4::new(1.0, 0.5, 0.2, 1.0));
        self.resources.draw(gl, DrawMethod::DrawArrays);
        check_gl(gl, "Drawing triangle via glDrawArrays")
    }
}
