use glow::HasContext;

use super::{Scene, TriangleResources};
use crate::abs::{App, ShaderCompiler, check_gl};
use crate::draw::DrawMethod;
use crate::error::Result;

/// Draws the triangle with a different draw call every frame.
pub struct DrawMethodsScene {
    resources: TriangleResources,
    method: DrawMethod,
}

impl DrawMethodsScene {
    pub fn new(app: &App, compiler: &ShaderCompiler) -> Result<Self> {
        Ok(Self {
            resources: TriangleResources::new(app, compiler, "basic.vert")?,
            method: DrawMethod::DrawArrays,
        })
    }
}

impl Scene for DrawMethodsScene {
    fn render(&mut self, gl: &glow::Context) -> Result<()> {
        unsafe {
            gl.clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT);
        }

        let program = &self.resources.program;
        program.use_program();
        program.set_uniform("u_color", self.method.color());
        self.resources.draw(gl, self.method);
        check_gl(gl, &format!("Drawing triangle via {}", self.method.gl_name()))?;

        log::trace!("Drew with {}", self.method.gl_name());
        self.method = self.method.next();
        Ok(())
    }
}
