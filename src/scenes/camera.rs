use glam::{Mat4, Vec3, Vec4};
use glow::HasContext;

use super::{Scene, TriangleResources};
use crate::abs::{App, ShaderCompiler, check_gl};
use crate::camera::Camera;
use crate::draw::DrawMethod;
use crate::error::Result;
use crate::input::InputState;

/// The triangle in world space, seen through a first-person camera.
pub struct CameraScene {
    resources: TriangleResources,
    camera: Camera,
    aspect_ratio: f32,
}

impl CameraScene {
    pub fn new(app: &App, compiler: &ShaderCompiler, position: Vec3) -> Result<Self> {
        unsafe {
            app.gl.enable(glow::DEPTH_TEST);
        }

        Ok(Self {
            resources: TriangleResources::new(app, compiler, "camera.vert")?,
            camera: Camera::new(position),
            aspect_ratio: app.aspect_ratio(),
        })
    }
}

impl Scene for CameraScene {
    fn update(&mut self, input: &InputState, delta_time: f32) {
        self.camera.update(input, delta_time);
    }

    fn render(&mut self, gl: &glow::Context) -> Result<()> {
        unsafe {
            gl.clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT);
        }

        let model = Mat4::IDENTITY;
        let mvp = self.camera.projection(self.aspect_ratio) * self.camera.view() * model;

        let program = &self.resources.program;
        program.use_program();
        program.set_uniform("u_mvp", mvp);
        program.set_uniform("u_color", Vec4::new(0.2, 0.8, 0.4, 1.0));
        self.resources.draw(gl, DrawMethod::DrawElements);
        check_gl(gl, "Drawing triangle through the camera")
    }
}
