use std::sync::Arc;

use glow::HasContext;

use super::Scene;
use crate::error::Result;

/// Just a window and a context; clears every frame.
pub struct WindowScene;

impl WindowScene {
    pub fn new(gl: &Arc<glow::Context>) -> Self {
        unsafe {
            gl.clear_color(0.1, 0.1, 0.2, 1.0);
        }
        Self
    }
}

impl Scene for WindowScene {
    fn render(&mut self, gl: &glow::Context) -> Result<()> {
        unsafe {
            gl.clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT);
        }
        Ok(())
    }
}
