//! SDL2 and OpenGL application management.
//!
//! This module defines the [`App`] struct which encapsulates the SDL2
//! and OpenGL context necessary for creating a windowed application.

use std::sync::Arc;

use glow::HasContext;

use super::check::{clear_gl, sdl_error};
use super::entry::EntryPoints;
use crate::config::Config;
use crate::error::Result;

/// The [`App`] struct encapsulates the SDL2 and OpenGL context.
pub struct App {
    pub sdl: sdl2::Sdl,
    pub video_subsystem: sdl2::VideoSubsystem,
    pub window: sdl2::video::Window,
    pub gl_context: sdl2::video::GLContext,
    pub gl: Arc<glow::Context>,
    pub entry_points: EntryPoints,
    pub event_pump: sdl2::EventPump,
}

impl App {
    /// Opens a window titled `title` with a core profile context of the configured version.
    pub fn new(title: &str, config: &Config) -> Result<Self> {
        let sdl = sdl2::init().map_err(|e| sdl_error("Unable to init SDL", e))?;
        let video_subsystem = sdl
            .video()
            .map_err(|e| sdl_error("Unable to init SDL video", e))?;

        let [major, minor] = config.gl_version;
        let gl_attr = video_subsystem.gl_attr();
        gl_attr.set_context_profile(sdl2::video::GLProfile::Core);
        gl_attr.set_context_version(major, minor);
        gl_attr.set_accelerated_visual(true);
        gl_attr.set_double_buffer(true);
        gl_attr.set_depth_size(24);

        let window = video_subsystem
            .window(title, config.window.width, config.window.height)
            .opengl()
            .position_centered()
            .build()
            .map_err(|e| sdl_error("Unable to open SDL window", e))?;
        let gl_context = window
            .gl_create_context()
            .map_err(|e| sdl_error("Unable to create OpenGL context", e))?;
        window
            .gl_make_current(&gl_context)
            .map_err(|e| sdl_error("Unable to set the current OpenGL context", e))?;

        let gl = unsafe {
            glow::Context::from_loader_function(|s| {
                video_subsystem.gl_get_proc_address(s) as *const _
            })
        };
        let entry_points = unsafe {
            EntryPoints::load(|s| video_subsystem.gl_get_proc_address(s) as *const _)?
        };
        let event_pump = sdl
            .event_pump()
            .map_err(|e| sdl_error("Unable to get the SDL event pump", e))?;

        let version = gl.version();
        log::info!(
            "OpenGL {}.{} ({})",
            version.major,
            version.minor,
            version.vendor_info
        );

        // Context creation can leave stale errors behind
        clear_gl(&gl);

        Ok(Self {
            sdl,
            video_subsystem,
            window,
            gl_context,
            gl: Arc::new(gl),
            entry_points,
            event_pump,
        })
    }

    /// Width over height of the window's drawable area.
    pub fn aspect_ratio(&self) -> f32 {
        let (width, height) = self.window.drawable_size();
        width as f32 / height.max(1) as f32
    }
}
