//! Incremental OpenGL/SDL2 tutorial stages and the shader pipeline they share.
//!
//! The reusable part is the pipeline: a [`FileLoader`](asset::FileLoader) reads shader sources,
//! falling back to the [`ResourceDir`](asset::ResourceDir) next to the executable, and a
//! [`ShaderCompiler`](abs::ShaderCompiler) turns them into owned [`Shader`](abs::Shader) and
//! [`ShaderProgram`](abs::ShaderProgram) handles. The tutorial stages in [`scenes`] drive it
//! against a real context.

pub mod abs;
pub mod asset;
pub mod camera;
pub mod config;
pub mod draw;
pub mod error;
pub mod input;
pub mod logging;
pub mod scenes;

pub use error::{Error, Result};
