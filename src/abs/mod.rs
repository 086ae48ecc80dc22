//! This module contains the OpenGL building blocks of the tutorials,
//! including application setup, shader compilation, error checks and meshes.

pub mod app;
pub mod check;
pub mod driver;
pub mod entry;
pub mod mesh;
pub mod shader;

pub use app::*;
pub use check::*;
pub use driver::*;
pub use entry::*;
pub use mesh::*;
pub use shader::*;
