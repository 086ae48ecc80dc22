//! Error type shared by the loader, the shader pipeline and the application shell.

use std::path::PathBuf;

use crate::abs::ShaderStage;

/// Everything that can go wrong while loading, compiling or presenting.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Neither the path as given nor the resource-relative path could be opened.
    #[error("unable to find file {path:?} (also tried {tried:?})")]
    MissingFile { path: PathBuf, tried: PathBuf },

    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The driver reported a failed compile status.
    #[error("{stage} shader failed to compile:\n{log}")]
    Compile { stage: ShaderStage, log: String },

    /// The driver reported a failed link status.
    #[error("shader program failed to link:\n{log}")]
    Link { log: String },

    /// The driver refused to create an object.
    #[error("driver error: {0}")]
    Driver(String),

    #[error("GL: {context} ({})", .errors.join(", "))]
    Gl {
        context: String,
        errors: Vec<&'static str>,
    },

    #[error("SDL: {0}")]
    Sdl(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    /// Bad command-line arguments.
    #[error("{0}")]
    Usage(String),
}

pub type Result<T> = std::result::Result<T, Error>;
