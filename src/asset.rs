//! Locating and reading shader sources.
//!
//! [`ResourceDir`] is the data directory shipped next to the executable. [`FileLoader`] reads a
//! text file, first from the path as given and then relative to the resource directory.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Component, Path, PathBuf};

use crate::config::FailurePolicy;
use crate::error::{Error, Result};

/// The `data` directory of the source tree, used when the binary runs from a build directory.
pub const SOURCE_DATA_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/data");

/// A file every stage loads; its presence marks a usable data directory.
const MARKER: &str = "basic.frag";

/// Directory that relative asset paths fall back to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceDir {
    dir: PathBuf,
}

impl ResourceDir {
    /// Uses `dir` verbatim.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Derives the data directory from the directory holding the executable.
    ///
    /// The last `bin` segment of `base` and everything after it is replaced with `data`, so
    /// `/opt/tutorials/bin/` becomes `/opt/tutorials/data`. A base without a `bin` segment is
    /// used unchanged.
    pub fn from_base(base: &Path) -> Self {
        let components: Vec<Component> = base.components().collect();
        let last_bin = components
            .iter()
            .rposition(|c| matches!(c, Component::Normal(name) if *name == "bin"));

        let dir = match last_bin {
            Some(index) => components[..index]
                .iter()
                .collect::<PathBuf>()
                .join("data"),
            None => base.to_path_buf(),
        };

        Self { dir }
    }

    /// Like [`ResourceDir::from_base`], but falls back to [`SOURCE_DATA_DIR`] when the derived
    /// directory holds no shaders, as under `target/debug`.
    pub fn installed_or_source(base: &Path) -> Self {
        let installed = Self::from_base(base);
        if installed.resolve(MARKER).is_file() {
            installed
        } else {
            log::debug!(
                "No {MARKER} in {}, using {SOURCE_DATA_DIR}",
                installed.dir.display()
            );
            Self::new(SOURCE_DATA_DIR)
        }
    }

    /// Asks SDL where the running executable lives and derives the data directory from it.
    pub fn from_executable() -> Result<Self> {
        let base = sdl2::filesystem::base_path()
            .map_err(|e| Error::Sdl(format!("Unable to query the base path ({e})")))?;
        let resources = Self::installed_or_source(Path::new(&base));
        log::debug!("Resource directory: {}", resources.dir.display());
        Ok(resources)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Joins a path onto the resource directory.
    pub fn resolve(&self, path: impl AsRef<Path>) -> PathBuf {
        self.dir.join(path)
    }
}

/// Reads whole text files, falling back to the resource directory.
#[derive(Debug, Clone)]
pub struct FileLoader {
    resources: ResourceDir,
    policy: FailurePolicy,
}

impl FileLoader {
    pub fn new(resources: ResourceDir, policy: FailurePolicy) -> Self {
        Self { resources, policy }
    }

    /// Reads the file at `path` into a string.
    ///
    /// An empty path gives an empty string without touching the filesystem. Every line of the
    /// file is prefixed with `\n` in the result.
    pub fn load(&self, path: impl AsRef<Path>) -> Result<String> {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            return Ok(String::new());
        }

        let (file, opened) = match File::open(path) {
            Ok(file) => (file, path.to_path_buf()),
            Err(_) => {
                let fallback = self.resources.resolve(path);
                match File::open(&fallback) {
                    Ok(file) => (file, fallback),
                    Err(_) => return self.missing(path, fallback),
                }
            }
        };

        log::debug!("Loading {}", opened.display());

        let mut contents = String::new();
        for line in BufReader::new(file).lines() {
            let line = line.map_err(|source| Error::Io {
                path: opened.clone(),
                source,
            })?;
            contents.push('\n');
            contents.push_str(&line);
        }

        Ok(contents)
    }

    fn missing(&self, path: &Path, tried: PathBuf) -> Result<String> {
        match self.policy {
            FailurePolicy::Error => Err(Error::MissingFile {
                path: path.to_path_buf(),
                tried,
            }),
            FailurePolicy::Lenient => {
                log::warn!(
                    "Unable to find {} (also tried {}), using empty contents",
                    path.display(),
                    tried.display()
                );
                Ok(String::new())
            }
        }
    }
}
