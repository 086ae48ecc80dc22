//! Startup configuration.
//!
//! The [`Config`] is read once from `<config dir>/gl-tutorials/config.json` and handed to
//! whatever needs it. Every field has a default, so an absent file or a partial file is fine.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};

/// What to do when a step of the shader pipeline fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Return a typed error to the caller.
    #[default]
    Error,
    /// Log the problem and carry on with whatever the driver or filesystem gave back.
    Lenient,
}

/// Failure policies for the two places the pipeline can fail.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoadPolicy {
    /// Applies when a source file cannot be found.
    pub missing_file: FailurePolicy,
    /// Applies when the driver reports a failed compile or link.
    pub diagnostics: FailurePolicy,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub window: WindowConfig,
    /// Requested OpenGL core profile version, `[major, minor]`.
    pub gl_version: [u8; 2],
    /// Overrides the data directory derived from the executable location.
    pub data_dir: Option<PathBuf>,
    pub policy: LoadPolicy,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            gl_version: [4, 5],
            data_dir: None,
            policy: LoadPolicy::default(),
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Parses a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(s: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(s).map_err(|e| Error::Config(e.to_string()))?;
        config.log_level()?;
        Ok(config)
    }

    /// Reads the configuration at `path`, or the defaults if there is no file there.
    pub fn load_from(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(s) => Self::from_json(&s).map_err(|e| match e {
                Error::Config(message) => Error::Config(format!("{}: {message}", path.display())),
                other => other,
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(Error::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Reads the configuration from the user's config directory.
    pub fn load() -> Result<Self> {
        match Self::default_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("gl-tutorials").join("config.json"))
    }

    /// The configured log level as a filter.
    pub fn log_level(&self) -> Result<log::LevelFilter> {
        self.log_level
            .parse()
            .map_err(|_| Error::Config(format!("unknown log level '{}'", self.log_level)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config = Config::from_json(
            r#"{ "window": { "width": 1280 }, "policy": { "diagnostics": "lenient" } }"#,
        )
        .unwrap();
        assert_eq!(config.window.width, 1280);
        assert_eq!(config.window.height, 480);
        assert_eq!(config.gl_version, [4, 5]);
        assert_eq!(config.policy.missing_file, FailurePolicy::Error);
        assert_eq!(config.policy.diagnostics, FailurePolicy::Lenient);
        assert_eq!(config.log_level().unwrap(), log::LevelFilter::Info);
    }

    #[test]
    fn test_malformed_config_is_rejected() {
        assert!(matches!(
            Config::from_json("{ \"window\": 3 }"),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            Config::from_json(r#"{ "log_level": "loud" }"#),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_missing_file_means_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.json")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_data_dir_override() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "data_dir": "/srv/shaders", "log_level": "debug" }"#).unwrap();
        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.data_dir, Some(PathBuf::from("/srv/shaders")));
        assert_eq!(config.log_level().unwrap(), log::LevelFilter::Debug);
    }
}
