//! Error types for settings loading.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while building [`Settings`](super::models::Settings).
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read a settings file from disk.
    #[error("Failed to read config file at {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to parse TOML settings.
    #[error("Failed to parse TOML file at {path}: {source}")]
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// A value is present but unusable.
    #[error("Invalid configuration in {path}: {reason}")]
    InvalidConfig { path: PathBuf, reason: String },
}

/// Type alias for Result with ConfigError.
pub type ConfigResult<T> = Result<T, ConfigError>;
