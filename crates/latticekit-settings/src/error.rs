//! Settings errors: file access, (de)serialization, and validation.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading, saving, or validating a [`Config`](crate::Config).
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Failed to read settings from {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("Failed to write settings to {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },

    #[error("Failed to create settings directory {}: {source}", path.display())]
    CreateDir { path: PathBuf, source: io::Error },

    /// A value parsed but makes no geometric or visual sense.
    #[error("Invalid setting '{key}': {reason}")]
    InvalidSetting { key: String, reason: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML write error: {0}")]
    TomlWrite(#[from] toml::ser::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Configuration errors that do not involve file contents.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Only `.toml` and `.json` files are understood.
    #[error("Unsupported config format '{extension}'")]
    UnsupportedFormat { extension: String },

    #[error("Value out of range for '{key}': {value}")]
    ValueOutOfRange { key: String, value: String },

    /// The platform has no per-user configuration directory.
    #[error("No configuration directory on {os}")]
    NoConfigDirectory { os: &'static str },
}

impl ConfigError {
    pub(crate) fn out_of_range(key: &str, value: impl ToString) -> Self {
        ConfigError::ValueOutOfRange {
            key: key.to_string(),
            value: value.to_string(),
        }
    }
}

pub type SettingsResult<T> = Result<T, SettingsError>;
