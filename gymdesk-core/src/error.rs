/// Structured error types for gymdesk-core.
///
/// Uses `thiserror` so library consumers get composable errors; the CLI
/// wraps them in `anyhow` with extra context.
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Configuration loading failed
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file exists but could not be read
    #[error("Failed to read config file {path:?}: {source}")]
    Read { path: PathBuf, source: io::Error },

    /// Config file is not valid TOML for this schema
    #[error("Invalid config file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// An override (environment or flag) has an unusable value
    #[error("Invalid value '{value}' for {key}: {reason}")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },

    /// Effective config could not be rendered back to TOML
    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

impl ConfigError {
    /// Create an invalid value error
    pub fn invalid_value(
        key: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidValue {
            key: key.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }
}
