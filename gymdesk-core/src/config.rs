//! Runtime configuration
//!
//! Resolution order, later wins:
//! 1. built-in defaults
//! 2. `gymdesk.toml` in the working directory (or the file named by `GYMDESK_CONFIG`)
//! 3. `GYMDESK_DATABASE` / `GYMDESK_BIND` environment variables
//!
//! CLI flags are applied on top by the binary.

use std::env;
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default SQLite file, relative to the working directory
pub const DEFAULT_DATABASE_PATH: &str = "bancodedados/academia.db";

/// Default listen address for the web form
pub const DEFAULT_BIND_ADDR: ([u8; 4], u16) = ([127, 0, 0, 1], 8501);

const CONFIG_FILE_NAME: &str = "gymdesk.toml";
const ENV_CONFIG: &str = "GYMDESK_CONFIG";
const ENV_DATABASE: &str = "GYMDESK_DATABASE";
const ENV_BIND: &str = "GYMDESK_BIND";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GymdeskConfig {
    /// SQLite database file
    pub database_path: PathBuf,
    /// Address the HTTP server binds to
    pub bind_addr: SocketAddr,
}

impl Default for GymdeskConfig {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from(DEFAULT_DATABASE_PATH),
            bind_addr: SocketAddr::from(DEFAULT_BIND_ADDR),
        }
    }
}

impl GymdeskConfig {
    /// Load config from file and environment.
    ///
    /// A missing config file is not an error; defaults are used instead.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::config_path();
        let mut config = Self::load_from(&path)?;
        config.apply_overrides(env::var(ENV_DATABASE).ok(), env::var(ENV_BIND).ok())?;
        Ok(config)
    }

    /// Config file path: `$GYMDESK_CONFIG` or `./gymdesk.toml`
    pub fn config_path() -> PathBuf {
        env::var_os(ENV_CONFIG)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME))
    }

    /// Read a config file, falling back to defaults when it does not exist
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Apply database/bind overrides given as raw strings.
    ///
    /// Empty strings are ignored so an exported-but-blank variable does not
    /// wipe a configured value.
    pub fn apply_overrides(
        &mut self,
        database: Option<String>,
        bind: Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(database) = database.filter(|v| !v.trim().is_empty()) {
            self.database_path = PathBuf::from(database);
        }

        if let Some(bind) = bind.filter(|v| !v.trim().is_empty()) {
            self.bind_addr = bind.trim().parse().map_err(|_| {
                ConfigError::invalid_value(ENV_BIND, &bind, "expected HOST:PORT, e.g. 127.0.0.1:8501")
            })?;
        }

        Ok(())
    }

    /// Render the effective config as TOML
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let config = GymdeskConfig::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, GymdeskConfig::default());
        assert_eq!(config.database_path, PathBuf::from("bancodedados/academia.db"));
        assert_eq!(config.bind_addr.port(), 8501);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("gymdesk.toml");
        fs::write(&path, "database_path = \"/srv/gym/students.db\"\n").unwrap();

        let config = GymdeskConfig::load_from(&path).unwrap();
        assert_eq!(config.database_path, PathBuf::from("/srv/gym/students.db"));
        assert_eq!(config.bind_addr, SocketAddr::from(DEFAULT_BIND_ADDR));
    }

    #[test]
    fn malformed_file_is_parse_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("gymdesk.toml");
        fs::write(&path, "bind_addr = 42\n").unwrap();

        let err = GymdeskConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn overrides_replace_values() {
        let mut config = GymdeskConfig::default();
        config
            .apply_overrides(Some("other.db".into()), Some("0.0.0.0:9000".into()))
            .unwrap();
        assert_eq!(config.database_path, PathBuf::from("other.db"));
        assert_eq!(config.bind_addr.port(), 9000);
    }

    #[test]
    fn blank_overrides_are_ignored() {
        let mut config = GymdeskConfig::default();
        config
            .apply_overrides(Some(String::new()), Some("  ".into()))
            .unwrap();
        assert_eq!(config, GymdeskConfig::default());
    }

    #[test]
    fn bad_bind_override_is_rejected() {
        let mut config = GymdeskConfig::default();
        let err = config
            .apply_overrides(None, Some("localhost".into()))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn toml_output_round_trips() {
        let config = GymdeskConfig::default();
        let rendered = config.to_toml().unwrap();
        let parsed: GymdeskConfig = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed, config);
    }
}
