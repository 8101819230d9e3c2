//! Adapter configuration parsing.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::key::KeyStrategy;

/// Adapter configuration loaded from a TOML file.
///
/// Every section is optional; missing values fall back to their defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AdapterConfig {
    /// Where records are persisted.
    pub store: StoreConfig,
    /// Key derivation settings.
    pub adapter: KeyConfig,
    /// Tracing subscriber settings.
    pub logging: LoggingConfig,
}

/// Store location.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Path to the database directory.
    pub path: PathBuf,
    /// Suite (keyspace) inside the database.
    pub suite: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(".kv-adapter"),
            suite: "standard".to_string(),
        }
    }
}

/// Key derivation settings.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct KeyConfig {
    /// Adapter name used as the first key component (strategy default if unset).
    pub name: Option<String>,
    /// `"current"` or `"legacy"`.
    pub strategy: KeyStrategy,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive, as accepted by `RUST_LOG` (e.g. "info" or "kv_adapter=debug").
    pub level: String,
    /// Output format.
    pub format: LogFormat,
    /// "stdout" or "stderr".
    pub output: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
            output: "stderr".to_string(),
        }
    }
}

/// Log line format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl AdapterConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::Io(path.as_ref().display().to_string(), e))?;
        Self::from_toml(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::Parse)
    }
}

/// Configuration error.
#[derive(Debug)]
pub enum ConfigError {
    /// IO error reading config file.
    Io(String, std::io::Error),
    /// TOML parse error.
    Parse(toml::de::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(path, e) => write!(f, "Failed to read config file '{}': {}", path, e),
            ConfigError::Parse(e) => write!(f, "Failed to parse config: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(_, e) => Some(e),
            ConfigError::Parse(e) => Some(e),
        }
    }
}
