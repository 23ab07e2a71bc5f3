
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// Lazy cache size used by the per-display manager when nothing else is configured
pub const DEFAULT_CACHE_CAPACITY: usize = 300;

/// ConfigError enum
/// Reasons a manager configuration could not be loaded
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error)
}

/// ManagerConfig struct
/// Tuning for a manager stack. Only the lazy layer's cache capacity is currently configurable;
/// keys missing from the TOML source keep their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ManagerConfig {
    pub cache_capacity: usize
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            cache_capacity: DEFAULT_CACHE_CAPACITY
        }
    }
}

impl ManagerConfig {

    pub fn from_toml_str(source: &str) -> Result<ManagerConfig, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    /// Parse configuration options from a TOML file
    pub fn from_toml_file(path: &Path) -> Result<ManagerConfig, ConfigError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }
}
