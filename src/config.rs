//! Command defaults, optionally overridden by a TOML settings file.
//!
//! The file is only ever read. A missing file means built-in defaults.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::allocator::DEFAULT_CANDIDATES;
use crate::error::{ConfigError, Result};
use crate::port::Port;

/// Environment variable that overrides the settings file location.
pub const CONFIG_ENV: &str = "PORT_FINDER_CONFIG";

/// Defaults for every command that takes a port range.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub find: FindSettings,
    pub scan: ScanSettings,
    pub suggest: SuggestSettings,
}

/// Defaults for `find-port`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FindSettings {
    pub start: Port,
    pub max_attempts: u32,
}

/// Defaults for `scan-ports`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanSettings {
    pub start: Port,
    pub count: u32,
}

/// Defaults for `suggest`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuggestSettings {
    pub preferred: Port,
    /// Tried in this order after the preferred port.
    pub candidates: Vec<Port>,
}

impl Default for FindSettings {
    fn default() -> Self {
        Self {
            start: Port::DEFAULT_START,
            max_attempts: 10,
        }
    }
}

impl Default for ScanSettings {
    fn default() -> Self {
        Self {
            start: Port::DEFAULT_START,
            count: 5,
        }
    }
}

impl Default for SuggestSettings {
    fn default() -> Self {
        Self {
            preferred: Port::DEFAULT_START,
            candidates: DEFAULT_CANDIDATES.iter().filter_map(|&n| Port::new(n)).collect(),
        }
    }
}

/// Returns the path to the settings file.
///
/// Respects `PORT_FINDER_CONFIG` if set, otherwise uses the system config
/// directory.
pub fn config_path() -> std::result::Result<PathBuf, ConfigError> {
    if let Ok(path) = std::env::var(CONFIG_ENV) {
        return Ok(PathBuf::from(path));
    }
    let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
    Ok(config_dir.join("port-finder").join("config.toml"))
}

/// Loads settings from the default location.
pub fn load_settings() -> Result<Settings> {
    match config_path() {
        Ok(path) => load_settings_from(&path),
        Err(ConfigError::NoConfigDir) => Ok(Settings::default()),
        Err(e) => Err(e.into()),
    }
}

/// Loads settings from `path`, falling back to defaults if it does not exist.
pub fn load_settings_from(path: &Path) -> Result<Settings> {
    if !path.exists() {
        debug!(path = %path.display(), "no settings file, using defaults");
        return Ok(Settings::default());
    }

    let content = fs::read_to_string(path).map_err(|source| ConfigError::ReadFailed {
        path: path.to_path_buf(),
        source,
    })?;

    let settings = toml::from_str(&content).map_err(|source| ConfigError::ParseFailed {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(settings)
}
