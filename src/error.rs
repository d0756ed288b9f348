//! Error types for the port finder CLI.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for port finder operations.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to serialize output: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors related to the optional settings file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    NoConfigDir,

    #[error("Failed to read config file at {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    ParseFailed {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Reasons a process or socket table could not be consulted.
///
/// These never leave the `system` module: the `Inspector` turns them into
/// "not found" values.
#[derive(Error, Debug)]
pub enum InspectError {
    #[error("Failed to run {tool}: {source}")]
    ToolUnavailable {
        tool: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("Unexpected {tool} output: {line:?}")]
    Malformed { tool: &'static str, line: String },

    #[error("Platform not supported")]
    #[allow(dead_code)] // Used in #[cfg(not(unix))] branch
    PlatformNotSupported,
}

pub type Result<T> = std::result::Result<T, Error>;
