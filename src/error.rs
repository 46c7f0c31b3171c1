//! Error types for darter.
//!
//! Uses `thiserror` for ergonomic error definitions.

use std::path::PathBuf;
use thiserror::Error;

/// Errors from loading the settings file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not determine a home directory for config paths")]
    DirectoryNotFound,

    #[error("failed to read {path}: {reason}")]
    ReadFailed { path: PathBuf, reason: String },

    #[error("invalid settings format: {0}")]
    InvalidFormat(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// A port-range block that could not be parsed as numbers.
///
/// Always recoverable: the offending block is skipped and production
/// continues with the remaining blocks.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid port range block: {0:?}")]
pub struct RangeParseError(pub String);
