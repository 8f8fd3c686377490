//! Error types for the interaction crate
//!
//! Runtime edge cases (ray misses, missing item metadata, busy transitions)
//! are never errors. These variants only cover loading and validating
//! configuration before the tick loop starts.

use thiserror::Error;

/// Result type alias for interaction operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while setting up controllers
#[derive(Debug, Error)]
pub enum Error {
    /// Config file could not be read
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for the expected schema
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A config value is out of its allowed range
    #[error("Invalid config value `{field}`: {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    /// An animation curve has no keys or unordered keys
    #[error("Invalid curve: {0}")]
    InvalidCurve(String),
}

impl Error {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field,
            reason: reason.into(),
        }
    }
}
