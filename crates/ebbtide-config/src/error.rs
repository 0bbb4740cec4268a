//! Error types for settings loading and validation.

use thiserror::Error;

/// Primary error type for settings operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The settings file could not be read.
    #[error("failed to read settings file")]
    Read {
        /// Underlying IO failure.
        #[source]
        source: std::io::Error,
    },
    /// The settings file held malformed JSON.
    #[error("failed to parse settings file")]
    Parse {
        /// Underlying deserialization failure.
        #[source]
        source: serde_json::Error,
    },
    /// A settings document failed validation.
    #[error("invalid settings: {reason}")]
    Invalid {
        /// Human-readable rejection reason.
        reason: String,
    },
}

/// Convenience alias for settings operation results.
pub type ConfigResult<T> = Result<T, ConfigError>;
