//! Error types for intake parsing.

use ebbtide_events::HashParseError;
use thiserror::Error;

/// Failure to turn a raw input into a descriptor.
#[derive(Debug, Error)]
pub enum IntakeError {
    /// The input does not use the magnet scheme.
    #[error("not a magnet link")]
    NotMagnet,
    /// The magnet link carries no usable `xt` topic.
    #[error("magnet link missing a usable info hash")]
    MissingHash,
    /// The magnet link's hash text could not be decoded.
    #[error("malformed info hash in magnet link")]
    InvalidHash(#[from] HashParseError),
}

/// Convenience alias for intake results.
pub type IntakeResult<T> = Result<T, IntakeError>;
