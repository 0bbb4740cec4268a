//! Error types for torrent collaborator operations.

use std::error::Error;

use ebbtide_events::InfoHash;
use thiserror::Error;

/// Primary error type for torrent operations.
#[derive(Debug, Error)]
pub enum TorrentError {
    /// Operation is not supported by the underlying engine.
    #[error("torrent operation '{operation}' not supported")]
    Unsupported {
        /// Operation identifier.
        operation: &'static str,
    },
    /// Operation failed in the underlying engine.
    #[error("torrent operation '{operation}' failed")]
    OperationFailed {
        /// Operation identifier.
        operation: &'static str,
        /// Torrent identity when available.
        hash: Option<InfoHash>,
        /// Underlying failure.
        #[source]
        source: Box<dyn Error + Send + Sync>,
    },
    /// Torrent was not found in the engine.
    #[error("torrent {hash} not found")]
    NotFound {
        /// Missing torrent identity.
        hash: InfoHash,
    },
}

/// Convenience alias for torrent operation results.
pub type TorrentResult<T> = Result<T, TorrentError>;
