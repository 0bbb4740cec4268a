//! Collaborator traits implemented outside this core.

use std::path::Path;

use async_trait::async_trait;
use ebbtide_events::InfoHash;

use crate::error::TorrentError;
use crate::model::{DiskUsage, TorrentDescriptor};

/// Primary engine trait implemented by transfer-engine adapters.
#[async_trait]
pub trait TorrentEngine: Send + Sync {
    /// Admit a new torrent into the underlying engine.
    async fn add_torrent(&self, descriptor: TorrentDescriptor) -> anyhow::Result<()>;

    /// Pause an active torrent without removing it.
    async fn pause_torrent(&self, hash: InfoHash) -> anyhow::Result<()>;

    /// Ask the engine to fetch metadata for hash-only torrents.
    async fn request_metadata(&self, hashes: Vec<InfoHash>) -> anyhow::Result<()>;

    /// Resume a paused torrent; default implementation reports lack of support.
    async fn resume_torrent(&self, hash: InfoHash) -> anyhow::Result<()> {
        let _ = hash;
        Err(TorrentError::Unsupported {
            operation: "resume",
        }
        .into())
    }

    /// Remove a torrent; default implementation reports lack of support.
    async fn remove_torrent(&self, hash: InfoHash) -> anyhow::Result<()> {
        let _ = hash;
        Err(TorrentError::Unsupported {
            operation: "remove",
        }
        .into())
    }
}

/// Free-space query delegated to the platform.
///
/// Invoked synchronously from the disk-space governor; a slow probe delays
/// the current evaluation pass but cannot corrupt state.
pub trait DiskSpaceProbe: Send + Sync {
    /// Report free and total bytes for the volume holding `save_path`.
    ///
    /// # Errors
    ///
    /// Returns an error when the volume cannot be queried; the governor
    /// skips the torrent for the current pass.
    fn probe(&self, save_path: &Path) -> anyhow::Result<DiskUsage>;
}

/// Fire-and-forget user notification surface.
pub trait Notifier: Send + Sync {
    /// Deliver a short notification; failures are the collaborator's problem.
    fn notify(&self, title: &str, message: &str);
}

/// Interactive per-descriptor review surface.
///
/// Receives classified descriptors when the skip-review flag is off; the
/// review step may edit save path and label before submitting each one.
pub trait ReviewSink: Send + Sync {
    /// Hand a classified batch over for interactive review.
    fn review(&self, descriptors: Vec<TorrentDescriptor>);
}
