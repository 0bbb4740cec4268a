//! Recording implementations of the collaborator traits.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::bail;
use async_trait::async_trait;
use ebbtide_events::InfoHash;
use ebbtide_torrent_core::{
    DiskSpaceProbe, DiskUsage, Notifier, ReviewSink, TorrentDescriptor, TorrentEngine,
};

/// Engine stub that records every call for later assertions.
#[derive(Default)]
pub struct RecordingEngine {
    added: Mutex<Vec<TorrentDescriptor>>,
    paused: Mutex<Vec<InfoHash>>,
    metadata_requests: Mutex<Vec<Vec<InfoHash>>>,
}

impl RecordingEngine {
    /// Descriptors submitted via `add_torrent`, in call order.
    ///
    /// # Panics
    ///
    /// Panics if the recording mutex has been poisoned.
    #[must_use]
    pub fn added(&self) -> Vec<TorrentDescriptor> {
        self.added.lock().expect("recording mutex poisoned").clone()
    }

    /// Hashes passed to `pause_torrent`, in call order.
    ///
    /// # Panics
    ///
    /// Panics if the recording mutex has been poisoned.
    #[must_use]
    pub fn paused(&self) -> Vec<InfoHash> {
        self.paused
            .lock()
            .expect("recording mutex poisoned")
            .clone()
    }

    /// Hash batches passed to `request_metadata`, in call order.
    ///
    /// # Panics
    ///
    /// Panics if the recording mutex has been poisoned.
    #[must_use]
    pub fn metadata_requests(&self) -> Vec<Vec<InfoHash>> {
        self.metadata_requests
            .lock()
            .expect("recording mutex poisoned")
            .clone()
    }
}

#[async_trait]
impl TorrentEngine for RecordingEngine {
    async fn add_torrent(&self, descriptor: TorrentDescriptor) -> anyhow::Result<()> {
        self.added
            .lock()
            .expect("recording mutex poisoned")
            .push(descriptor);
        Ok(())
    }

    async fn pause_torrent(&self, hash: InfoHash) -> anyhow::Result<()> {
        self.paused
            .lock()
            .expect("recording mutex poisoned")
            .push(hash);
        Ok(())
    }

    async fn request_metadata(&self, hashes: Vec<InfoHash>) -> anyhow::Result<()> {
        self.metadata_requests
            .lock()
            .expect("recording mutex poisoned")
            .push(hashes);
        Ok(())
    }
}

/// Probe returning preconfigured usage figures per save path.
#[derive(Default)]
pub struct FixedProbe {
    usages: Mutex<HashMap<PathBuf, DiskUsage>>,
}

impl FixedProbe {
    /// Configure the usage reported for `save_path`.
    ///
    /// # Panics
    ///
    /// Panics if the configuration mutex has been poisoned.
    pub fn set(&self, save_path: impl Into<PathBuf>, free_bytes: u64, total_bytes: u64) {
        self.usages.lock().expect("probe mutex poisoned").insert(
            save_path.into(),
            DiskUsage {
                free_bytes,
                total_bytes,
            },
        );
    }
}

impl DiskSpaceProbe for FixedProbe {
    fn probe(&self, save_path: &Path) -> anyhow::Result<DiskUsage> {
        let usages = self.usages.lock().expect("probe mutex poisoned");
        match usages.get(save_path) {
            Some(usage) => Ok(*usage),
            None => bail!("no usage configured for {}", save_path.display()),
        }
    }
}

/// Notifier that records every notification.
#[derive(Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<(String, String)>>,
}

impl RecordingNotifier {
    /// Delivered `(title, message)` pairs, in call order.
    ///
    /// # Panics
    ///
    /// Panics if the recording mutex has been poisoned.
    #[must_use]
    pub fn messages(&self) -> Vec<(String, String)> {
        self.messages
            .lock()
            .expect("recording mutex poisoned")
            .clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, title: &str, message: &str) {
        self.messages
            .lock()
            .expect("recording mutex poisoned")
            .push((title.to_string(), message.to_string()));
    }
}

/// Review sink that records every handed-over batch.
#[derive(Default)]
pub struct RecordingReviewSink {
    batches: Mutex<Vec<Vec<TorrentDescriptor>>>,
}

impl RecordingReviewSink {
    /// Batches handed over for review, in call order.
    ///
    /// # Panics
    ///
    /// Panics if the recording mutex has been poisoned.
    #[must_use]
    pub fn batches(&self) -> Vec<Vec<TorrentDescriptor>> {
        self.batches
            .lock()
            .expect("recording mutex poisoned")
            .clone()
    }
}

impl ReviewSink for RecordingReviewSink {
    fn review(&self, descriptors: Vec<TorrentDescriptor>) {
        self.batches
            .lock()
            .expect("recording mutex poisoned")
            .push(descriptors);
    }
}
