//! Session-state core: intake dispatch, selection, counters, disk-space
//! enforcement.
//!
//! All mutable state lives on a single reconciliation task; the cloneable
//! [`SessionController`] marshals engine events, intake requests, and
//! selection updates onto it over a command channel, and the worker publishes
//! typed display signals to the shared [`EventBus`].
//!
//! [`EventBus`]: ebbtide_events::EventBus

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Result, anyhow};
use ebbtide_config::SettingsService;
use ebbtide_events::{EventBus, InfoHash};
use ebbtide_intake::MetainfoDecoder;
use ebbtide_torrent_core::{
    DiskSpaceProbe, Notifier, ReviewSink, SessionEvent, TorrentEngine, TorrentHandle, TorrentInfo,
};
use tokio::sync::{mpsc, oneshot};

mod command;
pub mod governor;
pub mod registry;
pub mod selection;
mod worker;

pub use governor::{DiskSpaceGovernor, PauseRequest};
pub use registry::MetadataRegistry;
pub use selection::{RemovalOutcome, SelectionTracker};

use command::SessionMessage;

const COMMAND_BUFFER: usize = 128;

/// Collaborators the session core delegates to.
pub struct SessionDeps {
    /// Transfer engine receiving add, pause, and metadata requests.
    pub engine: Arc<dyn TorrentEngine>,
    /// Free-space query for save-path volumes.
    pub probe: Arc<dyn DiskSpaceProbe>,
    /// User-facing notification surface.
    pub notifier: Arc<dyn Notifier>,
    /// Interactive review surface for classified descriptors.
    pub review: Arc<dyn ReviewSink>,
    /// Metainfo decoder for torrent-file intake.
    pub decoder: Arc<dyn MetainfoDecoder>,
}

/// Point-in-time view of session counters and selection.
#[derive(Debug, Clone)]
pub struct SessionSnapshot {
    /// Handles currently selected, in no particular order.
    pub selected: Vec<TorrentHandle>,
    /// Visible torrent count.
    pub visible: u64,
    /// Hashes still awaiting metadata resolution.
    pub pending_metadata: usize,
}

/// Cloneable handle to the session reconciliation worker.
#[derive(Clone)]
pub struct SessionController {
    commands: mpsc::Sender<SessionMessage>,
}

impl SessionController {
    /// Spawn the reconciliation worker and return a handle to it.
    #[must_use]
    pub fn spawn(events: EventBus, settings: SettingsService, deps: SessionDeps) -> Self {
        let (commands, rx) = mpsc::channel(COMMAND_BUFFER);
        worker::spawn(events, settings, deps, rx);
        Self { commands }
    }

    /// Deliver an asynchronous engine event for reconciliation.
    ///
    /// # Errors
    ///
    /// Returns an error when the worker has stopped.
    pub async fn deliver_event(&self, event: SessionEvent) -> Result<()> {
        self.send_command(SessionMessage::Engine(event)).await
    }

    /// Run intake over torrent file paths and magnet URIs.
    ///
    /// Malformed inputs are skipped individually; the call succeeds as long
    /// as the worker accepted the batch.
    ///
    /// # Errors
    ///
    /// Returns an error when the worker has stopped.
    pub async fn intake(&self, files: Vec<PathBuf>, magnets: Vec<String>) -> Result<()> {
        self.send_command(SessionMessage::Intake { files, magnets })
            .await
    }

    /// Replace the tracked selection wholesale.
    ///
    /// # Errors
    ///
    /// Returns an error when the worker has stopped.
    pub async fn set_selection(&self, items: Vec<TorrentHandle>) -> Result<()> {
        self.send_command(SessionMessage::SetSelection { items })
            .await
    }

    /// Subscribe to the eventual metadata resolution of a hash-only torrent.
    ///
    /// # Errors
    ///
    /// Returns an error when the worker has stopped.
    pub async fn subscribe_metadata(
        &self,
        hash: InfoHash,
    ) -> Result<mpsc::UnboundedReceiver<TorrentInfo>> {
        let (respond_to, rx) = oneshot::channel();
        self.send_command(SessionMessage::SubscribeMetadata { hash, respond_to })
            .await?;
        rx.await
            .map_err(|err| anyhow!("metadata subscription response dropped: {err}"))
    }

    /// Query the current selection and counters.
    ///
    /// # Errors
    ///
    /// Returns an error when the worker has stopped.
    pub async fn snapshot(&self) -> Result<SessionSnapshot> {
        let (respond_to, rx) = oneshot::channel();
        self.send_command(SessionMessage::Snapshot { respond_to })
            .await?;
        rx.await
            .map_err(|err| anyhow!("snapshot response dropped: {err}"))
    }

    async fn send_command(&self, command: SessionMessage) -> Result<()> {
        self.commands
            .send(command)
            .await
            .map_err(|err| anyhow!("failed to enqueue session command: {err}"))
    }
}
