use std::path::PathBuf;

use ebbtide_events::InfoHash;
use ebbtide_torrent_core::{SessionEvent, TorrentHandle, TorrentInfo};
use tokio::sync::{mpsc, oneshot};

use crate::SessionSnapshot;

/// Messages processed by the session reconciliation worker.
#[derive(Debug)]
pub(crate) enum SessionMessage {
    /// An asynchronous event reported by the engine-facing layer.
    Engine(SessionEvent),
    /// Raw intake inputs: torrent file paths and magnet URIs.
    Intake {
        files: Vec<PathBuf>,
        magnets: Vec<String>,
    },
    /// Replace the tracked selection wholesale.
    SetSelection { items: Vec<TorrentHandle> },
    /// Subscribe to metadata resolution for a hash-only torrent.
    SubscribeMetadata {
        hash: InfoHash,
        respond_to: oneshot::Sender<mpsc::UnboundedReceiver<TorrentInfo>>,
    },
    /// Query the current selection and counters.
    Snapshot {
        respond_to: oneshot::Sender<SessionSnapshot>,
    },
}
