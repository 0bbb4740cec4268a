//! Display-facing event bus for the Ebbtide core.
//!
//! The reconciliation worker publishes typed signals here instead of calling
//! into any display technology: selection changes, detail-refresh subsets,
//! torrent counts, and transfer-rate aggregates all arrive as bus events with
//! sequential identifiers. Internally the bus uses `tokio::broadcast` with a
//! bounded replay ring so a display attaching late (or reattaching) can catch
//! up on recent signals; on overflow the oldest events are dropped.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use tokio::sync::broadcast;
use tokio::sync::broadcast::{Receiver, Sender};

pub mod hash;

pub use hash::{HashParseError, InfoHash};

/// Identifier assigned to each event emitted by the core.
pub type EventId = u64;

/// Default buffer size for the in-memory replay ring.
const DEFAULT_REPLAY_CAPACITY: usize = 1_024;

/// Typed display-layer signals surfaced by the reconciliation worker.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// A torrent became visible in the session.
    TorrentAdded { hash: InfoHash, name: String },
    /// A torrent left the session.
    TorrentRemoved { hash: InfoHash },
    /// The visible torrent count changed.
    TorrentCount { visible: u64 },
    /// The user selection was replaced; carries the selected hashes.
    SelectionChanged { hashes: Vec<InfoHash> },
    /// The selection is now empty and any detail view should clear.
    SelectionReset,
    /// Selected torrents received fresh handles; refresh only this subset.
    DetailRefresh { hashes: Vec<InfoHash> },
    /// Aggregate payload transfer rates from the periodic statistics tick.
    TransferRates { download_bps: u64, upload_bps: u64 },
    /// Metadata for a previously hash-only torrent was discovered.
    MetadataFound { hash: InfoHash },
    /// A torrent was paused because free space fell under the limit.
    LowDiskSpace { hash: InfoHash, name: String },
}

impl Event {
    /// Machine-friendly discriminator for stream consumers.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Event::TorrentAdded { .. } => "torrent_added",
            Event::TorrentRemoved { .. } => "torrent_removed",
            Event::TorrentCount { .. } => "torrent_count",
            Event::SelectionChanged { .. } => "selection_changed",
            Event::SelectionReset => "selection_reset",
            Event::DetailRefresh { .. } => "detail_refresh",
            Event::TransferRates { .. } => "transfer_rates",
            Event::MetadataFound { .. } => "metadata_found",
            Event::LowDiskSpace { .. } => "low_disk_space",
        }
    }
}

/// Metadata wrapper around events. Each envelope tracks the event id and
/// emission timestamp.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq)]
pub struct EventEnvelope {
    pub id: EventId,
    pub timestamp: DateTime<Utc>,
    pub event: Event,
}

/// High-level torrent states reported by engine handles.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum TorrentState {
    Queued,
    FetchingMetadata,
    Checking,
    Downloading,
    Seeding,
    Completed,
    Paused,
    Failed { message: String },
}

/// Shared event bus built on top of `tokio::broadcast`.
#[derive(Clone)]
pub struct EventBus {
    sender: Sender<EventEnvelope>,
    buffer: Arc<Mutex<VecDeque<EventEnvelope>>>,
    next_id: Arc<std::sync::atomic::AtomicU64>,
    replay_capacity: usize,
}

impl EventBus {
    /// Construct a new bus with the provided broadcast capacity.
    ///
    /// The broadcast channel uses the same capacity as the in-memory replay
    /// buffer, ensuring dropped events impact both structures consistently.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        assert!(capacity > 0, "event bus capacity must be positive");
        let (sender, _) = broadcast::channel(capacity);
        Self {
            sender,
            buffer: Arc::new(Mutex::new(VecDeque::with_capacity(capacity))),
            next_id: Arc::new(std::sync::atomic::AtomicU64::new(1)),
            replay_capacity: capacity,
        }
    }

    /// Construct a bus with the default in-memory buffer size.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_REPLAY_CAPACITY)
    }

    /// Publish a new event to the bus, assigning it a sequential identifier.
    ///
    /// # Panics
    ///
    /// Panics if the replay buffer mutex has been poisoned.
    pub fn publish(&self, event: Event) -> EventId {
        let id = self
            .next_id
            .fetch_add(1, std::sync::atomic::Ordering::Relaxed);
        let envelope = EventEnvelope {
            id,
            timestamp: Utc::now(),
            event,
        };

        {
            let mut buffer = self.buffer.lock().expect("event buffer mutex poisoned");
            if buffer.len() == self.replay_capacity {
                buffer.pop_front();
            }
            buffer.push_back(envelope.clone());
        }

        let _ = self.sender.send(envelope);
        id
    }

    /// Subscribe to the bus, replaying any buffered events newer than `since_id`.
    ///
    /// # Panics
    ///
    /// Panics if the replay buffer mutex has been poisoned.
    #[must_use]
    pub fn subscribe(&self, since_id: Option<EventId>) -> EventStream {
        let mut backlog = VecDeque::new();
        if let Some(since) = since_id {
            let buffer = self.buffer.lock().expect("event buffer mutex poisoned");
            for item in buffer.iter() {
                if item.id > since {
                    backlog.push_back(item.clone());
                }
            }
        }

        let receiver = self.sender.subscribe();
        EventStream { backlog, receiver }
    }

    /// Returns the last assigned identifier, if any events have been published.
    ///
    /// # Panics
    ///
    /// Panics if the replay buffer mutex has been poisoned.
    #[must_use]
    pub fn last_event_id(&self) -> Option<EventId> {
        let buffer = self.buffer.lock().expect("event buffer mutex poisoned");
        buffer.back().map(|event| event.id)
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

/// Stream wrapper that yields events either from the replay backlog or from the
/// live broadcast channel.
pub struct EventStream {
    backlog: VecDeque<EventEnvelope>,
    receiver: Receiver<EventEnvelope>,
}

impl EventStream {
    /// Receive the next event, respecting the replay backlog first.
    pub async fn next(&mut self) -> Option<EventEnvelope> {
        if let Some(event) = self.backlog.pop_front() {
            return Some(event);
        }

        match self.receiver.recv().await {
            Ok(event) => Some(event),
            Err(broadcast::error::RecvError::Lagged(_)) => self.receiver.recv().await.ok(),
            Err(broadcast::error::RecvError::Closed) => None,
        }
    }
}
