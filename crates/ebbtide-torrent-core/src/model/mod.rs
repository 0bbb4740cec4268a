//! Core torrent domain types shared across the workspace.

use ebbtide_events::{InfoHash, TorrentState};
use serde::{Deserialize, Serialize};

/// Resolved torrent description (the metainfo payload, already decoded).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TorrentInfo {
    /// Name embedded in the metainfo.
    pub name: String,
    /// Total payload size in bytes.
    pub total_size: u64,
    /// Relative file paths within the payload, when known.
    #[serde(default)]
    pub files: Vec<String>,
}

/// Engine-specific admission flags attached to a descriptor.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct AddFlags {
    /// Treat re-adding an already-present torrent as an engine error rather
    /// than silently ignoring the request.
    #[serde(default)]
    pub duplicate_is_error: bool,
    /// Admit the torrent in a paused state.
    #[serde(default)]
    pub start_paused: bool,
    /// Download pieces sequentially.
    #[serde(default)]
    pub sequential: bool,
}

/// A pending add-torrent request, before submission to the engine.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TorrentDescriptor {
    /// Identity hashes; either digest may be absent or a placeholder.
    pub info_hash: InfoHash,
    /// Resolved description when the full metainfo is already known.
    pub metainfo: Option<TorrentInfo>,
    /// Display name declared by the source (e.g. a magnet `dn` parameter).
    pub name: Option<String>,
    /// Target save path; filled with the configured default during intake.
    pub save_path: Option<String>,
    /// Tracker URLs supplied by the source.
    #[serde(default)]
    pub trackers: Vec<String>,
    /// Engine admission flags.
    #[serde(default)]
    pub flags: AddFlags,
    /// Matched label identifier. Display metadata only; never forwarded to
    /// the engine as part of the add request.
    pub label_id: Option<i32>,
}

impl TorrentDescriptor {
    /// Name used for pattern matching: the explicit name when present, else
    /// the metainfo name, else empty.
    #[must_use]
    pub fn derived_name(&self) -> &str {
        if let Some(name) = self.name.as_deref()
            && !name.is_empty()
        {
            return name;
        }
        self.metainfo.as_ref().map_or("", |info| info.name.as_str())
    }

    /// Whether the descriptor carries a full description.
    #[must_use]
    pub const fn is_resolved(&self) -> bool {
        self.metainfo.is_some()
    }

    /// Whether the descriptor is known only by a concrete hash and must wait
    /// for the engine to discover its metadata.
    #[must_use]
    pub fn is_metadata_pending(&self) -> bool {
        !self.is_resolved() && self.info_hash.has_concrete()
    }
}

/// Live snapshot of a torrent known to the engine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TorrentHandle {
    /// Identity hashes.
    pub info_hash: InfoHash,
    /// Current display name.
    pub name: String,
    /// Directory the torrent downloads into.
    pub save_path: String,
    /// Current lifecycle state.
    pub state: TorrentState,
}

/// Aggregate session statistics from the periodic engine tick.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct SessionStats {
    /// Current payload download rate in bytes per second.
    pub payload_download_rate: u64,
    /// Current payload upload rate in bytes per second.
    pub payload_upload_rate: u64,
    /// DHT nodes known to the engine.
    pub dht_nodes: i64,
    /// Total bytes wanted across downloading torrents.
    pub total_wanted: u64,
    /// Bytes already obtained towards `total_wanted`.
    pub total_wanted_done: u64,
    /// Whether any torrent is actively downloading.
    pub is_downloading_any: bool,
}

/// Asynchronous events delivered by the engine-facing layer.
///
/// The engine may produce these from worker threads; the session controller
/// marshals them onto the single reconciliation task before they touch any
/// state.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    /// A torrent was admitted into the engine.
    Added {
        /// Snapshot of the new torrent.
        handle: TorrentHandle,
    },
    /// A torrent was removed from the engine.
    Removed {
        /// Identity of the removed torrent.
        hash: InfoHash,
    },
    /// A batch of torrents received updated snapshots.
    Updated {
        /// Fresh handles; these may be recreated objects for known torrents.
        handles: Vec<TorrentHandle>,
    },
    /// Periodic aggregate statistics tick.
    Stats {
        /// Aggregate counters.
        stats: SessionStats,
    },
    /// Metadata became available for a hash-only torrent.
    MetadataFound {
        /// Identity the metadata belongs to.
        hash: InfoHash,
        /// The discovered description.
        info: TorrentInfo,
    },
}

/// Free/total byte counts for a save-path volume.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct DiskUsage {
    /// Bytes available to the calling process.
    pub free_bytes: u64,
    /// Total bytes on the volume; zero means the probe could not tell.
    pub total_bytes: u64,
}
