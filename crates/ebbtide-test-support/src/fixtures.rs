//! Builders for commonly used test values.

use ebbtide_config::Label;
use ebbtide_events::{InfoHash, TorrentState};
use ebbtide_torrent_core::{TorrentDescriptor, TorrentHandle};

/// A concrete v1 hash filled with `byte`.
#[must_use]
pub fn hash(byte: u8) -> InfoHash {
    InfoHash::from_v1([byte; 20])
}

/// A downloading handle with the given identity and name.
#[must_use]
pub fn handle(byte: u8, name: &str, save_path: &str) -> TorrentHandle {
    TorrentHandle {
        info_hash: hash(byte),
        name: name.to_string(),
        save_path: save_path.to_string(),
        state: TorrentState::Downloading,
    }
}

/// A metadata-pending descriptor (concrete hash, no metainfo).
#[must_use]
pub fn pending_descriptor(byte: u8, name: &str) -> TorrentDescriptor {
    TorrentDescriptor {
        info_hash: hash(byte),
        name: Some(name.to_string()),
        ..TorrentDescriptor::default()
    }
}

/// A label with an enabled pattern and optional enabled save-path override.
#[must_use]
pub fn label(id: i32, pattern: &str, save_path: Option<&str>) -> Label {
    Label {
        id,
        name: format!("label-{id}"),
        color: String::new(),
        save_path: save_path.map(ToString::to_string),
        save_path_enabled: save_path.is_some(),
        apply_pattern: Some(pattern.to_string()),
        apply_pattern_enabled: true,
    }
}
