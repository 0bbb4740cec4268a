//! Torrent-file intake.
//!
//! Metainfo decoding is delegated to the engine-facing collaborator through
//! [`MetainfoDecoder`]; this module only owns the read-and-skip policy.

use std::path::{Path, PathBuf};

use ebbtide_events::InfoHash;
use ebbtide_torrent_core::{TorrentDescriptor, TorrentInfo};
use tracing::warn;

/// Decodes raw `.torrent` bytes into a resolved description.
pub trait MetainfoDecoder: Send + Sync {
    /// Decode bencoded metainfo bytes.
    ///
    /// # Errors
    ///
    /// Returns an error for malformed payloads; the caller skips that file.
    fn decode(&self, bytes: &[u8]) -> anyhow::Result<DecodedMetainfo>;
}

/// Decoded metainfo: the torrent's identity plus its full description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedMetainfo {
    /// Identity hashes computed from the info dictionary.
    pub info_hash: InfoHash,
    /// The resolved description.
    pub info: TorrentInfo,
}

/// Build descriptors from torrent files on disk, skipping unreadable or
/// malformed files individually.
#[must_use]
pub fn descriptors_from_files(
    decoder: &dyn MetainfoDecoder,
    paths: &[PathBuf],
) -> Vec<TorrentDescriptor> {
    let mut descriptors = Vec::new();
    for path in paths {
        if let Some(descriptor) = descriptor_from_file(decoder, path) {
            descriptors.push(descriptor);
        }
    }
    descriptors
}

fn descriptor_from_file(decoder: &dyn MetainfoDecoder, path: &Path) -> Option<TorrentDescriptor> {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) => {
            warn!(path = %path.display(), error = %err, "failed to read torrent file");
            return None;
        }
    };

    match decoder.decode(&bytes) {
        Ok(decoded) => Some(TorrentDescriptor {
            info_hash: decoded.info_hash,
            metainfo: Some(decoded.info),
            ..TorrentDescriptor::default()
        }),
        Err(err) => {
            warn!(path = %path.display(), error = %err, "failed to parse torrent file");
            None
        }
    }
}
