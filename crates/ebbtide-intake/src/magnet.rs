//! Magnet URI parsing ([BEP-9] exact topics, v1 and v2).
//!
//! Accepted `xt` forms: `urn:btih:` followed by 40-char hex or 32-char
//! BASE32 (v1), and `urn:btmh:` followed by a `1220`-prefixed sha-256
//! multihash in hex (v2). A link may carry both, yielding a hybrid identity.
//!
//! [BEP-9]: https://www.bittorrent.org/beps/bep_0009.html

use ebbtide_events::InfoHash;
use ebbtide_torrent_core::TorrentDescriptor;
use tracing::warn;

use crate::error::{IntakeError, IntakeResult};

const MAGNET_SCHEME: &str = "magnet:?";
const BTIH_PREFIX: &str = "urn:btih:";
const BTMH_PREFIX: &str = "urn:btmh:";
/// Multihash prefix for sha2-256 with a 32-byte digest.
const SHA256_MULTIHASH_PREFIX: &str = "1220";

/// Parsed magnet link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MagnetLink {
    /// Combined identity from the link's `xt` topics.
    pub info_hash: InfoHash,
    /// Percent-decoded `dn` display name, when present.
    pub display_name: Option<String>,
    /// Percent-decoded `tr` tracker URLs, in link order.
    pub trackers: Vec<String>,
}

impl MagnetLink {
    /// Parse a magnet URI.
    ///
    /// # Errors
    ///
    /// Returns [`IntakeError::NotMagnet`] for non-magnet input,
    /// [`IntakeError::InvalidHash`] when an `xt` topic carries undecodable
    /// hash text, and [`IntakeError::MissingHash`] when no usable topic is
    /// present.
    pub fn parse(uri: &str) -> IntakeResult<Self> {
        let query = uri
            .strip_prefix(MAGNET_SCHEME)
            .ok_or(IntakeError::NotMagnet)?;

        let mut info_hash = InfoHash::default();
        let mut display_name = None;
        let mut trackers = Vec::new();

        for pair in query.split('&') {
            let Some((key, value)) = pair.split_once('=') else {
                continue;
            };

            match key {
                "xt" => {
                    if let Some(text) = value.strip_prefix(BTIH_PREFIX) {
                        let parsed: InfoHash = text.parse()?;
                        info_hash.v1 = parsed.v1.or(info_hash.v1);
                        info_hash.v2 = parsed.v2.or(info_hash.v2);
                    } else if let Some(multihash) = value.strip_prefix(BTMH_PREFIX) {
                        let digest = multihash
                            .strip_prefix(SHA256_MULTIHASH_PREFIX)
                            .ok_or(IntakeError::MissingHash)?;
                        let parsed: InfoHash = digest.parse()?;
                        info_hash.v2 = parsed.v2.or(info_hash.v2);
                    }
                    // Other exact-topic URNs are ignored.
                }
                "dn" => {
                    display_name = decode_component(value);
                }
                "tr" => {
                    if let Some(tracker) = decode_component(value) {
                        trackers.push(tracker);
                    }
                }
                _ => {}
            }
        }

        if !info_hash.has_concrete() {
            return Err(IntakeError::MissingHash);
        }

        Ok(Self {
            info_hash,
            display_name,
            trackers,
        })
    }
}

/// Percent-decode a query component, treating `+` as a space.
fn decode_component(value: &str) -> Option<String> {
    urlencoding::decode(&value.replace('+', " "))
        .map(|decoded| decoded.into_owned())
        .ok()
}

/// Build a descriptor from a single magnet link.
///
/// # Errors
///
/// Propagates [`MagnetLink::parse`] failures.
pub fn descriptor_from_magnet(uri: &str) -> IntakeResult<TorrentDescriptor> {
    let link = MagnetLink::parse(uri)?;
    Ok(TorrentDescriptor {
        info_hash: link.info_hash,
        name: link.display_name,
        trackers: link.trackers,
        ..TorrentDescriptor::default()
    })
}

/// Build descriptors from a batch of magnet links, skipping malformed
/// entries individually.
#[must_use]
pub fn descriptors_from_magnets(links: &[String]) -> Vec<TorrentDescriptor> {
    let mut descriptors = Vec::new();
    for link in links {
        match descriptor_from_magnet(link) {
            Ok(descriptor) => descriptors.push(descriptor),
            Err(err) => {
                warn!(magnet = %link, error = %err, "failed to parse magnet uri");
            }
        }
    }
    descriptors
}
