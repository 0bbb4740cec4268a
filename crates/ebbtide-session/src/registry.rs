//! Metadata-pending registry.
//!
//! Hash-only torrents wait here until the engine discovers their metainfo.
//! Interested parties (e.g. an open review surface) subscribe per hash and
//! receive the resolved description over an unbounded channel; resolution
//! fans out to every subscriber and clears the entry in the same step, so a
//! second resolution for the same hash is a no-op.

use std::collections::HashMap;

use ebbtide_events::InfoHash;
use ebbtide_torrent_core::TorrentInfo;
use tokio::sync::mpsc;

/// Pending-hash table with per-hash metadata subscribers.
#[derive(Debug, Default)]
pub struct MetadataRegistry {
    pending: HashMap<InfoHash, Vec<mpsc::UnboundedSender<TorrentInfo>>>,
}

impl MetadataRegistry {
    /// Mark hashes as awaiting metadata. Already-registered hashes keep
    /// their subscribers.
    pub fn register(&mut self, hashes: &[InfoHash]) {
        for hash in hashes {
            self.pending.entry(*hash).or_default();
        }
    }

    /// Subscribe to the eventual resolution of `hash`, registering it as
    /// pending if it was not already.
    ///
    /// Subscribing before or after [`register`](Self::register) is
    /// equivalent; only resolution order matters.
    pub fn subscribe(&mut self, hash: InfoHash) -> mpsc::UnboundedReceiver<TorrentInfo> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.pending.entry(hash).or_default().push(tx);
        rx
    }

    /// Deliver discovered metadata to every subscriber of `hash` and clear
    /// the entry. Returns whether the hash was registered; resolution of an
    /// unregistered hash is a silent no-op.
    pub fn resolve(&mut self, hash: InfoHash, info: &TorrentInfo) -> bool {
        match self.pending.remove(&hash) {
            Some(subscribers) => {
                for subscriber in subscribers {
                    // A dropped receiver just means that party lost interest.
                    let _ = subscriber.send(info.clone());
                }
                true
            }
            None => false,
        }
    }

    /// Drop a pending entry without resolving it; subscribers observe the
    /// closed channel. Returns whether an entry existed.
    pub fn remove(&mut self, hash: InfoHash) -> bool {
        self.pending.remove(&hash).is_some()
    }

    /// Whether `hash` is currently awaiting metadata.
    #[must_use]
    pub fn is_pending(&self, hash: InfoHash) -> bool {
        self.pending.contains_key(&hash)
    }

    /// Number of hashes awaiting metadata.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ebbtide_test_support::fixtures::hash;

    fn info(name: &str) -> TorrentInfo {
        TorrentInfo {
            name: name.to_string(),
            total_size: 7,
            files: Vec::new(),
        }
    }

    #[test]
    fn resolution_fans_out_to_all_subscribers_and_clears() {
        let mut registry = MetadataRegistry::default();
        registry.register(&[hash(1)]);
        let mut first = registry.subscribe(hash(1));
        let mut second = registry.subscribe(hash(1));

        assert!(registry.resolve(hash(1), &info("found")));
        assert_eq!(first.try_recv().expect("first delivery").name, "found");
        assert_eq!(second.try_recv().expect("second delivery").name, "found");

        assert!(!registry.is_pending(hash(1)));
        assert!(!registry.resolve(hash(1), &info("again")));
        assert!(first.try_recv().is_err());
    }

    #[test]
    fn subscribe_before_register_is_equivalent() {
        let mut registry = MetadataRegistry::default();
        let mut early = registry.subscribe(hash(2));
        registry.register(&[hash(2)]);

        assert!(registry.resolve(hash(2), &info("late")));
        assert_eq!(early.try_recv().expect("delivery").name, "late");
    }

    #[test]
    fn resolving_an_unregistered_hash_is_a_no_op() {
        let mut registry = MetadataRegistry::default();
        assert!(!registry.resolve(hash(3), &info("stray")));
        assert_eq!(registry.pending_count(), 0);
    }

    #[test]
    fn removal_closes_subscriber_channels() {
        let mut registry = MetadataRegistry::default();
        let mut subscriber = registry.subscribe(hash(4));

        assert!(registry.remove(hash(4)));
        assert!(!registry.remove(hash(4)));
        assert!(matches!(
            subscriber.try_recv(),
            Err(mpsc::error::TryRecvError::Disconnected)
        ));
    }

    #[test]
    fn register_keeps_existing_subscribers() {
        let mut registry = MetadataRegistry::default();
        let mut subscriber = registry.subscribe(hash(5));
        registry.register(&[hash(5), hash(6)]);
        assert_eq!(registry.pending_count(), 2);

        assert!(registry.resolve(hash(5), &info("kept")));
        assert_eq!(subscriber.try_recv().expect("delivery").name, "kept");
    }
}
