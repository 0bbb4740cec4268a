//! Selection and visible-count tracking.
//!
//! The tracker mirrors what a display layer considers "selected" so the
//! worker can route refreshed handles to only the torrents a detail view
//! actually shows. Selection is keyed by identity hash, never by handle
//! object: engine updates routinely recreate handle objects for the same
//! torrent.

use std::collections::HashMap;

use ebbtide_events::InfoHash;
use ebbtide_torrent_core::TorrentHandle;

/// What happened to the selection when a torrent was removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemovalOutcome {
    /// The removed torrent was part of the current selection.
    pub was_selected: bool,
    /// The selection is empty after the removal.
    pub selection_now_empty: bool,
}

/// Tracks the current selection and the visible torrent count.
#[derive(Debug, Default)]
pub struct SelectionTracker {
    selection: HashMap<InfoHash, TorrentHandle>,
    visible: u64,
}

impl SelectionTracker {
    /// Record a newly visible torrent; returns the updated visible count.
    pub fn on_added(&mut self) -> u64 {
        self.visible += 1;
        self.visible
    }

    /// Record a removal, dropping the torrent from the selection if present.
    pub fn on_removed(&mut self, hash: InfoHash) -> RemovalOutcome {
        self.visible = self.visible.saturating_sub(1);
        let was_selected = self.selection.remove(&hash).is_some();
        RemovalOutcome {
            was_selected,
            selection_now_empty: was_selected && self.selection.is_empty(),
        }
    }

    /// Fold a batch of refreshed handles into the selection.
    ///
    /// Handles for torrents not currently selected are ignored; for selected
    /// torrents the stored handle is replaced and the hash is reported back
    /// so the caller can request a targeted detail refresh.
    pub fn on_updated(&mut self, handles: &[TorrentHandle]) -> Vec<InfoHash> {
        let mut refreshed = Vec::new();
        for handle in handles {
            if self.selection.contains_key(&handle.info_hash) {
                self.selection.insert(handle.info_hash, handle.clone());
                refreshed.push(handle.info_hash);
            }
        }
        refreshed
    }

    /// Replace the selection wholesale.
    pub fn set_selection(&mut self, items: Vec<TorrentHandle>) {
        self.selection.clear();
        for handle in items {
            self.selection.insert(handle.info_hash, handle);
        }
    }

    /// Hashes currently selected, in no particular order.
    #[must_use]
    pub fn selected_hashes(&self) -> Vec<InfoHash> {
        self.selection.keys().copied().collect()
    }

    /// Handles currently selected, in no particular order.
    #[must_use]
    pub fn selected(&self) -> Vec<TorrentHandle> {
        self.selection.values().cloned().collect()
    }

    /// Whether nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.selection.is_empty()
    }

    /// Current visible torrent count.
    #[must_use]
    pub const fn visible(&self) -> u64 {
        self.visible
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ebbtide_events::TorrentState;
    use ebbtide_test_support::fixtures::{handle, hash};

    #[test]
    fn visible_count_tracks_adds_and_removes() {
        let mut tracker = SelectionTracker::default();
        assert_eq!(tracker.on_added(), 1);
        assert_eq!(tracker.on_added(), 2);
        tracker.on_removed(hash(1));
        assert_eq!(tracker.visible(), 1);

        // Never underflows, even on a spurious removal.
        tracker.on_removed(hash(2));
        tracker.on_removed(hash(3));
        assert_eq!(tracker.visible(), 0);
    }

    #[test]
    fn removing_the_only_selected_torrent_empties_the_selection() {
        let mut tracker = SelectionTracker::default();
        tracker.set_selection(vec![handle(1, "one", "/dl")]);

        let outcome = tracker.on_removed(hash(1));
        assert!(outcome.was_selected);
        assert!(outcome.selection_now_empty);
        assert!(tracker.is_empty());
    }

    #[test]
    fn removing_one_of_several_selected_keeps_the_rest() {
        let mut tracker = SelectionTracker::default();
        tracker.set_selection(vec![handle(1, "one", "/dl"), handle(2, "two", "/dl")]);

        let outcome = tracker.on_removed(hash(1));
        assert!(outcome.was_selected);
        assert!(!outcome.selection_now_empty);
        assert_eq!(tracker.selected_hashes(), vec![hash(2)]);
    }

    #[test]
    fn removing_an_unselected_torrent_leaves_the_selection_alone() {
        let mut tracker = SelectionTracker::default();
        tracker.set_selection(vec![handle(1, "one", "/dl")]);

        let outcome = tracker.on_removed(hash(9));
        assert!(!outcome.was_selected);
        assert!(!outcome.selection_now_empty);
        assert_eq!(tracker.selected().len(), 1);
    }

    #[test]
    fn updates_refresh_only_the_selected_subset() {
        let mut tracker = SelectionTracker::default();
        tracker.set_selection(vec![handle(1, "stale", "/dl")]);

        let mut fresh = handle(1, "fresh", "/dl");
        fresh.state = TorrentState::Seeding;
        let refreshed = tracker.on_updated(&[fresh, handle(2, "other", "/dl")]);

        assert_eq!(refreshed, vec![hash(1)]);
        let selected = tracker.selected();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].name, "fresh");
        assert_eq!(selected[0].state, TorrentState::Seeding);
    }

    #[test]
    fn set_selection_replaces_wholesale_and_deduplicates() {
        let mut tracker = SelectionTracker::default();
        tracker.set_selection(vec![handle(1, "one", "/dl")]);
        tracker.set_selection(vec![
            handle(2, "two", "/dl"),
            handle(2, "two again", "/dl"),
            handle(3, "three", "/dl"),
        ]);

        let mut hashes = tracker.selected_hashes();
        hashes.sort();
        assert_eq!(hashes, vec![hash(2), hash(3)]);

        tracker.set_selection(Vec::new());
        assert!(tracker.is_empty());
    }
}
