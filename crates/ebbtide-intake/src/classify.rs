//! Intake classification: defaults, label routing, metadata-pending split.

use ebbtide_config::Settings;
use ebbtide_events::InfoHash;
use ebbtide_torrent_core::TorrentDescriptor;
use tracing::debug;

use crate::label::match_label;

/// Output of a classification pass.
#[derive(Debug, Clone, Default)]
pub struct Classification {
    /// Every input descriptor, in input order, with defaults and label
    /// routing applied.
    pub ready: Vec<TorrentDescriptor>,
    /// Hashes still awaiting engine-side metadata resolution, in input
    /// order. Duplicates across input entries are preserved.
    pub pending: Vec<InfoHash>,
}

impl Classification {
    /// Whether the pass produced nothing to act on.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ready.is_empty() && self.pending.is_empty()
    }
}

/// Classify a descriptor batch against a settings snapshot.
///
/// Every descriptor gets the configured default save path (unless a matched
/// label overrides it) and the duplicate-is-error admission flag; duplicate
/// detection itself stays with the engine. A descriptor with a concrete hash
/// and no resolved metainfo contributes its hash to `pending` but still
/// appears in `ready` — metadata resolution runs in parallel with the add
/// attempt or interactive review.
#[must_use]
pub fn classify(batch: Vec<TorrentDescriptor>, settings: &Settings) -> Classification {
    let mut classification = Classification::default();

    for mut descriptor in batch {
        descriptor.flags.duplicate_is_error = true;
        descriptor.save_path = Some(settings.default_save_path.clone());

        if let Some(assignment) = match_label(descriptor.derived_name(), &settings.labels) {
            debug!(
                label_id = assignment.label_id,
                name = descriptor.derived_name(),
                "label matched during intake"
            );
            descriptor.label_id = Some(assignment.label_id);
            if let Some(save_path) = assignment.save_path {
                descriptor.save_path = Some(save_path);
            }
        }

        if descriptor.is_metadata_pending() {
            classification.pending.push(descriptor.info_hash);
        }

        classification.ready.push(descriptor);
    }

    classification
}

#[cfg(test)]
mod tests {
    use super::*;
    use ebbtide_config::Label;
    use ebbtide_torrent_core::TorrentInfo;

    fn concrete(byte: u8) -> InfoHash {
        InfoHash::from_v1([byte; 20])
    }

    fn settings_with_label(pattern: &str, save_path: &str) -> Settings {
        Settings {
            default_save_path: "/downloads".to_string(),
            labels: vec![Label {
                id: 1,
                name: "iso".to_string(),
                color: String::new(),
                save_path: Some(save_path.to_string()),
                save_path_enabled: true,
                apply_pattern: Some(pattern.to_string()),
                apply_pattern_enabled: true,
            }],
            ..Settings::default()
        }
    }

    #[test]
    fn pending_magnet_gets_label_save_path_and_pending_entry() {
        let settings = settings_with_label("ubuntu", "/iso");
        let batch = vec![TorrentDescriptor {
            info_hash: concrete(1),
            name: Some("Ubuntu.ISO".to_string()),
            ..TorrentDescriptor::default()
        }];

        let classification = classify(batch, &settings);
        assert_eq!(classification.ready.len(), 1);
        assert_eq!(classification.ready[0].save_path.as_deref(), Some("/iso"));
        assert_eq!(classification.ready[0].label_id, Some(1));
        assert_eq!(classification.pending, vec![concrete(1)]);
        assert!(classification.ready[0].flags.duplicate_is_error);
    }

    #[test]
    fn unmatched_descriptor_keeps_default_save_path() {
        let settings = settings_with_label("ubuntu", "/iso");
        let batch = vec![TorrentDescriptor {
            info_hash: concrete(2),
            name: Some("debian.iso".to_string()),
            ..TorrentDescriptor::default()
        }];

        let classification = classify(batch, &settings);
        assert_eq!(
            classification.ready[0].save_path.as_deref(),
            Some("/downloads")
        );
        assert!(classification.ready[0].label_id.is_none());
    }

    #[test]
    fn resolved_descriptor_never_appears_in_pending() {
        let settings = Settings::default();
        let batch = vec![TorrentDescriptor {
            info_hash: concrete(3),
            metainfo: Some(TorrentInfo {
                name: "resolved".to_string(),
                total_size: 42,
                files: Vec::new(),
            }),
            ..TorrentDescriptor::default()
        }];

        let classification = classify(batch, &settings);
        assert_eq!(classification.ready.len(), 1);
        assert!(classification.pending.is_empty());
    }

    #[test]
    fn order_and_duplicates_are_preserved() {
        let settings = Settings::default();
        let batch = vec![
            TorrentDescriptor {
                info_hash: concrete(4),
                ..TorrentDescriptor::default()
            },
            TorrentDescriptor {
                info_hash: concrete(5),
                ..TorrentDescriptor::default()
            },
            TorrentDescriptor {
                info_hash: concrete(4),
                ..TorrentDescriptor::default()
            },
        ];

        let classification = classify(batch, &settings);
        assert_eq!(classification.ready.len(), 3);
        assert_eq!(
            classification.pending,
            vec![concrete(4), concrete(5), concrete(4)]
        );
    }

    #[test]
    fn empty_batch_is_a_no_op() {
        let classification = classify(Vec::new(), &Settings::default());
        assert!(classification.is_empty());
    }
}
