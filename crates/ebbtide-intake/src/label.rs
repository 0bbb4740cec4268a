//! Ordered label matching.

use ebbtide_config::{Label, LabelId};
use regex::RegexBuilder;
use tracing::warn;

/// Result of matching a derived name against the ordered label set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelAssignment {
    /// Identifier of the matched label.
    pub label_id: LabelId,
    /// Save-path override, present only when the label's override is enabled
    /// and non-empty.
    pub save_path: Option<String>,
}

/// Evaluate labels in definition order and return the first match.
///
/// Patterns are case-insensitive regular-expression *searches*, not full
/// matches. Labels with disabled or empty patterns are skipped, as is every
/// label when the derived name is empty. A pattern that fails to compile is
/// logged and treated as a non-match so one bad rule cannot poison the pass.
#[must_use]
pub fn match_label(derived_name: &str, labels: &[Label]) -> Option<LabelAssignment> {
    if derived_name.is_empty() {
        return None;
    }

    for label in labels {
        if !label.apply_pattern_enabled {
            continue;
        }
        let Some(pattern) = label.apply_pattern.as_deref() else {
            continue;
        };
        if pattern.is_empty() {
            continue;
        }

        let regex = match RegexBuilder::new(pattern).case_insensitive(true).build() {
            Ok(regex) => regex,
            Err(err) => {
                warn!(
                    label_id = label.id,
                    pattern,
                    error = %err,
                    "label pattern failed to compile, treating as non-match"
                );
                continue;
            }
        };

        if regex.is_match(derived_name) {
            let save_path = label
                .save_path
                .as_deref()
                .filter(|path| label.save_path_enabled && !path.is_empty())
                .map(ToString::to_string);
            return Some(LabelAssignment {
                label_id: label.id,
                save_path,
            });
        }
    }

    None
}
