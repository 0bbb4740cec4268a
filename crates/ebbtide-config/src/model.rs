//! Typed settings models consumed by the intake and session layers.
//!
//! # Design
//! - Pure data carriers; no IO here.
//! - The core only ever sees clones of these records, never live references,
//!   so a settings edit cannot be observed half-way through a batch.

use serde::{Deserialize, Serialize};

/// Stable identifier assigned to a user-defined label.
pub type LabelId = i32;

/// A user-defined classification applied to incoming torrents.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Label {
    /// Stable identifier, unique within the label set.
    pub id: LabelId,
    /// Display name shown in list views and menus.
    pub name: String,
    /// Display colour (CSS-style hex string).
    #[serde(default)]
    pub color: String,
    /// Optional save-path override applied when this label matches.
    #[serde(default)]
    pub save_path: Option<String>,
    /// Whether the save-path override is active.
    #[serde(default)]
    pub save_path_enabled: bool,
    /// Optional name pattern used for automatic assignment.
    #[serde(default)]
    pub apply_pattern: Option<String>,
    /// Whether automatic assignment is active for this label.
    #[serde(default)]
    pub apply_pattern_enabled: bool,
}

/// Low disk-space guard configuration.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DiskSpaceLimit {
    /// Whether the guard runs at all.
    #[serde(default)]
    pub enabled: bool,
    /// Percentage of free space (0-100) below which torrents are paused.
    #[serde(default = "default_disk_space_percent")]
    pub percent: u8,
}

impl Default for DiskSpaceLimit {
    fn default() -> Self {
        Self {
            enabled: false,
            percent: default_disk_space_percent(),
        }
    }
}

const fn default_disk_space_percent() -> u8 {
    5
}

/// Full settings snapshot read by the core once per operation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Settings {
    /// Directory newly added torrents download into unless overridden.
    pub default_save_path: String,
    /// When set, classified descriptors bypass interactive review and are
    /// submitted to the engine directly.
    #[serde(default)]
    pub skip_add_review: bool,
    /// Whether list rows are tinted with the assigned label colour.
    #[serde(default)]
    pub use_label_color: bool,
    /// Low disk-space guard configuration.
    #[serde(default)]
    pub disk_space: DiskSpaceLimit,
    /// Ordered label set; evaluation order is definition order.
    #[serde(default)]
    pub labels: Vec<Label>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_save_path: "downloads".to_string(),
            skip_add_review: false,
            use_label_color: false,
            disk_space: DiskSpaceLimit::default(),
            labels: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_fields_fall_back_to_defaults() {
        let settings: Settings =
            serde_json::from_str(r#"{"default_save_path": "/data"}"#).expect("minimal settings");
        assert_eq!(settings.default_save_path, "/data");
        assert!(!settings.skip_add_review);
        assert!(!settings.disk_space.enabled);
        assert_eq!(settings.disk_space.percent, 5);
        assert!(settings.labels.is_empty());
    }

    #[test]
    fn label_defaults_keep_overrides_disabled() {
        let label: Label =
            serde_json::from_str(r#"{"id": 1, "name": "linux"}"#).expect("minimal label");
        assert!(!label.save_path_enabled);
        assert!(!label.apply_pattern_enabled);
        assert!(label.apply_pattern.is_none());
    }
}
