//! JSON settings loader.

use std::path::Path;

use tracing::warn;

use crate::error::{ConfigError, ConfigResult};
use crate::model::Settings;
use crate::validate::validate;

/// Read, parse, and validate a settings document from disk.
///
/// # Errors
///
/// Returns [`ConfigError::Read`] when the file is unreadable,
/// [`ConfigError::Parse`] for malformed JSON, and [`ConfigError::Invalid`]
/// when the document fails validation.
pub fn load_from_path(path: &Path) -> ConfigResult<Settings> {
    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read { source })?;
    let settings: Settings =
        serde_json::from_str(&raw).map_err(|source| ConfigError::Parse { source })?;
    validate(&settings)?;
    Ok(settings)
}

/// Load settings from disk, falling back to defaults when the file is absent
/// or rejected. The fallback is logged so a broken edit is not silently lost.
#[must_use]
pub fn load_or_default(path: &Path) -> Settings {
    match load_from_path(path) {
        Ok(settings) => settings,
        Err(err) => {
            warn!(
                path = %path.display(),
                error = %err,
                "settings unavailable, using defaults"
            );
            Settings::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let path = std::env::temp_dir().join("ebbtide-settings-missing.json");
        let settings = load_or_default(&path);
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn well_formed_document_round_trips() {
        let path = std::env::temp_dir().join("ebbtide-settings-loader-test.json");
        std::fs::write(
            &path,
            r#"{"default_save_path": "/srv/torrents", "skip_add_review": true}"#,
        )
        .expect("write fixture");

        let settings = load_from_path(&path).expect("load fixture");
        assert_eq!(settings.default_save_path, "/srv/torrents");
        assert!(settings.skip_add_review);

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn invalid_document_is_rejected() {
        let path = std::env::temp_dir().join("ebbtide-settings-invalid-test.json");
        std::fs::write(
            &path,
            r#"{"default_save_path": "/x", "disk_space": {"enabled": true, "percent": 250}}"#,
        )
        .expect("write fixture");

        assert!(matches!(
            load_from_path(&path),
            Err(ConfigError::Invalid { .. })
        ));

        let _ = std::fs::remove_file(&path);
    }
}
