//! Validation helpers applied before a settings document is accepted.
//!
//! Label patterns are deliberately not compiled here: the matcher tolerates
//! invalid patterns at evaluation time, and a bad pattern must not block
//! unrelated settings from taking effect.

use std::collections::HashSet;

use crate::error::{ConfigError, ConfigResult};
use crate::model::Settings;

/// Check a settings document for structural problems.
///
/// # Errors
///
/// Returns [`ConfigError::Invalid`] when the default save path is empty, the
/// disk-space percentage exceeds 100, or two labels share an identifier.
pub fn validate(settings: &Settings) -> ConfigResult<()> {
    if settings.default_save_path.trim().is_empty() {
        return Err(ConfigError::Invalid {
            reason: "default_save_path must not be empty".to_string(),
        });
    }

    if settings.disk_space.percent > 100 {
        return Err(ConfigError::Invalid {
            reason: format!(
                "disk_space.percent must be 0-100, got {}",
                settings.disk_space.percent
            ),
        });
    }

    let mut seen = HashSet::new();
    for label in &settings.labels {
        if !seen.insert(label.id) {
            return Err(ConfigError::Invalid {
                reason: format!("duplicate label id {}", label.id),
            });
        }
    }

    Ok(())
}
