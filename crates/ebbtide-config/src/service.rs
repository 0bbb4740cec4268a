//! In-process settings facade.
//!
//! The session and intake layers never hold live references into settings:
//! they call [`SettingsService::snapshot`] at the start of each operation and
//! work on the clone. Replacements are validated before they become visible,
//! and each accepted replacement bumps a revision observable through a watch
//! channel so long-lived tasks can re-read on change.

use std::sync::{Arc, RwLock};

use tokio::sync::watch;
use tracing::info;

use crate::error::ConfigResult;
use crate::model::Settings;
use crate::validate::validate;

/// Shared handle to the current settings document.
#[derive(Clone)]
pub struct SettingsService {
    current: Arc<RwLock<Settings>>,
    revision: Arc<watch::Sender<u64>>,
}

impl SettingsService {
    /// Wrap an initial settings document.
    ///
    /// # Errors
    ///
    /// Returns an error when the initial document fails validation.
    pub fn new(settings: Settings) -> ConfigResult<Self> {
        validate(&settings)?;
        let (revision, _) = watch::channel(0);
        Ok(Self {
            current: Arc::new(RwLock::new(settings)),
            revision: Arc::new(revision),
        })
    }

    /// Copy-on-read snapshot of the current settings.
    ///
    /// # Panics
    ///
    /// Panics if the settings lock has been poisoned.
    #[must_use]
    pub fn snapshot(&self) -> Settings {
        self.current.read().expect("settings lock poisoned").clone()
    }

    /// Replace the current settings wholesale.
    ///
    /// # Errors
    ///
    /// Returns an error when the replacement fails validation; the previous
    /// document stays in effect.
    ///
    /// # Panics
    ///
    /// Panics if the settings lock has been poisoned.
    pub fn replace(&self, settings: Settings) -> ConfigResult<()> {
        validate(&settings)?;
        {
            let mut guard = self.current.write().expect("settings lock poisoned");
            *guard = settings;
        }
        self.revision.send_modify(|rev| *rev += 1);
        info!(revision = *self.revision.borrow(), "settings replaced");
        Ok(())
    }

    /// Subscribe to revision bumps; receivers see the revision current at
    /// subscription time and every later accepted replacement.
    #[must_use]
    pub fn watch(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }
}

impl Default for SettingsService {
    fn default() -> Self {
        Self::new(Settings::default()).expect("default settings validate")
    }
}
