//! Persistent settings store shared by the monitor loop and the API.
//!
//! The store holds two independent documents: the monitoring settings
//! (cluster endpoint, thresholds, channel credentials) and the alert
//! toggles. The monitor reads a fresh snapshot of both at the start of
//! every cycle; the API reads and writes them on demand. Backends are
//! swappable through the [`SettingsBackend`] trait.

pub mod backend;
pub mod error;
pub mod memory;
#[cfg(feature = "settings-sqlite")]
pub mod sqlite;

use std::sync::Arc;

use tracing::debug;

use crate::config::{AlertToggles, MonitoringSettings};

pub use backend::SettingsBackend;
pub use error::{SettingsError, SettingsResult};
pub use memory::MemoryBackend;
#[cfg(feature = "settings-sqlite")]
pub use sqlite::SqliteBackend;

/// Cloneable handle to the settings backend.
///
/// Never-written documents read as their defaults: an unconfigured
/// monitoring document and all-off toggles.
#[derive(Clone)]
pub struct SettingsStore {
    backend: Arc<dyn SettingsBackend>,
}

impl SettingsStore {
    pub fn new(backend: Arc<dyn SettingsBackend>) -> Self {
        Self { backend }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryBackend::new()))
    }

    /// Current monitoring settings, or the default document if none was
    /// ever stored.
    pub async fn monitoring_settings(&self) -> SettingsResult<MonitoringSettings> {
        Ok(self.backend.load_monitoring().await?.unwrap_or_default())
    }

    /// Like [`Self::monitoring_settings`], but persists the default
    /// document on first read so later readers see a stored row.
    pub async fn ensure_monitoring_settings(&self) -> SettingsResult<MonitoringSettings> {
        match self.backend.load_monitoring().await? {
            Some(settings) => Ok(settings),
            None => {
                debug!("no monitoring settings stored yet, persisting defaults");
                let defaults = MonitoringSettings::default();
                self.backend.store_monitoring(&defaults).await?;
                Ok(defaults)
            }
        }
    }

    pub async fn update_monitoring_settings(
        &self,
        settings: &MonitoringSettings,
    ) -> SettingsResult<()> {
        self.backend.store_monitoring(settings).await
    }

    /// Current alert toggles, defaulting to all-off. Does not write.
    pub async fn alert_toggles(&self) -> SettingsResult<AlertToggles> {
        Ok(self.backend.load_toggles().await?.unwrap_or_default())
    }

    /// Like [`Self::alert_toggles`], but persists the defaults on first
    /// read.
    pub async fn ensure_alert_toggles(&self) -> SettingsResult<AlertToggles> {
        match self.backend.load_toggles().await? {
            Some(toggles) => Ok(toggles),
            None => {
                debug!("no alert toggles stored yet, persisting defaults");
                let defaults = AlertToggles::default();
                self.backend.store_toggles(&defaults).await?;
                Ok(defaults)
            }
        }
    }

    pub async fn update_alert_toggles(&self, toggles: &AlertToggles) -> SettingsResult<()> {
        self.backend.store_toggles(toggles).await
    }

    pub async fn close(&self) -> SettingsResult<()> {
        self.backend.close().await
    }
}
