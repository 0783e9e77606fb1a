//! In-memory settings backend (no persistence)
//!
//! Useful for tests and for running without a database file. Everything is
//! lost on restart; alert toggles fall back to their all-off defaults and
//! monitoring stays unconfigured until set through the API.

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::config::{AlertToggles, MonitoringSettings};

use super::backend::SettingsBackend;
use super::error::SettingsResult;

#[derive(Debug, Default)]
pub struct MemoryBackend {
    monitoring: RwLock<Option<MonitoringSettings>>,
    toggles: RwLock<Option<AlertToggles>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SettingsBackend for MemoryBackend {
    async fn load_monitoring(&self) -> SettingsResult<Option<MonitoringSettings>> {
        Ok(self.monitoring.read().await.clone())
    }

    async fn store_monitoring(&self, settings: &MonitoringSettings) -> SettingsResult<()> {
        *self.monitoring.write().await = Some(settings.clone());
        Ok(())
    }

    async fn load_toggles(&self) -> SettingsResult<Option<AlertToggles>> {
        Ok(*self.toggles.read().await)
    }

    async fn store_toggles(&self, toggles: &AlertToggles) -> SettingsResult<()> {
        *self.toggles.write().await = Some(*toggles);
        Ok(())
    }

    async fn close(&self) -> SettingsResult<()> {
        debug!("closing in-memory settings backend (no-op)");
        Ok(())
    }
}
