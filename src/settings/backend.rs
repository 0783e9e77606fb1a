//! Settings backend trait definition

use async_trait::async_trait;

use crate::config::{AlertToggles, MonitoringSettings};

use super::error::SettingsResult;

/// Persistence contract for the two settings documents.
///
/// The store holds at most one monitoring settings document and one set of
/// alert toggles; `load_*` returns `None` when a document was never written.
/// Implementations must be `Send + Sync`, they are shared between the
/// monitor task and the API handlers.
#[async_trait]
pub trait SettingsBackend: Send + Sync {
    async fn load_monitoring(&self) -> SettingsResult<Option<MonitoringSettings>>;

    async fn store_monitoring(&self, settings: &MonitoringSettings) -> SettingsResult<()>;

    async fn load_toggles(&self) -> SettingsResult<Option<AlertToggles>>;

    async fn store_toggles(&self, toggles: &AlertToggles) -> SettingsResult<()>;

    /// Release connections or other resources held by the backend.
    async fn close(&self) -> SettingsResult<()>;
}
