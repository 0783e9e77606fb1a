//! API shared state

use crate::settings::SettingsStore;

/// Shared state passed to all API handlers
///
/// The store is the only collaborator the handlers need: the status view
/// builds its own request-scoped cluster client from whatever settings are
/// current, and writes through the store become visible to the monitor on
/// its next cycle.
#[derive(Clone)]
pub struct ApiState {
    /// Handle to the settings store backing the settings and alert routes
    pub store: SettingsStore,
}

impl ApiState {
    pub fn new(store: SettingsStore) -> Self {
        Self { store }
    }
}
