//! Alert toggle endpoints

use axum::{Json, extract::State};
use serde_json::{Value, json};
use tracing::info;

use crate::api::{error::ApiResult, state::ApiState, types::AlertTogglesPatch};
use crate::config::AlertToggles;

/// GET /api/v1/alerts
///
/// Return the per-resource alert toggles. The first read persists the
/// default row so the dashboard always has something to edit.
pub async fn get_alert_toggles(State(state): State<ApiState>) -> ApiResult<Json<AlertToggles>> {
    let toggles = state.store.ensure_alert_toggles().await?;
    Ok(Json(toggles))
}

/// PUT /api/v1/alerts
///
/// Partial update: fields absent from the body keep their stored value.
pub async fn update_alert_toggles(
    State(state): State<ApiState>,
    Json(patch): Json<AlertTogglesPatch>,
) -> ApiResult<Json<Value>> {
    let current = state.store.ensure_alert_toggles().await?;
    let merged = patch.apply(current);

    state.store.update_alert_toggles(&merged).await?;
    info!(
        "alert toggles updated: cpu={} ram={} disk={}",
        merged.cpu, merged.ram, merged.disk
    );

    Ok(Json(json!({ "status": "updated" })))
}
