//! Monitoring settings endpoints
//!
//! Besides the read/write pair, the settings page offers connection tests
//! that exercise the real cluster client and channel senders with the
//! credentials from the request body, before anything is stored.

use axum::{Json, extract::State};
use serde_json::{Value, json};
use tracing::info;

use crate::api::{
    error::{ApiError, ApiResult},
    state::ApiState,
};
use crate::channels::{ChannelSender, DiscordSender, TelegramSender};
use crate::config::{DiscordSettings, MonitoringSettings, ProxmoxSettings, TelegramSettings};
use crate::proxmox::ProxmoxClient;

const TEST_MESSAGE: &str = "✅ Test message: alerts will arrive in this channel";

/// GET /api/v1/settings
///
/// Return the full monitoring settings. The first read persists the default
/// document so later partial edits have a base to land on.
pub async fn get_settings(State(state): State<ApiState>) -> ApiResult<Json<MonitoringSettings>> {
    let settings = state.store.ensure_monitoring_settings().await?;
    Ok(Json(settings))
}

/// PUT /api/v1/settings
///
/// Validate and store a full settings document. Takes effect on the next
/// monitoring cycle; the running cycle keeps its snapshot.
pub async fn update_settings(
    State(state): State<ApiState>,
    Json(settings): Json<MonitoringSettings>,
) -> ApiResult<Json<Value>> {
    settings.validate().map_err(ApiError::InvalidRequest)?;

    state.store.update_monitoring_settings(&settings).await?;
    info!("monitoring settings updated");

    Ok(Json(json!({ "status": "updated" })))
}

/// POST /api/v1/settings/test/proxmox
///
/// Probe the cluster API with the credentials from the body.
pub async fn test_proxmox(Json(settings): Json<ProxmoxSettings>) -> ApiResult<Json<Value>> {
    let client = ProxmoxClient::new(&settings)?;
    let nodes = client
        .probe()
        .await
        .map_err(|e| ApiError::InvalidRequest(format!("connection test failed: {e:#}")))?;

    Ok(Json(json!({ "status": "ok", "nodes": nodes })))
}

/// POST /api/v1/settings/test/telegram
///
/// Deliver one test message with the credentials from the body.
pub async fn test_telegram(Json(settings): Json<TelegramSettings>) -> ApiResult<Json<Value>> {
    if !settings.is_configured() {
        return Err(ApiError::InvalidRequest(
            "bot token and chat id are required".to_string(),
        ));
    }

    let sender = TelegramSender::new(settings)?;
    sender
        .send(TEST_MESSAGE)
        .await
        .map_err(|e| ApiError::InvalidRequest(format!("connection test failed: {e:#}")))?;

    Ok(Json(json!({ "status": "ok" })))
}

/// POST /api/v1/settings/test/discord
///
/// Deliver one test message with the credentials from the body.
pub async fn test_discord(Json(settings): Json<DiscordSettings>) -> ApiResult<Json<Value>> {
    if !settings.is_configured() {
        return Err(ApiError::InvalidRequest(
            "bot token and channel id are required".to_string(),
        ));
    }

    let sender = DiscordSender::new(settings)?;
    sender
        .send(TEST_MESSAGE)
        .await
        .map_err(|e| ApiError::InvalidRequest(format!("connection test failed: {e:#}")))?;

    Ok(Json(json!({ "status": "ok" })))
}
