//! Cluster status view endpoint

use axum::{Json, extract::State};

use crate::api::{
    error::{ApiError, ApiResult},
    state::ApiState,
    types::NodeView,
};
use crate::proxmox::ProxmoxClient;

/// GET /api/v1/status
///
/// Collect a live view of every node and its guests. The cluster is queried
/// on each request with whatever settings are currently stored; nothing is
/// cached between requests.
pub async fn cluster_status(State(state): State<ApiState>) -> ApiResult<Json<Vec<NodeView>>> {
    let settings = state.store.monitoring_settings().await?;

    let Some(proxmox) = settings.proxmox_configured() else {
        return Err(ApiError::InvalidRequest(
            "cluster endpoint not configured".to_string(),
        ));
    };

    let client = ProxmoxClient::new(proxmox)?;
    let overviews = client
        .collect_cluster_status()
        .await
        .map_err(|e| ApiError::UpstreamFailed(format!("{e:#}")))?;

    let nodes = overviews.iter().map(NodeView::from).collect();

    Ok(Json(nodes))
}
