//! REST API server for the monitoring dashboard
//!
//! This module provides the HTTP endpoints the dashboard frontend talks to:
//! a live cluster status view, the monitoring settings surface and the
//! per-resource alert toggles.
//!
//! ## Architecture
//!
//! - **Axum** web framework with Tower middleware
//! - **SettingsStore** handle shared with the monitor loop
//! - Request-scoped cluster queries; the API holds no cluster state
//!
//! ## Endpoints
//!
//! - `GET /api/v1/health` - Health check
//! - `GET /api/v1/status` - Live per-node cluster view
//! - `GET /api/v1/alerts` - Read alert toggles
//! - `PUT /api/v1/alerts` - Partially update alert toggles
//! - `GET /api/v1/settings` - Read monitoring settings
//! - `PUT /api/v1/settings` - Replace monitoring settings
//! - `POST /api/v1/settings/test/proxmox` - Probe cluster credentials
//! - `POST /api/v1/settings/test/telegram` - Send a Telegram test message
//! - `POST /api/v1/settings/test/discord` - Send a Discord test message

pub mod error;
pub mod routes;
pub mod state;
pub mod types;

pub use error::{ApiError, ApiResult};
pub use state::ApiState;
pub use types::{AlertTogglesPatch, GuestView, HealthResponse, NodeStats, NodeView, SizePair};

use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};

use axum::{
    Router,
    routing::{get, post},
};
use tracing::info;

/// API server configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Bind address (e.g., "0.0.0.0:8000")
    pub bind_addr: SocketAddr,

    /// Enable CORS for the dashboard frontend
    pub enable_cors: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::LOCALHOST, 8000)),
            enable_cors: true,
        }
    }
}

/// Spawn the API server
///
/// This starts an Axum HTTP server in a background task.
/// Returns the server's local address.
pub async fn spawn_api_server(config: ApiConfig, state: ApiState) -> anyhow::Result<SocketAddr> {
    use tower_http::cors::{Any, CorsLayer};
    use tower_http::trace::TraceLayer;

    info!("starting API server on {}", config.bind_addr);

    let mut app = Router::new()
        .route("/api/v1/health", get(routes::health::health_check))
        .route("/api/v1/status", get(routes::status::cluster_status))
        .route(
            "/api/v1/alerts",
            get(routes::alerts::get_alert_toggles).put(routes::alerts::update_alert_toggles),
        )
        .route(
            "/api/v1/settings",
            get(routes::settings::get_settings).put(routes::settings::update_settings),
        )
        .route(
            "/api/v1/settings/test/proxmox",
            post(routes::settings::test_proxmox),
        )
        .route(
            "/api/v1/settings/test/telegram",
            post(routes::settings::test_telegram),
        )
        .route(
            "/api/v1/settings/test/discord",
            post(routes::settings::test_discord),
        )
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    if config.enable_cors {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
        app = app.layer(cors);
    }

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    let addr = listener.local_addr()?;

    info!("API server listening on {}", addr);

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            tracing::error!("API server error: {}", e);
        }
    });

    Ok(addr)
}
