use std::time::Duration;

use clap::Parser;
use pvewatch::monitor::MonitorHandle;
use pvewatch::settings::SettingsStore;
use pvewatch::util;
use tracing::{info, trace};
use tracing_subscriber::{filter, layer::SubscriberExt, util::SubscriberInitExt};

#[cfg(feature = "api")]
use pvewatch::api::{ApiConfig, ApiState, spawn_api_server};
#[cfg(feature = "api")]
use std::net::SocketAddr;

#[derive(Debug, Clone, Parser)]
struct Args {
    /// SQLite database file for settings
    #[arg(short, long)]
    database: Option<String>,

    /// Address for the API server to bind to
    #[cfg(feature = "api")]
    #[arg(short, long)]
    bind: Option<SocketAddr>,

    /// Seconds between monitoring cycles
    #[arg(short, long)]
    interval: Option<u64>,
}

fn init() {
    dotenv::dotenv().ok();

    let filter = filter::Targets::new().with_targets(vec![("pvewatch", util::get_log_level())]);
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .compact()
                .with_ansi(false),
        )
        .with(filter)
        .init();
}

#[cfg(feature = "settings-sqlite")]
async fn build_store(args: &Args) -> anyhow::Result<SettingsStore> {
    use std::sync::Arc;

    use pvewatch::settings::SqliteBackend;
    use tracing::debug;

    let db_path = args.database.clone().unwrap_or_else(util::get_database_path);
    debug!("opening settings store at {db_path}");

    let backend = SqliteBackend::new(&db_path).await?;
    Ok(SettingsStore::new(Arc::new(backend)))
}

#[cfg(not(feature = "settings-sqlite"))]
async fn build_store(_args: &Args) -> anyhow::Result<SettingsStore> {
    tracing::warn!("built without settings-sqlite, settings will not survive a restart");
    Ok(SettingsStore::in_memory())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init();
    let args = Args::parse();
    trace!("started with args: {args:?}");

    let store = build_store(&args).await?;

    let interval = args.interval.unwrap_or_else(util::get_check_interval);
    info!("monitoring cycle every {interval}s");

    let monitor = MonitorHandle::spawn(store.clone(), Duration::from_secs(interval));

    #[cfg(feature = "api")]
    {
        let config = ApiConfig {
            bind_addr: args.bind.unwrap_or_else(util::get_bind_addr),
            enable_cors: true,
        };
        spawn_api_server(config, ApiState::new(store.clone())).await?;
    }

    tokio::signal::ctrl_c().await?;
    info!("shutting down");

    monitor.shutdown().await?;
    store.close().await?;

    Ok(())
}
