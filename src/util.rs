use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};

use tracing::level_filters::LevelFilter;

const BIND_ADDR: &str = "PVEWATCH_API_ADDR";

const DEFAULT_BIND_ADDR: SocketAddr =
    SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::new(0, 0, 0, 0), 8000));

pub fn get_bind_addr() -> SocketAddr {
    let addr_from_env = std::env::var(BIND_ADDR);
    addr_from_env.map_or(DEFAULT_BIND_ADDR, |res| {
        res.parse().unwrap_or(DEFAULT_BIND_ADDR)
    })
}

const DATABASE_PATH: &str = "PVEWATCH_DB";

const DEFAULT_DATABASE_PATH: &str = "./pvewatch.db";

pub fn get_database_path() -> String {
    let path_from_env = std::env::var(DATABASE_PATH);
    path_from_env.unwrap_or_else(|_| DEFAULT_DATABASE_PATH.to_string())
}

const CHECK_INTERVAL: &str = "PVEWATCH_CHECK_INTERVAL";

const DEFAULT_CHECK_INTERVAL: u64 = 600;

/// Seconds between monitor cycles.
pub fn get_check_interval() -> u64 {
    let interval_from_env = std::env::var(CHECK_INTERVAL);
    interval_from_env.map_or(DEFAULT_CHECK_INTERVAL, |res| {
        res.parse().unwrap_or(DEFAULT_CHECK_INTERVAL)
    })
}

const LOG_LEVEL: &str = "PVEWATCH_LOG";

const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::TRACE;

/// Verbosity for this crate's log target.
pub fn get_log_level() -> LevelFilter {
    let level_from_env = std::env::var(LOG_LEVEL);
    level_from_env.map_or(DEFAULT_LOG_LEVEL, |res| {
        res.parse().unwrap_or(DEFAULT_LOG_LEVEL)
    })
}
