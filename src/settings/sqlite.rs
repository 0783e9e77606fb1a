//! SQLite settings backend
//!
//! Stores both settings documents in a local SQLite file so they survive
//! restarts. Each document occupies a single fixed-id row: the monitoring
//! settings as a JSON payload (the document evolves, the schema should
//! not), the alert toggles as plain columns.

use std::path::Path;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::{Pool, Row, Sqlite};
use tracing::{debug, info, instrument};

use crate::config::{AlertToggles, MonitoringSettings};

use super::backend::SettingsBackend;
use super::error::{SettingsError, SettingsResult};

pub struct SqliteBackend {
    pool: Pool<Sqlite>,
}

impl SqliteBackend {
    /// Open (or create) the database file and run migrations.
    #[instrument(skip_all)]
    pub async fn new(db_path: impl AsRef<Path>) -> SettingsResult<Self> {
        let db_path_str = db_path.as_ref().to_string_lossy().to_string();

        info!("initializing SQLite settings store at: {}", db_path_str);

        let options = SqliteConnectOptions::new()
            .filename(&db_path_str)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(std::time::Duration::from_secs(30));

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .map_err(|e| SettingsError::ConnectionFailed(e.to_string()))?;

        debug!("running database migrations");
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(|e| SettingsError::MigrationFailed(e.to_string()))?;

        Ok(Self { pool })
    }
}

#[async_trait]
impl SettingsBackend for SqliteBackend {
    async fn load_monitoring(&self) -> SettingsResult<Option<MonitoringSettings>> {
        let row = sqlx::query("SELECT payload FROM monitoring_settings WHERE id = 1")
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| SettingsError::QueryFailed(e.to_string()))?;

        match row {
            Some(row) => {
                let payload: String = row.get("payload");
                let settings = serde_json::from_str(&payload)?;
                Ok(Some(settings))
            }
            None => Ok(None),
        }
    }

    #[instrument(skip_all)]
    async fn store_monitoring(&self, settings: &MonitoringSettings) -> SettingsResult<()> {
        let payload = serde_json::to_string(settings)?;

        sqlx::query(
            r#"
            INSERT INTO monitoring_settings (id, payload, updated_at)
            VALUES (1, ?, ?)
            ON CONFLICT (id) DO UPDATE SET
                payload = excluded.payload,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(payload)
        .bind(Utc::now().timestamp_millis())
        .execute(&self.pool)
        .await
        .map_err(|e| SettingsError::QueryFailed(e.to_string()))?;

        debug!("stored monitoring settings");
        Ok(())
    }

    async fn load_toggles(&self) -> SettingsResult<Option<AlertToggles>> {
        let row = sqlx::query("SELECT cpu, ram, disk FROM alert_toggles WHERE id = 1")
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| SettingsError::QueryFailed(e.to_string()))?;

        Ok(row.map(|row| AlertToggles {
            cpu: row.get::<i64, _>("cpu") != 0,
            ram: row.get::<i64, _>("ram") != 0,
            disk: row.get::<i64, _>("disk") != 0,
        }))
    }

    #[instrument(skip_all)]
    async fn store_toggles(&self, toggles: &AlertToggles) -> SettingsResult<()> {
        sqlx::query(
            r#"
            INSERT INTO alert_toggles (id, cpu, ram, disk, updated_at)
            VALUES (1, ?, ?, ?, ?)
            ON CONFLICT (id) DO UPDATE SET
                cpu = excluded.cpu,
                ram = excluded.ram,
                disk = excluded.disk,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(toggles.cpu as i64)
        .bind(toggles.ram as i64)
        .bind(toggles.disk as i64)
        .bind(Utc::now().timestamp_millis())
        .execute(&self.pool)
        .await
        .map_err(|e| SettingsError::QueryFailed(e.to_string()))?;

        debug!("stored alert toggles");
        Ok(())
    }

    async fn close(&self) -> SettingsResult<()> {
        info!("closing SQLite settings store");
        self.pool.close().await;
        Ok(())
    }
}
