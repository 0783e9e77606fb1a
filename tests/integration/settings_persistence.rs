//! Settings persistence across store restarts

use std::sync::Arc;

use pretty_assertions::assert_eq;
use pvewatch::config::AlertToggles;
use pvewatch::settings::{SettingsBackend, SettingsStore, SqliteBackend};
use tempfile::tempdir;

use crate::helpers::*;

#[tokio::test]
async fn monitoring_settings_survive_a_reopen() {
    let dir = tempdir().unwrap();
    let db = dir.path().join("settings.db");

    {
        let backend = SqliteBackend::new(&db).await.unwrap();
        let store = SettingsStore::new(Arc::new(backend));

        let mut settings = store.monitoring_settings().await.unwrap();
        settings.proxmox = Some(proxmox_settings("https://pve.example.com:8006"));
        settings.telegram = Some(telegram_settings("https://api.telegram.org"));
        store.update_monitoring_settings(&settings).await.unwrap();
        store.close().await.unwrap();
    }

    let backend = SqliteBackend::new(&db).await.unwrap();
    let store = SettingsStore::new(Arc::new(backend));

    let loaded = store.monitoring_settings().await.unwrap();
    assert_eq!(
        loaded.proxmox.unwrap().host,
        "https://pve.example.com:8006"
    );
    assert_eq!(loaded.telegram.unwrap().bot_token, "123:abc");
    assert_eq!(loaded.discord, None);

    store.close().await.unwrap();
}

#[tokio::test]
async fn first_toggle_read_creates_the_row() {
    let dir = tempdir().unwrap();
    let db = dir.path().join("settings.db");

    {
        let backend = SqliteBackend::new(&db).await.unwrap();
        let store = SettingsStore::new(Arc::new(backend));

        let toggles = store.ensure_alert_toggles().await.unwrap();
        assert_eq!(toggles, AlertToggles::default());
        store.close().await.unwrap();
    }

    // the default row is now on disk, not just a synthesized default
    let backend = SqliteBackend::new(&db).await.unwrap();
    let stored = backend.load_toggles().await.unwrap();
    assert_eq!(stored, Some(AlertToggles::default()));

    backend.close().await.unwrap();
}

#[tokio::test]
async fn toggle_updates_overwrite_the_single_row() {
    let dir = tempdir().unwrap();
    let db = dir.path().join("settings.db");

    let backend = SqliteBackend::new(&db).await.unwrap();
    let store = SettingsStore::new(Arc::new(backend));

    store
        .update_alert_toggles(&AlertToggles {
            cpu: true,
            ram: false,
            disk: false,
        })
        .await
        .unwrap();
    store
        .update_alert_toggles(&AlertToggles {
            cpu: true,
            ram: true,
            disk: true,
        })
        .await
        .unwrap();

    let toggles = store.alert_toggles().await.unwrap();
    assert_eq!(
        toggles,
        AlertToggles {
            cpu: true,
            ram: true,
            disk: true,
        }
    );

    store.close().await.unwrap();
}
