//! Integration tests for API endpoints
//!
//! These tests verify that:
//! - The status view renders nodes and guests with converted units
//! - Settings and alert toggles round-trip through the HTTP surface
//! - The connection test endpoints exercise real credentials
//! - Error handling maps to the right status codes

use std::net::SocketAddr;

use axum::http::StatusCode;
use pvewatch::api::{ApiConfig, ApiState, spawn_api_server};
use pvewatch::settings::SettingsStore;
use serde_json::{Value, json};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::helpers::*;

// Helper to create a test API server on a random port
async fn spawn_test_api(store: SettingsStore) -> SocketAddr {
    let config = ApiConfig {
        bind_addr: "127.0.0.1:0".parse().unwrap(),
        enable_cors: true,
    };

    spawn_api_server(config, ApiState::new(store)).await.unwrap()
}

#[tokio::test]
async fn health_endpoint_returns_ok() {
    let addr = spawn_test_api(SettingsStore::in_memory()).await;

    let client = reqwest::Client::new();
    let response = client
        .get(format!("http://{}/api/v1/health", addr))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json: Value = response.json().await.unwrap();
    assert_eq!(json["status"], "ok");
    assert!(json["timestamp"].is_string());
}

#[tokio::test]
async fn status_without_cluster_settings_is_400() {
    let addr = spawn_test_api(SettingsStore::in_memory()).await;

    let client = reqwest::Client::new();
    let response = client
        .get(format!("http://{}/api/v1/status", addr))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json: Value = response.json().await.unwrap();
    assert_eq!(json["error"], "cluster endpoint not configured");
}

#[tokio::test]
async fn status_reports_nodes_and_guests_with_converted_units() {
    let cluster = MockServer::start().await;

    // one node at 42.5% cpu, 3.5/16 GiB ram
    mount_nodes(
        &cluster,
        json!([node_json("pve1", 0.425, 3_758_096_384u64, 17_179_869_184u64)]),
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/api2/json/nodes/pve1/storage"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{ "storage": "local" }]
        })))
        .mount(&cluster)
        .await;
    Mock::given(method("GET"))
        .and(path("/api2/json/nodes/pve1/storage/local/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "used": 107_374_182_400u64, "total": 536_870_912_000u64 }
        })))
        .mount(&cluster)
        .await;

    Mock::given(method("GET"))
        .and(path("/api2/json/nodes/pve1/qemu"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{ "vmid": 100, "name": "web", "status": "running" }]
        })))
        .mount(&cluster)
        .await;
    Mock::given(method("GET"))
        .and(path("/api2/json/nodes/pve1/qemu/100/status/current"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "cpu": 0.12,
                "mem": 1_073_741_824u64,
                "maxmem": 2_147_483_648u64,
                "disk": 5_368_709_120u64,
                "maxdisk": 21_474_836_480u64,
            }
        })))
        .mount(&cluster)
        .await;
    Mock::given(method("GET"))
        .and(path("/api2/json/nodes/pve1/lxc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{ "vmid": 203, "status": "stopped" }]
        })))
        .mount(&cluster)
        .await;

    let store = store_with_cluster(&cluster.uri()).await;
    let addr = spawn_test_api(store).await;

    let client = reqwest::Client::new();
    let response = client
        .get(format!("http://{}/api/v1/status", addr))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json: Value = response.json().await.unwrap();
    let nodes = json.as_array().unwrap();
    assert_eq!(nodes.len(), 1);

    let node = &nodes[0];
    assert_eq!(node["node"], "pve1");
    assert_eq!(node["stats"]["cpu"], 42.5);
    assert_eq!(node["stats"]["ram"]["used"], 3.5);
    assert_eq!(node["stats"]["ram"]["total"], 16.0);
    assert_eq!(node["stats"]["disk"]["used"], 100.0);
    assert_eq!(node["stats"]["disk"]["total"], 500.0);

    let guests = node["guests"].as_array().unwrap();
    assert_eq!(guests.len(), 2);

    // virtual machines come before containers
    assert_eq!(guests[0]["vmid"], 100);
    assert_eq!(guests[0]["name"], "web");
    assert_eq!(guests[0]["kind"], "qemu");
    assert_eq!(guests[0]["status"], "running");
    assert_eq!(guests[0]["cpu"], 0.12);
    assert_eq!(guests[0]["ram"]["used"], 1.0);
    assert_eq!(guests[0]["ram"]["total"], 2.0);
    assert_eq!(guests[0]["disk"]["used"], 5.0);
    assert_eq!(guests[0]["disk"]["total"], 20.0);

    // stopped container: identity only, no resource figures, fallback name
    assert_eq!(guests[1]["vmid"], 203);
    assert_eq!(guests[1]["name"], "VM-203");
    assert_eq!(guests[1]["kind"], "lxc");
    assert_eq!(guests[1]["status"], "stopped");
    assert!(guests[1].get("cpu").is_none());
    assert!(guests[1].get("ram").is_none());
}

#[tokio::test]
async fn status_upstream_failure_is_502() {
    let cluster = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api2/json/nodes"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&cluster)
        .await;

    let store = store_with_cluster(&cluster.uri()).await;
    let addr = spawn_test_api(store).await;

    let client = reqwest::Client::new();
    let response = client
        .get(format!("http://{}/api/v1/status", addr))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

    let json: Value = response.json().await.unwrap();
    assert!(json["error"].is_string());
}

#[tokio::test]
async fn status_guest_tier_failure_is_502() {
    let cluster = MockServer::start().await;
    mount_nodes(&cluster, json!([node_json("pve1", 0.10, 10, 100)])).await;
    mount_empty_storage(&cluster, "pve1").await;
    Mock::given(method("GET"))
        .and(path("/api2/json/nodes/pve1/qemu"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&cluster)
        .await;

    let store = store_with_cluster(&cluster.uri()).await;
    let addr = spawn_test_api(store).await;

    let client = reqwest::Client::new();
    let response = client
        .get(format!("http://{}/api/v1/status", addr))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn alerts_get_returns_default_toggles() {
    let addr = spawn_test_api(SettingsStore::in_memory()).await;

    let client = reqwest::Client::new();
    let response = client
        .get(format!("http://{}/api/v1/alerts", addr))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json: Value = response.json().await.unwrap();
    assert_eq!(json, json!({ "cpu": false, "ram": false, "disk": false }));
}

#[tokio::test]
async fn alerts_put_merges_partial_updates() {
    let addr = spawn_test_api(SettingsStore::in_memory()).await;
    let client = reqwest::Client::new();

    let response = client
        .put(format!("http://{}/api/v1/alerts", addr))
        .json(&json!({ "cpu": true }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json: Value = response.json().await.unwrap();
    assert_eq!(json["status"], "updated");

    // the other toggles kept their stored value
    let json: Value = client
        .get(format!("http://{}/api/v1/alerts", addr))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(json, json!({ "cpu": true, "ram": false, "disk": false }));

    // a second partial update leaves the first intact
    client
        .put(format!("http://{}/api/v1/alerts", addr))
        .json(&json!({ "disk": true }))
        .send()
        .await
        .unwrap();

    let json: Value = client
        .get(format!("http://{}/api/v1/alerts", addr))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(json, json!({ "cpu": true, "ram": false, "disk": true }));
}

#[tokio::test]
async fn settings_get_returns_defaults() {
    let addr = spawn_test_api(SettingsStore::in_memory()).await;

    let client = reqwest::Client::new();
    let json: Value = client
        .get(format!("http://{}/api/v1/settings", addr))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(json["proxmox"], Value::Null);
    assert_eq!(json["thresholds"]["cpu"], 0.9);
    assert_eq!(json["thresholds"]["ram"], 0.9);
    assert_eq!(json["thresholds"]["disk"], 0.85);
}

#[tokio::test]
async fn settings_put_round_trips() {
    let addr = spawn_test_api(SettingsStore::in_memory()).await;
    let client = reqwest::Client::new();

    let body = json!({
        "proxmox": {
            "host": "pve.example.com:8006",
            "token_id": "monitor@pve!dashboard",
            "token_secret": "s3cret",
        },
        "thresholds": { "cpu": 0.8, "ram": 0.9, "disk": 0.95 },
        "telegram": {
            "enabled": true,
            "bot_token": "123:abc",
            "chat_id": "-100123",
        },
    });

    let response = client
        .put(format!("http://{}/api/v1/settings", addr))
        .json(&body)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json: Value = client
        .get(format!("http://{}/api/v1/settings", addr))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(json["proxmox"]["host"], "pve.example.com:8006");
    assert_eq!(json["thresholds"]["cpu"], 0.8);
    assert_eq!(json["telegram"]["enabled"], true);
    assert_eq!(json["telegram"]["api_base"], "https://api.telegram.org");
    assert_eq!(json["discord"], Value::Null);
}

#[tokio::test]
async fn settings_put_rejects_out_of_range_thresholds() {
    let addr = spawn_test_api(SettingsStore::in_memory()).await;
    let client = reqwest::Client::new();

    let body = json!({
        "thresholds": { "cpu": 1.5, "ram": 0.9, "disk": 0.85 },
    });

    let response = client
        .put(format!("http://{}/api/v1/settings", addr))
        .json(&body)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json: Value = response.json().await.unwrap();
    assert!(json["error"].is_string());
}

#[tokio::test]
async fn proxmox_connection_test_probes_the_cluster() {
    let cluster = MockServer::start().await;
    mount_nodes(&cluster, json!([node_json("pve1", 0.1, 1, 10)])).await;

    let addr = spawn_test_api(SettingsStore::in_memory()).await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("http://{}/api/v1/settings/test/proxmox", addr))
        .json(&proxmox_settings(&cluster.uri()))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json: Value = response.json().await.unwrap();
    assert_eq!(json["status"], "ok");
    assert_eq!(json["nodes"], 1);
}

#[tokio::test]
async fn proxmox_connection_test_reports_failure_as_400() {
    let addr = spawn_test_api(SettingsStore::in_memory()).await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("http://{}/api/v1/settings/test/proxmox", addr))
        .json(&proxmox_settings("http://127.0.0.1:9"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json: Value = response.json().await.unwrap();
    assert!(
        json["error"]
            .as_str()
            .unwrap()
            .contains("connection test failed")
    );
}

#[tokio::test]
async fn telegram_connection_test_delivers_a_message() {
    let chat = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/bot123:abc/sendMessage"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
        .expect(1)
        .mount(&chat)
        .await;

    let addr = spawn_test_api(SettingsStore::in_memory()).await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("http://{}/api/v1/settings/test/telegram", addr))
        .json(&telegram_settings(&chat.uri()))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json: Value = response.json().await.unwrap();
    assert_eq!(json["status"], "ok");
}

#[tokio::test]
async fn discord_connection_test_requires_credentials() {
    let addr = spawn_test_api(SettingsStore::in_memory()).await;
    let client = reqwest::Client::new();

    let body = json!({ "enabled": true, "bot_token": "", "channel_id": "" });
    let response = client
        .post(format!("http://{}/api/v1/settings/test/discord", addr))
        .json(&body)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
