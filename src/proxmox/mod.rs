//! Client for the cluster manager's JSON API.
//!
//! The client collects telemetry hierarchically: nodes, then per-node
//! storages, then (for the status view) per-node guests with their live
//! resource figures. Failure handling differs by tier. A node-list failure
//! aborts the collection, storage failures only degrade the affected node's
//! disk figures, and guest failures abort only the request-scoped status
//! collection that asked for them.

pub mod types;

use std::time::Duration;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use tracing::{instrument, trace, warn};

use crate::config::ProxmoxSettings;
use crate::{GuestKind, GuestResources, GuestSnapshot, NodeOverview, NodeSnapshot};

use types::{ApiEnvelope, GuestListItem, GuestStatus, NodeListItem, StorageListItem, StorageStatus};

/// Timeout applied to every outbound call.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// HTTP client bound to one cluster endpoint and credential pair.
pub struct ProxmoxClient {
    /// HTTP client (reused across requests for efficiency)
    client: reqwest::Client,
    base_url: String,
    auth_header: String,
}

impl ProxmoxClient {
    pub fn new(settings: &ProxmoxSettings) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .danger_accept_invalid_certs(settings.insecure_tls)
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: settings.base_url(),
            auth_header: settings.auth_header(),
        })
    }

    /// GET a path below the API base and unwrap the `data` envelope.
    async fn get_data<T>(&self, path: &str) -> Result<Option<T>>
    where
        T: DeserializeOwned + Default,
    {
        let url = format!("{}{}", self.base_url, path);

        trace!("requesting {url}");

        let response = self
            .client
            .get(&url)
            .header("Authorization", &self.auth_header)
            .send()
            .await
            .context("failed to send HTTP request")?;

        if !response.status().is_success() {
            anyhow::bail!("HTTP error: {} for {url}", response.status());
        }

        let body = response
            .text()
            .await
            .context("failed to read response body")?;

        let envelope: ApiEnvelope<T> =
            serde_json::from_str(&body).context("failed to parse API response")?;

        Ok(envelope.data)
    }

    /// The raw node list. A failure here fails the whole collection.
    pub async fn fetch_nodes(&self) -> Result<Vec<NodeListItem>> {
        let nodes = self
            .get_data::<Vec<NodeListItem>>("/nodes")
            .await
            .context("failed to fetch node list")?;

        Ok(nodes.unwrap_or_default())
    }

    /// Sum used/total bytes across the node's storages, best effort.
    ///
    /// Returns `(0, 0)` when the storage list cannot be fetched; a failing
    /// storage status only skips that storage's contribution. Callers treat
    /// a zero total as "unknown" and suppress ratio math on it.
    #[instrument(skip(self))]
    async fn aggregate_node_disk(&self, node: &str) -> (u64, u64) {
        let path = format!("/nodes/{node}/storage");
        let storages = match self.get_data::<Vec<StorageListItem>>(&path).await {
            Ok(storages) => storages.unwrap_or_default(),
            Err(e) => {
                warn!("failed to fetch storage list for {node}: {e:#}");
                return (0, 0);
            }
        };

        let mut used = 0u64;
        let mut total = 0u64;

        for storage in storages {
            let path = format!("/nodes/{node}/storage/{}/status", storage.storage);
            match self.get_data::<StorageStatus>(&path).await {
                Ok(status) => {
                    let status = status.unwrap_or_default();
                    used += status.used.unwrap_or(0);
                    total += status.total.unwrap_or(0);
                }
                Err(e) => {
                    warn!(
                        "failed to fetch status for storage {} on {node}: {e:#}",
                        storage.storage
                    );
                }
            }
        }

        (used, total)
    }

    fn node_snapshot(item: NodeListItem, disk_used: u64, disk_total: u64) -> NodeSnapshot {
        NodeSnapshot {
            node: item.node,
            cpu: item.cpu.unwrap_or(0.0),
            mem_used: item.mem.unwrap_or(0),
            mem_total: item.maxmem.unwrap_or(0),
            disk_used,
            disk_total,
        }
    }

    /// Collect one snapshot per cluster node, in API order.
    #[instrument(skip(self))]
    pub async fn collect_node_snapshots(&self) -> Result<Vec<NodeSnapshot>> {
        let nodes = self.fetch_nodes().await?;

        let mut snapshots = Vec::with_capacity(nodes.len());
        for node in nodes {
            let (disk_used, disk_total) = self.aggregate_node_disk(&node.node).await;
            snapshots.push(Self::node_snapshot(node, disk_used, disk_total));
        }

        Ok(snapshots)
    }

    /// Guest inventory of one node: virtual machines first, then containers.
    /// Live resource figures are fetched for running guests only.
    async fn collect_node_guests(&self, node: &str) -> Result<Vec<GuestSnapshot>> {
        let mut guests = Vec::new();

        for kind in [GuestKind::Qemu, GuestKind::Lxc] {
            let segment = kind.api_segment();
            let list = self
                .get_data::<Vec<GuestListItem>>(&format!("/nodes/{node}/{segment}"))
                .await
                .with_context(|| format!("failed to fetch {segment} list for node {node}"))?
                .unwrap_or_default();

            for item in list {
                let status = item.status.unwrap_or_default();

                let resources = if status == "running" {
                    let path = format!("/nodes/{node}/{segment}/{}/status/current", item.vmid);
                    let current = self
                        .get_data::<GuestStatus>(&path)
                        .await
                        .with_context(|| {
                            format!(
                                "failed to fetch live status for {segment} {} on node {node}",
                                item.vmid
                            )
                        })?
                        .unwrap_or_default();

                    Some(GuestResources {
                        cpu: current.cpu.unwrap_or(0.0),
                        mem: current.mem.unwrap_or(0),
                        maxmem: current.maxmem.unwrap_or(0),
                        disk: current.disk.unwrap_or(0),
                        maxdisk: current.maxdisk.unwrap_or(0),
                    })
                } else {
                    None
                };

                guests.push(GuestSnapshot {
                    vmid: item.vmid,
                    name: item.name,
                    kind,
                    status,
                    resources,
                });
            }
        }

        Ok(guests)
    }

    /// Full per-node detail for the status view.
    ///
    /// This path is request-scoped, so a guest fetch failure propagates to
    /// the caller instead of degrading silently.
    #[instrument(skip(self))]
    pub async fn collect_cluster_status(&self) -> Result<Vec<NodeOverview>> {
        let nodes = self.fetch_nodes().await?;

        let mut overview = Vec::with_capacity(nodes.len());
        for node in nodes {
            let (disk_used, disk_total) = self.aggregate_node_disk(&node.node).await;
            let guests = self.collect_node_guests(&node.node).await?;

            overview.push(NodeOverview {
                snapshot: Self::node_snapshot(node, disk_used, disk_total),
                guests,
            });
        }

        Ok(overview)
    }

    /// Lightweight connectivity probe: fetch the node list and report how
    /// many nodes answered. Used by the settings test endpoint.
    pub async fn probe(&self) -> Result<usize> {
        let nodes = self.fetch_nodes().await?;
        Ok(nodes.len())
    }
}
