pub mod alerts;
#[cfg(feature = "api")]
pub mod api;
pub mod channels;
pub mod config;
pub mod evaluator;
pub mod monitor;
pub mod proxmox;
pub mod settings;
pub mod util;

use serde::{Deserialize, Serialize};

/// Aggregated resource usage of one cluster node, as collected during a
/// monitor cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeSnapshot {
    pub node: String,
    /// CPU usage as a fraction of all cores (`0.0..=1.0`).
    pub cpu: f64,
    pub mem_used: u64,
    pub mem_total: u64,
    /// Sum over the node's storages. Both stay 0 when no storage answered,
    /// which readers treat as "unknown" rather than "full".
    pub disk_used: u64,
    pub disk_total: u64,
}

/// A virtual machine or container on a node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuestSnapshot {
    pub vmid: u64,
    pub name: Option<String>,
    pub kind: GuestKind,
    pub status: String,
    /// Present only while the guest is running.
    pub resources: Option<GuestResources>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GuestKind {
    Qemu,
    Lxc,
}

impl GuestKind {
    /// Path segment used by the cluster API for this guest kind.
    pub fn api_segment(&self) -> &'static str {
        match self {
            GuestKind::Qemu => "qemu",
            GuestKind::Lxc => "lxc",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GuestResources {
    pub cpu: f64,
    pub mem: u64,
    pub maxmem: u64,
    pub disk: u64,
    pub maxdisk: u64,
}

/// One node with its guest inventory, as shown by the status view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeOverview {
    pub snapshot: NodeSnapshot,
    pub guests: Vec<GuestSnapshot>,
}
