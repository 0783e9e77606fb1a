//! Shared API response types
//!
//! These are the wire shapes the dashboard frontend consumes. Sizes are
//! reported in GiB rounded to one decimal, CPU load as a percentage with
//! one decimal, so the frontend can render them without further math.

use serde::{Deserialize, Serialize};

use crate::config::AlertToggles;
use crate::{GuestKind, GuestSnapshot, NodeOverview};

const BYTES_PER_GIB: f64 = 1024.0 * 1024.0 * 1024.0;

/// Convert a byte count to GiB with one decimal place.
pub fn bytes_to_gib(bytes: u64) -> f64 {
    (bytes as f64 / BYTES_PER_GIB * 10.0).round() / 10.0
}

/// Convert a 0.0..=1.0 load fraction to a percentage with one decimal place.
pub fn fraction_to_percent(fraction: f64) -> f64 {
    (fraction * 1000.0).round() / 10.0
}

// ============================================================================
// Health
// ============================================================================

/// Response for `GET /api/v1/health`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
}

// ============================================================================
// Cluster status view
// ============================================================================

/// A used/total pair in GiB, one decimal place.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SizePair {
    pub used: f64,
    pub total: f64,
}

impl SizePair {
    fn from_bytes(used: u64, total: u64) -> Self {
        Self {
            used: bytes_to_gib(used),
            total: bytes_to_gib(total),
        }
    }
}

/// Utilization summary for one node.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeStats {
    /// CPU load as a percentage (one decimal place)
    pub cpu: f64,
    pub ram: SizePair,
    pub disk: SizePair,
}

/// One guest in the status view.
///
/// The resource fields are present only for running guests; stopped guests
/// report identity and state alone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuestView {
    pub vmid: u64,
    pub name: String,
    pub kind: GuestKind,
    pub status: String,
    /// CPU load as reported by the cluster (0.0..=1.0 fraction)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpu: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ram: Option<SizePair>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disk: Option<SizePair>,
}

/// One node with its guests in the status view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeView {
    pub node: String,
    pub stats: NodeStats,
    pub guests: Vec<GuestView>,
}

impl From<&GuestSnapshot> for GuestView {
    fn from(guest: &GuestSnapshot) -> Self {
        let name = guest
            .name
            .clone()
            .unwrap_or_else(|| format!("VM-{}", guest.vmid));

        let (cpu, ram, disk) = match guest.resources {
            Some(res) => (
                Some(res.cpu),
                Some(SizePair::from_bytes(res.mem, res.maxmem)),
                Some(SizePair::from_bytes(res.disk, res.maxdisk)),
            ),
            None => (None, None, None),
        };

        Self {
            vmid: guest.vmid,
            name,
            kind: guest.kind,
            status: guest.status.clone(),
            cpu,
            ram,
            disk,
        }
    }
}

impl From<&NodeOverview> for NodeView {
    fn from(overview: &NodeOverview) -> Self {
        let snapshot = &overview.snapshot;

        Self {
            node: snapshot.node.clone(),
            stats: NodeStats {
                cpu: fraction_to_percent(snapshot.cpu),
                ram: SizePair::from_bytes(snapshot.mem_used, snapshot.mem_total),
                disk: SizePair::from_bytes(snapshot.disk_used, snapshot.disk_total),
            },
            guests: overview.guests.iter().map(GuestView::from).collect(),
        }
    }
}

// ============================================================================
// Alert toggles
// ============================================================================

/// Partial update body for `PUT /api/v1/alerts`
///
/// Absent fields keep their stored value, so the dashboard can flip one
/// toggle without resending the others.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AlertTogglesPatch {
    pub cpu: Option<bool>,
    pub ram: Option<bool>,
    pub disk: Option<bool>,
}

impl AlertTogglesPatch {
    /// Merge this patch over the current toggles.
    pub fn apply(&self, current: AlertToggles) -> AlertToggles {
        AlertToggles {
            cpu: self.cpu.unwrap_or(current.cpu),
            ram: self.ram.unwrap_or(current.ram),
            disk: self.disk.unwrap_or(current.disk),
        }
    }
}
