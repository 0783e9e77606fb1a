//! Threshold evaluation over node snapshots.
//!
//! Evaluation is a pure function of one snapshot and the configured
//! thresholds and toggles. It keeps no state between cycles, so the same
//! inputs always produce the same events.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::NodeSnapshot;
use crate::config::{AlertToggles, Thresholds};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResourceKind {
    Cpu,
    Ram,
    Disk,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceKind::Cpu => write!(f, "CPU"),
            ResourceKind::Ram => write!(f, "RAM"),
            ResourceKind::Disk => write!(f, "DISK"),
        }
    }
}

/// One alert decision. Lives only between evaluation and dispatch within a
/// single cycle; nothing retries it later.
#[derive(Debug, Clone, PartialEq)]
pub struct AlertEvent {
    pub resource: ResourceKind,
    pub node: String,
    /// Utilization in percent, rounded to one decimal place.
    pub percent: f64,
}

impl AlertEvent {
    fn from_ratio(resource: ResourceKind, node: &str, ratio: f64) -> Self {
        Self {
            resource,
            node: node.to_string(),
            percent: (ratio * 1000.0).round() / 10.0,
        }
    }

    /// The message delivered to notification channels.
    pub fn message(&self) -> String {
        match self.resource {
            ResourceKind::Cpu => {
                format!("⚠️ High CPU usage on node {}: {:.1}%", self.node, self.percent)
            }
            ResourceKind::Ram => {
                format!("⚠️ High RAM usage on node {}: {:.1}%", self.node, self.percent)
            }
            ResourceKind::Disk => {
                format!(
                    "⚠️ Disk space almost full on node {}: {:.1}%",
                    self.node, self.percent
                )
            }
        }
    }

    /// Decide which alerts one node's snapshot warrants.
    ///
    /// Checks run in a fixed order (CPU, RAM, DISK) and fire only strictly
    /// above the threshold. A zero total suppresses that resource's ratio
    /// alert; the capacity is unknown, not full.
    pub fn evaluate(
        snapshot: &NodeSnapshot,
        thresholds: &Thresholds,
        toggles: &AlertToggles,
    ) -> Vec<AlertEvent> {
        let mut events = Vec::new();

        if toggles.cpu && snapshot.cpu > thresholds.cpu {
            events.push(AlertEvent::from_ratio(
                ResourceKind::Cpu,
                &snapshot.node,
                snapshot.cpu,
            ));
        }

        if toggles.ram && snapshot.mem_total > 0 {
            let ratio = snapshot.mem_used as f64 / snapshot.mem_total as f64;
            if ratio > thresholds.ram {
                events.push(AlertEvent::from_ratio(
                    ResourceKind::Ram,
                    &snapshot.node,
                    ratio,
                ));
            }
        }

        if toggles.disk && snapshot.disk_total > 0 {
            let ratio = snapshot.disk_used as f64 / snapshot.disk_total as f64;
            if ratio > thresholds.disk {
                events.push(AlertEvent::from_ratio(
                    ResourceKind::Disk,
                    &snapshot.node,
                    ratio,
                ));
            }
        }

        events
    }
}

/// Evaluate every snapshot, preserving node order and per-node resource
/// order in the combined event list.
pub fn evaluate_nodes(
    snapshots: &[NodeSnapshot],
    thresholds: &Thresholds,
    toggles: &AlertToggles,
) -> Vec<AlertEvent> {
    if !toggles.any_enabled() {
        return Vec::new();
    }

    snapshots
        .iter()
        .flat_map(|snapshot| AlertEvent::evaluate(snapshot, thresholds, toggles))
        .collect()
}
