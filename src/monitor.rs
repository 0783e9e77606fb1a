//! MonitorActor - the periodic collect/evaluate/dispatch loop
//!
//! One actor owns the whole monitoring schedule. Every cycle it reads a
//! fresh settings snapshot, collects node telemetry, evaluates thresholds
//! and fans alerts out to the configured channels. The actor is the error
//! boundary for the process: a failed or even panicking cycle is logged
//! and the next cycle runs as scheduled.
//!
//! ## Message Flow
//!
//! ```text
//! Timer tick → load settings → collect nodes → evaluate → dispatch
//!     ↑
//!     └─── Commands (CheckNow, UpdateInterval, Shutdown)
//! ```

use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use tokio::sync::{mpsc, oneshot};
use tokio::time::interval;
use tracing::{debug, error, info, instrument, warn};

use crate::alerts::{AlertDispatcher, DispatchSummary};
use crate::evaluator::evaluate_nodes;
use crate::proxmox::ProxmoxClient;
use crate::settings::SettingsStore;

/// Control messages understood by the actor.
#[derive(Debug)]
pub enum MonitorCommand {
    /// Run a cycle immediately and report its outcome.
    CheckNow {
        respond_to: oneshot::Sender<Result<CycleOutcome>>,
    },

    /// Change the cycle period.
    UpdateInterval { interval_secs: u64 },

    /// Stop the actor.
    Shutdown,
}

/// What one cycle did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// No cluster endpoint configured; nothing was collected.
    Skipped,

    /// Telemetry was collected and evaluated.
    Completed {
        nodes: usize,
        alerts: usize,
        dispatch: DispatchSummary,
    },
}

/// Actor that runs the monitoring loop.
pub struct MonitorActor {
    store: SettingsStore,
    command_rx: mpsc::Receiver<MonitorCommand>,
    interval_duration: Duration,
}

impl MonitorActor {
    pub fn new(
        store: SettingsStore,
        command_rx: mpsc::Receiver<MonitorCommand>,
        interval_duration: Duration,
    ) -> Self {
        Self {
            store,
            command_rx,
            interval_duration,
        }
    }

    /// Run the actor's main loop until shutdown.
    ///
    /// The first tick fires immediately, so a freshly started process
    /// checks the cluster right away instead of waiting a full period.
    #[instrument(skip(self))]
    pub async fn run(mut self) {
        debug!("starting monitor actor");

        let mut ticker = interval(self.interval_duration);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    if let Err(e) = self.guarded_cycle().await {
                        error!("monitor cycle failed: {e:#}");
                    }
                }

                Some(cmd) = self.command_rx.recv() => {
                    match cmd {
                        MonitorCommand::CheckNow { respond_to } => {
                            debug!("received CheckNow command");
                            let result = self.guarded_cycle().await;
                            let _ = respond_to.send(result);
                        }

                        MonitorCommand::UpdateInterval { interval_secs } => {
                            debug!("updating interval to {interval_secs}s");
                            self.interval_duration = Duration::from_secs(interval_secs);
                            ticker = interval(self.interval_duration);
                        }

                        MonitorCommand::Shutdown => {
                            debug!("received shutdown command");
                            break;
                        }
                    }
                }

                else => {
                    warn!("command channel closed, shutting down");
                    break;
                }
            }
        }

        debug!("monitor actor stopped");
    }

    /// Run one cycle with a panic fence around it.
    ///
    /// The loop must survive anything a cycle does, including bugs that
    /// panic; those become ordinary logged errors here.
    async fn guarded_cycle(&self) -> Result<CycleOutcome> {
        match AssertUnwindSafe(self.run_cycle()).catch_unwind().await {
            Ok(result) => result,
            Err(panic) => {
                let msg = panic
                    .downcast_ref::<&str>()
                    .map(|s| s.to_string())
                    .or_else(|| panic.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "unknown panic".to_string());
                Err(anyhow!("cycle panicked: {msg}"))
            }
        }
    }

    /// One collect/evaluate/dispatch pass.
    ///
    /// Settings are read once at the top and used for the whole cycle, so
    /// concurrent edits through the API only affect the next cycle.
    async fn run_cycle(&self) -> Result<CycleOutcome> {
        info!("checking cluster for alerts");

        let settings = self
            .store
            .monitoring_settings()
            .await
            .context("failed to read monitoring settings")?;
        let toggles = self
            .store
            .alert_toggles()
            .await
            .context("failed to read alert toggles")?;

        let Some(proxmox) = settings.proxmox_configured() else {
            info!("no cluster endpoint configured, skipping cycle");
            return Ok(CycleOutcome::Skipped);
        };

        let client = ProxmoxClient::new(proxmox)?;
        let snapshots = client.collect_node_snapshots().await?;

        for snapshot in &snapshots {
            info!(
                "node {}: cpu={:.2} mem={}/{} disk={}/{}",
                snapshot.node,
                snapshot.cpu,
                snapshot.mem_used,
                snapshot.mem_total,
                snapshot.disk_used,
                snapshot.disk_total
            );
        }

        let events = evaluate_nodes(&snapshots, &settings.thresholds, &toggles);

        let dispatcher = AlertDispatcher::from_settings(&settings);
        let dispatch = dispatcher.dispatch(&events).await;

        debug!(
            "cycle complete: {} nodes, {} alerts, {} deliveries ({} failed)",
            snapshots.len(),
            events.len(),
            dispatch.delivered,
            dispatch.failed
        );

        Ok(CycleOutcome::Completed {
            nodes: snapshots.len(),
            alerts: events.len(),
            dispatch,
        })
    }
}

/// Handle for controlling a [`MonitorActor`].
///
/// Cloneable; the owner uses it to drive shutdown or trigger an immediate
/// check outside the schedule.
#[derive(Clone)]
pub struct MonitorHandle {
    sender: mpsc::Sender<MonitorCommand>,
}

impl MonitorHandle {
    /// Spawn the actor as a tokio task and return a handle to it.
    pub fn spawn(store: SettingsStore, interval_duration: Duration) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel(32);

        let actor = MonitorActor::new(store, cmd_rx, interval_duration);
        tokio::spawn(actor.run());

        Self { sender: cmd_tx }
    }

    /// Run a cycle immediately, bypassing the timer.
    pub async fn check_now(&self) -> Result<CycleOutcome> {
        let (tx, rx) = oneshot::channel();
        self.sender
            .send(MonitorCommand::CheckNow { respond_to: tx })
            .await
            .context("failed to send CheckNow command")?;

        rx.await.context("failed to receive response")?
    }

    /// Change the cycle period.
    pub async fn update_interval(&self, interval_secs: u64) -> Result<()> {
        self.sender
            .send(MonitorCommand::UpdateInterval { interval_secs })
            .await
            .context("failed to send UpdateInterval command")?;
        Ok(())
    }

    /// Gracefully stop the monitor.
    pub async fn shutdown(&self) -> Result<()> {
        self.sender
            .send(MonitorCommand::Shutdown)
            .await
            .context("failed to send Shutdown command")?;
        Ok(())
    }
}
