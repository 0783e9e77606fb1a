//! Fan-out of alert events to the configured notification channels.

use tracing::{error, info, instrument, warn};

use crate::channels::{ChannelSender, DiscordSender, TelegramSender};
use crate::config::MonitoringSettings;
use crate::evaluator::AlertEvent;

/// Delivery counters for one dispatch pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchSummary {
    pub attempted: usize,
    pub delivered: usize,
    pub failed: usize,
}

/// Holds the channels active for one cycle and fans alert events out to
/// them. Channels fail independently; one broken channel never blocks the
/// other, and a failed delivery is never retried.
pub struct AlertDispatcher {
    senders: Vec<Box<dyn ChannelSender>>,
}

impl AlertDispatcher {
    pub fn new(senders: Vec<Box<dyn ChannelSender>>) -> Self {
        Self { senders }
    }

    /// Build the dispatcher from a settings snapshot.
    ///
    /// A channel takes part only when its section is present, enabled, and
    /// fully configured with both credential parts.
    pub fn from_settings(settings: &MonitoringSettings) -> Self {
        let mut senders: Vec<Box<dyn ChannelSender>> = Vec::new();

        if let Some(telegram) = &settings.telegram {
            if telegram.enabled && telegram.is_configured() {
                match TelegramSender::new(telegram.clone()) {
                    Ok(sender) => senders.push(Box::new(sender)),
                    Err(e) => warn!("skipping telegram channel: {e:#}"),
                }
            }
        }

        if let Some(discord) = &settings.discord {
            if discord.enabled && discord.is_configured() {
                match DiscordSender::new(discord.clone()) {
                    Ok(sender) => senders.push(Box::new(sender)),
                    Err(e) => warn!("skipping discord channel: {e:#}"),
                }
            }
        }

        Self::new(senders)
    }

    pub fn channel_count(&self) -> usize {
        self.senders.len()
    }

    /// Deliver every event to every active channel.
    #[instrument(skip_all, fields(events = events.len(), channels = self.senders.len()))]
    pub async fn dispatch(&self, events: &[AlertEvent]) -> DispatchSummary {
        let mut summary = DispatchSummary::default();

        for event in events {
            let message = event.message();
            info!(
                "alert: {} on {} at {:.1}%",
                event.resource, event.node, event.percent
            );

            for sender in &self.senders {
                summary.attempted += 1;
                match sender.send(&message).await {
                    Ok(()) => {
                        summary.delivered += 1;
                    }
                    Err(e) => {
                        summary.failed += 1;
                        error!("failed to deliver alert via {}: {e:#}", sender.name());
                    }
                }
            }
        }

        summary
    }
}
