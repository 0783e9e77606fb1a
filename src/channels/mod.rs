//! Notification channel senders.
//!
//! Each channel implements [`ChannelSender`]: deliver one already-formatted
//! message with a single outbound call, report the outcome, never retry.
//! Channels know nothing about each other; the dispatcher decides which of
//! them to invoke and absorbs their failures independently.

pub mod discord;
pub mod telegram;

use anyhow::Result;
use async_trait::async_trait;

pub use discord::DiscordSender;
pub use telegram::TelegramSender;

/// Timeout for one delivery attempt, in seconds.
pub(crate) const SEND_TIMEOUT_SECS: u64 = 5;

/// One-shot message delivery to a single external channel.
///
/// Implementations must be `Send + Sync`; the dispatcher keeps them boxed
/// and calls them from the monitor task.
#[async_trait]
pub trait ChannelSender: Send + Sync {
    /// Channel name used in log lines ("telegram", "discord").
    fn name(&self) -> &'static str;

    /// Deliver a single message. An `Err` covers network failures, non-2xx
    /// statuses and timeouts alike; the caller only needs delivered-or-not.
    async fn send(&self, message: &str) -> Result<()>;
}
