//! Discord bot channel.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::{info, instrument};

use crate::config::DiscordSettings;

use super::{ChannelSender, SEND_TIMEOUT_SECS};

#[derive(Debug, Clone, Serialize)]
struct CreateMessage<'a> {
    content: &'a str,
}

/// Posts messages into a Discord channel via the bot API.
#[derive(Debug, Clone)]
pub struct DiscordSender {
    client: Client,
    settings: DiscordSettings,
}

impl DiscordSender {
    pub fn new(settings: DiscordSettings) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(SEND_TIMEOUT_SECS))
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self { client, settings })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/channels/{}/messages",
            self.settings.api_base.trim_end_matches('/'),
            self.settings.channel_id
        )
    }
}

#[async_trait]
impl ChannelSender for DiscordSender {
    fn name(&self) -> &'static str {
        "discord"
    }

    #[instrument(skip(self, message))]
    async fn send(&self, message: &str) -> Result<()> {
        let payload = CreateMessage { content: message };

        let response = self
            .client
            .post(self.endpoint())
            .header("Authorization", format!("Bot {}", self.settings.bot_token))
            .json(&payload)
            .send()
            .await
            .context("failed to send Discord message")?;

        if !response.status().is_success() {
            anyhow::bail!("Discord API returned status {}", response.status());
        }

        info!("alert sent to Discord");
        Ok(())
    }
}
