//! Telegram bot channel.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::{info, instrument};

use crate::config::TelegramSettings;

use super::{ChannelSender, SEND_TIMEOUT_SECS};

#[derive(Debug, Clone, Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: &'a str,
}

/// Sends messages through the Telegram bot API (`sendMessage`).
#[derive(Debug, Clone)]
pub struct TelegramSender {
    client: Client,
    settings: TelegramSettings,
}

impl TelegramSender {
    pub fn new(settings: TelegramSettings) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(SEND_TIMEOUT_SECS))
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self { client, settings })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/bot{}/sendMessage",
            self.settings.api_base.trim_end_matches('/'),
            self.settings.bot_token
        )
    }
}

#[async_trait]
impl ChannelSender for TelegramSender {
    fn name(&self) -> &'static str {
        "telegram"
    }

    #[instrument(skip(self, message))]
    async fn send(&self, message: &str) -> Result<()> {
        let payload = SendMessage {
            chat_id: &self.settings.chat_id,
            text: message,
        };

        let response = self
            .client
            .post(self.endpoint())
            .json(&payload)
            .send()
            .await
            .context("failed to send Telegram message")?;

        if !response.status().is_success() {
            anyhow::bail!("Telegram API returned status {}", response.status());
        }

        info!("alert sent to Telegram");
        Ok(())
    }
}
