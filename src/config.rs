//! Settings documents shared by the monitor loop and the API surface.
//!
//! Everything here is plain data: the monitor re-reads these documents from
//! the settings store at the start of every cycle, so edits made through the
//! API take effect on the next pass without a restart.

/// Connection details for the cluster manager API.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ProxmoxSettings {
    /// Host name or address, optionally with a scheme and port.
    pub host: String,
    /// API token id, e.g. `monitor@pve!dashboard`.
    pub token_id: String,
    /// Secret half of the API token.
    pub token_secret: String,
    /// Skip TLS certificate verification (self-signed cluster certs).
    #[serde(default)]
    pub insecure_tls: bool,
}

impl ProxmoxSettings {
    /// Base URL of the JSON API, derived from `host`.
    ///
    /// A bare host gets `https://` prepended; an explicit `http://` or
    /// `https://` prefix is preserved. Trailing slashes are stripped so the
    /// result can be joined with path segments directly.
    pub fn base_url(&self) -> String {
        let host = self.host.trim().trim_end_matches('/');
        if host.starts_with("http://") || host.starts_with("https://") {
            format!("{host}/api2/json")
        } else {
            format!("https://{host}/api2/json")
        }
    }

    /// Value for the `Authorization` header.
    pub fn auth_header(&self) -> String {
        format!("PVEAPIToken={}={}", self.token_id, self.token_secret)
    }
}

/// Alert thresholds as fractions of capacity. An alert fires strictly above
/// the threshold, never at it.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Thresholds {
    #[serde(default = "default_cpu_threshold")]
    pub cpu: f64,
    #[serde(default = "default_ram_threshold")]
    pub ram: f64,
    #[serde(default = "default_disk_threshold")]
    pub disk: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Thresholds {
            cpu: default_cpu_threshold(),
            ram: default_ram_threshold(),
            disk: default_disk_threshold(),
        }
    }
}

impl Thresholds {
    /// Thresholds must sit in `(0, 1]`; zero or negative values would fire
    /// on idle nodes and values above 1 can never fire.
    pub fn validate(&self) -> Result<(), String> {
        for (name, value) in [("cpu", self.cpu), ("ram", self.ram), ("disk", self.disk)] {
            if !(value > 0.0 && value <= 1.0) {
                return Err(format!(
                    "threshold '{name}' must be within (0, 1], got {value}"
                ));
            }
        }
        Ok(())
    }
}

fn default_cpu_threshold() -> f64 {
    0.90
}

fn default_ram_threshold() -> f64 {
    0.90
}

fn default_disk_threshold() -> f64 {
    0.85
}

/// Telegram delivery target (bot token + chat).
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TelegramSettings {
    #[serde(default)]
    pub enabled: bool,
    pub bot_token: String,
    pub chat_id: String,
    /// Override for tests or proxies; the bot token is appended to this.
    #[serde(default = "default_telegram_api_base")]
    pub api_base: String,
}

impl TelegramSettings {
    pub fn is_configured(&self) -> bool {
        !self.bot_token.is_empty() && !self.chat_id.is_empty()
    }
}

fn default_telegram_api_base() -> String {
    "https://api.telegram.org".to_string()
}

/// Discord delivery target (bot token + channel).
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DiscordSettings {
    #[serde(default)]
    pub enabled: bool,
    pub bot_token: String,
    pub channel_id: String,
    /// Override for tests or proxies.
    #[serde(default = "default_discord_api_base")]
    pub api_base: String,
}

impl DiscordSettings {
    pub fn is_configured(&self) -> bool {
        !self.bot_token.is_empty() && !self.channel_id.is_empty()
    }
}

fn default_discord_api_base() -> String {
    "https://discord.com/api/v10".to_string()
}

/// The full monitoring settings document. A missing section simply disables
/// the feature it configures.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MonitoringSettings {
    pub proxmox: Option<ProxmoxSettings>,
    #[serde(default)]
    pub thresholds: Thresholds,
    pub telegram: Option<TelegramSettings>,
    pub discord: Option<DiscordSettings>,
}

impl MonitoringSettings {
    /// The cluster connection, if one is usable. An empty host counts as
    /// unconfigured just like a missing section.
    pub fn proxmox_configured(&self) -> Option<&ProxmoxSettings> {
        self.proxmox.as_ref().filter(|p| !p.host.trim().is_empty())
    }

    pub fn validate(&self) -> Result<(), String> {
        self.thresholds.validate()
    }
}

/// Per-resource alert switches, kept separate from the settings document so
/// alerts can be silenced without touching credentials. Everything starts
/// off.
#[derive(Debug, Clone, Copy, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AlertToggles {
    #[serde(default)]
    pub cpu: bool,
    #[serde(default)]
    pub ram: bool,
    #[serde(default)]
    pub disk: bool,
}

impl AlertToggles {
    pub fn any_enabled(&self) -> bool {
        self.cpu || self.ram || self.disk
    }
}
