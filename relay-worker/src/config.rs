//! Configuration module for environment variable parsing.
//!
//! Reads all configuration from environment variables. Values are only
//! validated when the relay is built from them, see [`crate::relay::Relay::from_config`].

use std::env;
use std::time::Duration;
use tracing::warn;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the webhook receiver; `/webhook` is appended to it
    pub webhook_base_url: String,

    /// Domain accepted in `users+<digits>@<domain>` recipients
    pub recipient_domain: String,

    /// Optional timeout for the outbound webhook call in milliseconds
    pub request_timeout_ms: Option<u64>,

    /// Port for the web server to listen on
    pub port: u16,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Config {
            webhook_base_url: env::var("WEBHOOK_BASE_URL")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| "http://localhost:8000".to_string()),

            recipient_domain: env::var("RECIPIENT_DOMAIN")
                .ok()
                .map(|v| v.trim().to_lowercase())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| "tgopi.com".to_string()),

            request_timeout_ms: parse_optional_u64("REQUEST_TIMEOUT_MS"),

            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8080),
        }
    }

    /// Full URL of the webhook endpoint.
    pub fn webhook_url(&self) -> String {
        format!("{}/webhook", self.webhook_base_url.trim_end_matches('/'))
    }

    /// Outbound request timeout, if one is configured.
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_ms.map(Duration::from_millis)
    }
}

/// Parse an optional positive integer, warning when the value is unusable.
fn parse_optional_u64(name: &str) -> Option<u64> {
    let raw = env::var(name).ok()?;

    match raw.trim().parse::<u64>() {
        Ok(0) | Err(_) => {
            warn!(env_var = name, value = %raw, "Invalid value, ignoring");
            None
        }
        Ok(v) => Some(v),
    }
}
