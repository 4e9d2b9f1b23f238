//! HTTP client for posting verification codes.
//!
//! One client is built at startup and shared by every invocation; it holds
//! no per-request state.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use tracing::debug;
use url::Url;

use super::types::VerificationCode;
use crate::error::{ConfigError, DeliveryError};

/// Posts [`VerificationCode`] payloads to a fixed webhook URL.
#[derive(Clone)]
pub struct WebhookClient {
    inner: Arc<WebhookClientInner>,
}

struct WebhookClientInner {
    url: Url,
    http: Client,
}

impl WebhookClient {
    /// Create a client for the given webhook URL.
    ///
    /// Without a timeout the reqwest defaults apply.
    pub fn new(url: &str, timeout: Option<Duration>) -> Result<Self, ConfigError> {
        let parsed = Url::parse(url).map_err(|e| ConfigError::InvalidWebhookUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidWebhookUrl {
                url: url.to_string(),
                reason: format!("unsupported scheme {}", parsed.scheme()),
            });
        }

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(ConfigError::HttpClient)?;

        Ok(Self {
            inner: Arc::new(WebhookClientInner { url: parsed, http }),
        })
    }

    /// The endpoint codes are posted to.
    pub fn url(&self) -> &str {
        self.inner.url.as_str()
    }

    /// Post a code as JSON and return the response status on 2xx.
    ///
    /// The response body is never read.
    pub async fn send(&self, code: &VerificationCode) -> Result<u16, DeliveryError> {
        debug!(url = %self.inner.url, email = %code.email, "webhook_post_starting");

        let response = self
            .inner
            .http
            .post(self.inner.url.clone())
            .json(code)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            Ok(status.as_u16())
        } else {
            Err(DeliveryError::Status(status.as_u16()))
        }
    }
}
