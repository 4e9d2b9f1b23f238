//! Error types for building and running the relay.

use thiserror::Error;

/// Errors raised while turning a [`crate::Config`] into a working relay.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid webhook URL {url:?}: {reason}")]
    InvalidWebhookUrl { url: String, reason: String },

    #[error("invalid recipient domain {domain:?}")]
    InvalidRecipientDomain { domain: String },

    #[error("failed to compile pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("failed to create HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
}

/// Failure to hand a verification code to the webhook.
///
/// The relay logs and swallows these; they never reach the invoker.
#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("webhook responded with status {0}")]
    Status(u16),

    #[error("webhook request failed: {0}")]
    Transport(#[from] reqwest::Error),
}
