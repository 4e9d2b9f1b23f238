//! Email verification relay.
//!
//! Decides what happens to one inbound email:
//!
//! ```text
//! InboundEmail → recipient check → subject code → POST webhook → Disposition
//!                     │                  │
//!                     └─ Rejected        └─ CodeNotFound
//! ```
//!
//! Every failure after the recipient check is logged and swallowed.

pub mod rules;
pub mod types;

use tracing::{error, info, warn};

use crate::error::{ConfigError, DeliveryError};
use crate::webhook::{VerificationCode, WebhookClient};
use crate::Config;

pub use rules::{normalize_recipient, CodeExtractor, RecipientRule, REJECT_REASON};
pub use types::{Disposition, InboundEmail};

/// Stateless relay shared by every invocation.
#[derive(Clone)]
pub struct Relay {
    recipients: RecipientRule,
    extractor: CodeExtractor,
    webhook: WebhookClient,
}

impl Relay {
    /// Build the relay from configuration, validating the domain and webhook URL.
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        let webhook = WebhookClient::new(&config.webhook_url(), config.request_timeout())?;
        Self::new(&config.recipient_domain, webhook)
    }

    pub fn new(recipient_domain: &str, webhook: WebhookClient) -> Result<Self, ConfigError> {
        Ok(Self {
            recipients: RecipientRule::for_domain(recipient_domain)?,
            extractor: CodeExtractor::new()?,
            webhook,
        })
    }

    pub fn recipient_domain(&self) -> &str {
        self.recipients.domain()
    }

    pub fn webhook_url(&self) -> &str {
        self.webhook.url()
    }

    /// Handle one inbound email.
    ///
    /// Only [`Disposition::Rejected`] needs action from the caller.
    pub async fn handle(&self, email: &InboundEmail) -> Disposition {
        let recipient = normalize_recipient(&email.recipient);
        info!(recipient = %recipient, "relay_email_received");

        if !self.recipients.matches(&recipient) {
            warn!(
                recipient = %recipient,
                reason = REJECT_REASON,
                "relay_recipient_rejected"
            );
            return Disposition::Rejected {
                reason: REJECT_REASON,
            };
        }

        // A missing subject is treated like one without a code
        let subject = email.subject().unwrap_or_default();

        let Some(code) = self.extractor.extract(subject) else {
            error!(
                recipient = %recipient,
                subject = %subject,
                "relay_code_not_found"
            );
            return Disposition::CodeNotFound {
                subject: subject.to_string(),
            };
        };

        let payload = VerificationCode::new(recipient, code);

        match self.webhook.send(&payload).await {
            Ok(status) => {
                info!(
                    recipient = %payload.email,
                    status_code = status,
                    "relay_webhook_delivered"
                );
                Disposition::Delivered {
                    email: payload.email,
                }
            }
            Err(DeliveryError::Status(status)) => {
                error!(
                    recipient = %payload.email,
                    status_code = status,
                    "relay_webhook_status_failed"
                );
                Disposition::DeliveryFailed {
                    email: payload.email,
                    status: Some(status),
                    error: DeliveryError::Status(status).to_string(),
                }
            }
            Err(e @ DeliveryError::Transport(_)) => {
                error!(
                    recipient = %payload.email,
                    error = %e,
                    "relay_webhook_transport_failed"
                );
                Disposition::DeliveryFailed {
                    email: payload.email,
                    status: None,
                    error: e.to_string(),
                }
            }
        }
    }
}
