//! Cloudflare email worker events.
//!
//! An email worker forwards each message as JSON. The raw RFC 5322 content
//! is preferred for header lookup; the `subject` field covers workers that
//! only forward the envelope and subject.

use serde::Deserialize;
use tracing::{info, warn};

use crate::inbound::email_parser::parse_raw_email;
use crate::relay::InboundEmail;

/// Cloudflare JSON payload.
#[derive(Debug, Clone, Deserialize)]
pub struct CloudflareEmail {
    pub to: String,
    #[serde(default, rename = "from")]
    pub from_field: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub raw_content: Option<String>,
}

/// Convert a Cloudflare event into an [`InboundEmail`].
pub fn cloudflare_email(payload: CloudflareEmail) -> InboundEmail {
    info!(
        to = %payload.to,
        from = ?payload.from_field,
        has_raw_content = payload.raw_content.is_some(),
        "cloudflare_email_decoding"
    );

    let parsed = payload
        .raw_content
        .as_deref()
        .filter(|raw| !raw.trim().is_empty())
        .and_then(|raw| match parse_raw_email(raw.as_bytes(), &payload.to) {
            Ok(email) => Some(email),
            Err(e) => {
                // Fall back to the JSON subject field
                warn!(error = %e, "cloudflare_email_parse_failed");
                None
            }
        });

    let mut email = parsed.unwrap_or_else(|| InboundEmail::new(payload.to.clone()));

    if email.subject().is_none() {
        if let Some(subject) = payload.subject {
            email.headers.push(("Subject".to_string(), subject));
        }
    }

    email
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cloudflare_email_raw_content() {
        let payload = CloudflareEmail {
            to: "users+7@tgopi.com".to_string(),
            from_field: Some("no-reply@slack.com".to_string()),
            subject: Some("stale".to_string()),
            raw_content: Some(
                "Subject: Slack confirmation code: CF-77\r\n\r\nbody\r\n".to_string(),
            ),
        };

        let email = cloudflare_email(payload);

        assert_eq!(email.recipient, "users+7@tgopi.com");
        assert_eq!(email.subject(), Some("Slack confirmation code: CF-77"));
    }

    #[test]
    fn test_cloudflare_email_subject_only() {
        let payload: CloudflareEmail = serde_json::from_str(
            r#"{"to": "users+7@tgopi.com", "subject": "Slack confirmation code: CF-1"}"#,
        )
        .unwrap();

        let email = cloudflare_email(payload);

        assert_eq!(email.subject(), Some("Slack confirmation code: CF-1"));
    }

    #[test]
    fn test_cloudflare_email_no_subject() {
        let payload: CloudflareEmail =
            serde_json::from_str(r#"{"to": "users+7@tgopi.com"}"#).unwrap();

        let email = cloudflare_email(payload);

        assert!(email.subject().is_none());
    }
}
