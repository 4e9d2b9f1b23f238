//! Mailgun inbound route payloads.
//!
//! Mailgun posts a form with the recipient, the decoded subject and the full
//! header list as a JSON array of `[name, value]` pairs.

use serde::Deserialize;
use tracing::{info, warn};

use crate::relay::InboundEmail;

/// Mailgun form payload.
///
/// Field names use hyphens, which are aliased here.
#[derive(Debug, Clone, Deserialize)]
pub struct MailgunForm {
    pub recipient: String,
    #[serde(default)]
    pub sender: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default, rename = "message-headers")]
    pub message_headers: Option<String>,
}

/// Convert a Mailgun form into an [`InboundEmail`].
///
/// The header list wins; the `subject` field is only used when the list
/// carries no Subject header.
pub fn mailgun_email(form: MailgunForm) -> InboundEmail {
    let headers = parse_message_headers(form.message_headers.as_deref());

    let mut email = InboundEmail {
        recipient: form.recipient,
        headers,
    };

    if email.subject().is_none() && !form.subject.is_empty() {
        email.headers.push(("Subject".to_string(), form.subject));
    }

    info!(
        recipient = %email.recipient,
        sender = %form.sender,
        header_count = email.headers.len(),
        "mailgun_email_decoded"
    );

    email
}

/// Parse Mailgun's message-headers JSON string.
///
/// Mailgun provides headers as a JSON array of [name, value] pairs, e.g.:
/// `[["Message-Id", "<abc123@example.com>"], ["Subject", "Hello"], ...]`
fn parse_message_headers(message_headers: Option<&str>) -> Vec<(String, String)> {
    let Some(headers) = message_headers.filter(|h| !h.trim().is_empty()) else {
        return Vec::new();
    };

    match serde_json::from_str::<Vec<Vec<String>>>(headers) {
        Ok(pairs) => pairs
            .into_iter()
            .filter_map(|pair| {
                let mut pair = pair.into_iter();
                Some((pair.next()?, pair.next()?))
            })
            .collect(),
        Err(e) => {
            let preview: String = headers.chars().take(200).collect();
            warn!(
                error = %e,
                headers_preview = %preview,
                "mailgun_headers_parse_failed"
            );
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(subject: &str, message_headers: Option<&str>) -> MailgunForm {
        MailgunForm {
            recipient: "Users+9@tgopi.com".to_string(),
            sender: "no-reply@slack.com".to_string(),
            subject: subject.to_string(),
            message_headers: message_headers.map(str::to_string),
        }
    }

    #[test]
    fn test_mailgun_email_from_headers() {
        let email = mailgun_email(form(
            "ignored",
            Some(r#"[["Message-Id", "<abc@example.com>"], ["Subject", "Slack confirmation code: MG-1"]]"#),
        ));

        assert_eq!(email.recipient, "Users+9@tgopi.com");
        assert_eq!(email.subject(), Some("Slack confirmation code: MG-1"));
        assert_eq!(email.header("message-id"), Some("<abc@example.com>"));
    }

    #[test]
    fn test_mailgun_email_subject_fallback() {
        let email = mailgun_email(form("Slack confirmation code: MG-2", None));

        assert_eq!(email.subject(), Some("Slack confirmation code: MG-2"));
    }

    #[test]
    fn test_mailgun_email_malformed_headers() {
        let email = mailgun_email(form("Slack confirmation code: MG-3", Some("not json")));

        assert_eq!(email.headers.len(), 1);
        assert_eq!(email.subject(), Some("Slack confirmation code: MG-3"));
    }

    #[test]
    fn test_parse_message_headers_skips_short_pairs() {
        let headers = parse_message_headers(Some(r#"[["X-Lonely"], ["Subject", "Hi"]]"#));

        assert_eq!(headers, vec![("Subject".to_string(), "Hi".to_string())]);
    }
}
