//! RFC 5322 header parsing using mailparse.
//!
//! Only the top-level headers are needed by the relay; the body is never
//! inspected.

use anyhow::{Context, Result};
use mailparse::parse_mail;
use tracing::{debug, info};

use crate::relay::InboundEmail;

/// Parse raw RFC 5322 email content into an [`InboundEmail`].
///
/// Header values are decoded, so RFC 2047 encoded-word subjects come back
/// as plain text.
///
/// # Arguments
///
/// * `raw_content` - Raw email bytes (headers + body)
/// * `recipient` - Envelope recipient supplied by the delivery layer
pub fn parse_raw_email(raw_content: &[u8], recipient: &str) -> Result<InboundEmail> {
    debug!(
        raw_content_length = raw_content.len(),
        recipient = %recipient,
        "email_parse_start"
    );

    let mail = parse_mail(raw_content).context("Failed to parse email")?;

    let headers: Vec<(String, String)> = mail
        .headers
        .iter()
        .map(|header| (header.get_key(), header.get_value()))
        .collect();

    let email = InboundEmail {
        recipient: recipient.to_string(),
        headers,
    };

    info!(
        header_count = email.headers.len(),
        has_subject = email.subject().is_some(),
        "email_parse_complete"
    );

    Ok(email)
}
