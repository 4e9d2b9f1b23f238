//! Inbound event and outcome types for the relay.

/// An inbound email event: the envelope recipient plus its headers.
///
/// Headers keep their original order and casing; lookups are
/// case-insensitive and return the first match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InboundEmail {
    /// Envelope recipient as delivered, before normalization
    pub recipient: String,
    /// Top-level headers as (name, value) pairs
    pub headers: Vec<(String, String)>,
}

impl InboundEmail {
    pub fn new(recipient: impl Into<String>) -> Self {
        Self {
            recipient: recipient.into(),
            headers: Vec::new(),
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn with_subject(self, subject: impl Into<String>) -> Self {
        self.with_header("Subject", subject)
    }

    /// First value of the named header, ignoring ASCII case.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn subject(&self) -> Option<&str> {
        self.header("subject")
    }
}

/// Terminal outcome of relaying one email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Disposition {
    /// Recipient is not an allowed address; the message must be refused
    Rejected { reason: &'static str },
    /// Subject carried no confirmation code; dropped without a webhook call
    CodeNotFound { subject: String },
    /// The webhook accepted the code
    Delivered { email: String },
    /// The webhook call failed; `status` is set for non-2xx responses
    DeliveryFailed {
        email: String,
        status: Option<u16>,
        error: String,
    },
}

impl Disposition {
    /// Rejection reason to surface to the mail delivery layer, if any.
    pub fn reject_reason(&self) -> Option<&'static str> {
        match self {
            Disposition::Rejected { reason } => Some(reason),
            _ => None,
        }
    }

    /// Short snake_case label used in logs and HTTP responses.
    pub fn label(&self) -> &'static str {
        match self {
            Disposition::Rejected { .. } => "rejected",
            Disposition::CodeNotFound { .. } => "ignored",
            Disposition::Delivered { .. } => "relayed",
            Disposition::DeliveryFailed { .. } => "relay_failed",
        }
    }
}
