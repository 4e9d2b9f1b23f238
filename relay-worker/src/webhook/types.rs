//! Payload sent to the webhook.

use serde::{Deserialize, Serialize};

/// A confirmation code captured from an email subject.
///
/// Built once per delivered email, posted once, then dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationCode {
    /// Normalized (lowercased) recipient address
    pub email: String,
    /// Captured confirmation code token
    pub code: String,
}

impl VerificationCode {
    pub fn new(email: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            code: code.into(),
        }
    }
}
