//! Outbound webhook delivery.
//!
//! ```text
//! Relay → VerificationCode → POST <base>/webhook
//! ```

pub mod client;
pub mod types;

pub use client::WebhookClient;
pub use types::VerificationCode;
