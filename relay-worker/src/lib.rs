//! Code Relay - inbound email verification code relay.
//!
//! This library provides shared modules for the two relay binaries:
//! - `coderelay-web`: Web server receiving email events from Cloudflare or Mailgun
//! - `coderelay-pipe`: MTA pipe transport reading a raw message on stdin
//!
//! ## Architecture
//!
//! ```text
//! Inbound email → inbound decoding → Relay → POST <base>/webhook
//! ```

pub mod config;
pub mod error;
pub mod inbound;
pub mod relay;
pub mod web;
pub mod webhook;

// Re-export commonly used types
pub use config::Config;
pub use error::{ConfigError, DeliveryError};
pub use inbound::parse_raw_email;
pub use relay::{Disposition, InboundEmail, Relay, REJECT_REASON};
pub use web::AppState;
pub use webhook::{VerificationCode, WebhookClient};
