//! Web server module for receiving inbound email events.
//!
//! This module provides a thin web server that:
//! - Receives email events from a Cloudflare email worker or a Mailgun route
//! - Runs each one through the relay before responding
//! - Maps a rejected recipient onto a 422 so the caller can refuse the message

pub mod handlers;

pub use handlers::{
    cloudflare_email_webhook, health, mailgun_email_webhook, AppState, HealthResponse,
    RelayResponse,
};
