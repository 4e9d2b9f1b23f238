//! Inbound email decoding.
//!
//! Turns what each delivery surface receives into an [`InboundEmail`]:
//!
//! ```text
//! raw RFC 5322 (pipe)      → parse_raw_email()   ┐
//! Cloudflare JSON event    → cloudflare_email()  ├→ InboundEmail → Relay
//! Mailgun inbound form     → mailgun_email()     ┘
//! ```
//!
//! [`InboundEmail`]: crate::relay::InboundEmail

pub mod cloudflare;
pub mod email_parser;
pub mod mailgun;

pub use cloudflare::{cloudflare_email, CloudflareEmail};
pub use email_parser::parse_raw_email;
pub use mailgun::{mailgun_email, MailgunForm};
