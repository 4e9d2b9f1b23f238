//! Inbound email endpoint handlers.
//!
//! Each handler decodes the provider payload, relays it, and answers with
//! the disposition. A rejected recipient answers 422 and an undecodable
//! payload 400; everything else is 200, since failures after the recipient
//! check are already logged by the relay.

use std::sync::Arc;

use axum::{
    extract::{
        rejection::{FormRejection, JsonRejection},
        Form, State,
    },
    http::StatusCode,
    Json,
};
use serde::Serialize;
use tracing::{info, warn};

use crate::inbound::{cloudflare_email, mailgun_email, CloudflareEmail, MailgunForm};
use crate::relay::{Disposition, InboundEmail, Relay};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub relay: Arc<Relay>,
}

impl AppState {
    pub fn new(relay: Relay) -> Self {
        Self {
            relay: Arc::new(relay),
        }
    }
}

// =============================================================================
// Health Check
// =============================================================================

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Health check endpoint.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

// =============================================================================
// Email Endpoints
// =============================================================================

/// Relay response.
#[derive(Debug, Serialize)]
pub struct RelayResponse {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<&'static str>,
}

/// Cloudflare email worker endpoint.
pub async fn cloudflare_email_webhook(
    State(state): State<AppState>,
    payload: Result<Json<CloudflareEmail>, JsonRejection>,
) -> (StatusCode, Json<RelayResponse>) {
    let Json(payload) = match payload {
        Ok(payload) => payload,
        Err(e) => return invalid_payload("cloudflare", &e.body_text()),
    };

    info!(to = %payload.to, "cloudflare_email_received");

    relay(&state, cloudflare_email(payload)).await
}

/// Mailgun inbound route endpoint.
///
/// Mailgun sends form-encoded data, not JSON.
pub async fn mailgun_email_webhook(
    State(state): State<AppState>,
    form: Result<Form<MailgunForm>, FormRejection>,
) -> (StatusCode, Json<RelayResponse>) {
    let Form(form) = match form {
        Ok(form) => form,
        Err(e) => return invalid_payload("mailgun", &e.body_text()),
    };

    info!(recipient = %form.recipient, "mailgun_email_received");

    relay(&state, mailgun_email(form)).await
}

/// Answer for a payload that failed to decode; distinct from a rejected recipient.
fn invalid_payload(provider: &str, error: &str) -> (StatusCode, Json<RelayResponse>) {
    warn!(provider = provider, error = %error, "email_payload_invalid");

    (
        StatusCode::BAD_REQUEST,
        Json(RelayResponse {
            status: "invalid_payload",
            reason: None,
        }),
    )
}

async fn relay(state: &AppState, email: InboundEmail) -> (StatusCode, Json<RelayResponse>) {
    let disposition = state.relay.handle(&email).await;

    let status = match disposition {
        Disposition::Rejected { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        _ => StatusCode::OK,
    };

    (
        status,
        Json(RelayResponse {
            status: disposition.label(),
            reason: disposition.reject_reason(),
        }),
    )
}
