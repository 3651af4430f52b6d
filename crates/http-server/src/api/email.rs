use crate::core::{ApiError, AppState};
use crate::lifecycle;
use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;
use db::models::domain::Domain;
use db::models::mailbox::{GenerateRequest, Mailbox, MailboxStatus};
use db::services::{cleanup, domain, mailbox};
use serde_json::{json, Value};
use tracing::info;

/// GET /api/domains — active domains only.
pub async fn list_domains_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<Domain>>, ApiError> {
    let domains = domain::list_active(&state.db_pool).await?;
    Ok(Json(domains))
}

/// POST /api/generate — creates a mailbox. The body (and the domain inside
/// it) is optional; the server picks a default when absent.
#[axum::debug_handler]
pub async fn generate_email_handler(
    State(state): State<AppState>,
    payload: Option<Json<GenerateRequest>>,
) -> Result<Json<Mailbox>, ApiError> {
    let request = payload.map(|Json(body)| body).unwrap_or_default();

    if let Some(ref requested) = request.domain {
        validate_domain(requested)?;
    }

    let mailbox = lifecycle::generate_mailbox(&state, request.domain.as_deref()).await?;
    Ok(Json(mailbox))
}

/// GET /api/email/:email/status — reports on any known row, expired or not,
/// with `timeRemaining` in milliseconds floored at zero.
pub async fn email_status_handler(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<MailboxStatus>, ApiError> {
    let mailbox = mailbox::find_by_address(&state.db_pool, &email)
        .await?
        .ok_or(ApiError::NotFound("Email not found"))?;

    let time_remaining = (mailbox.expires_at - Utc::now()).num_milliseconds().max(0);

    Ok(Json(MailboxStatus {
        email: mailbox.email,
        is_active: mailbox.is_active && time_remaining > 0,
        expires_at: mailbox.expires_at,
        time_remaining,
    }))
}

/// POST /api/cleanup — manual trigger of the sweeper's delete pass.
pub async fn cleanup_handler(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let deleted = cleanup::sweep_expired(&state.db_pool, Utc::now()).await?;
    if deleted > 0 {
        info!(deleted, "manual cleanup removed expired mailboxes");
    }
    Ok(Json(json!({ "success": true })))
}

/// A requested domain must look like a hostname; an unknown-but-well-formed
/// one is not an error (the lifecycle manager falls back to a default).
fn validate_domain(domain: &str) -> Result<(), ApiError> {
    if domain.is_empty() || domain.len() > 253 {
        return Err(ApiError::Validation(
            "Domain must be between 1 and 253 characters.".to_string(),
        ));
    }
    if !domain
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '.' || c == '-')
    {
        return Err(ApiError::Validation(
            "Domain can only contain lowercase letters, digits, dots and hyphens.".to_string(),
        ));
    }
    Ok(())
}
