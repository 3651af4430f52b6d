use crate::core::{ApiError, AppState};
use crate::mirror;
use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;
use db::models::message::Message;
use db::services::{mailbox, message};
use serde_json::{json, Value};

/// GET /api/messages/:id — the path segment is the visible address.
/// Missing, inactive, and expired mailboxes all read as 404; a mirror sync
/// runs as a side effect before the local view is returned.
pub async fn list_messages_handler(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<Vec<Message>>, ApiError> {
    let mailbox = mailbox::find_active_by_address(&state.db_pool, &email, Utc::now())
        .await?
        .ok_or(ApiError::NotFound("Email not found or expired"))?;

    let messages = mirror::sync_mailbox(&state, &mailbox).await?;
    Ok(Json(messages))
}

/// POST /api/messages/:id/read — idempotent; unknown ids are a no-op.
pub async fn mark_read_handler(
    State(state): State<AppState>,
    Path(message_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    message::mark_read(&state.db_pool, &message_id).await?;
    Ok(Json(json!({ "success": true })))
}
