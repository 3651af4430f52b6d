use crate::core::AppState;
use chrono::Utc;
use db::models::mailbox::Mailbox;
use db::models::message::{Message, NewMessage};
use db::services::error::ServiceError;
use db::services::message;
use tracing::{info, warn};

/// Pulls new upstream messages into local storage and returns the mailbox's
/// full local view, newest first.
///
/// Idempotent: the unique index on (mailbox, upstream message id) makes
/// repeated polls and concurrent pollers insert-or-ignore rather than
/// duplicate. An unbound mailbox (no token) or an unreachable provider
/// degrades to the local view alone.
pub async fn sync_mailbox(
    state: &AppState,
    mailbox: &Mailbox,
) -> Result<Vec<Message>, ServiceError> {
    if let Some(token) = &mailbox.mail_tm_token {
        match state.mailtm.list_messages(token).await {
            Ok(upstream) => {
                let mut inserted = 0u32;
                for msg in &upstream {
                    let sender = msg
                        .from
                        .as_ref()
                        .map(|f| f.address.as_str())
                        .filter(|a| !a.is_empty())
                        .unwrap_or("unknown");
                    // Fall back to the intro snippet when the full text is
                    // missing from the summary payload.
                    let body = if msg.text.is_empty() { &msg.intro } else { &msg.text };

                    let new = NewMessage {
                        email_id: &mailbox.id,
                        mail_tm_message_id: Some(&msg.id),
                        sender,
                        subject: &msg.subject,
                        body,
                        // Mirror-sync time, not the upstream timestamp:
                        // upstream clocks are not guaranteed comparable.
                        received_at: Utc::now(),
                    };
                    if message::insert_mirrored(&state.db_pool, &new).await? {
                        inserted += 1;
                    }
                }
                if inserted > 0 {
                    info!(email = %mailbox.email, inserted, "mirrored new upstream messages");
                }
            }
            Err(e) => {
                warn!(email = %mailbox.email, "upstream message fetch failed, serving local view: {e}")
            }
        }
    }

    message::list_by_mailbox(&state.db_pool, &mailbox.id).await
}
