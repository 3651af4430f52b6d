use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// A message mirrored from the upstream provider into local storage.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: String,
    pub email_id: String,
    /// Upstream provider id, used for deduplication across polls.
    pub mail_tm_message_id: Option<String>,
    pub sender: String,
    pub subject: String,
    pub body: String,
    pub is_read: bool,
    /// Mirror-sync time, not the upstream timestamp.
    pub received_at: DateTime<Utc>,
}

pub struct NewMessage<'a> {
    pub email_id: &'a str,
    pub mail_tm_message_id: Option<&'a str>,
    pub sender: &'a str,
    pub subject: &'a str,
    pub body: &'a str,
    pub received_at: DateTime<Utc>,
}
