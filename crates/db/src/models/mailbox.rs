use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A temporary mailbox row.
///
/// `email` is the user-visible address and the only one callers may show;
/// `actual_email` is the provider-compatible address used for every upstream
/// call. They differ when the visible domain is cosmetic.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Mailbox {
    pub id: String,
    pub email: String,
    pub domain: String,
    pub actual_email: Option<String>,
    pub mail_tm_token: Option<String>,
    pub mail_tm_id: Option<String>,
    pub expires_at: DateTime<Utc>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Insert parameters for a new mailbox.
pub struct NewMailbox<'a> {
    pub email: &'a str,
    pub domain: &'a str,
    pub actual_email: Option<&'a str>,
    pub mail_tm_token: Option<&'a str>,
    pub mail_tm_id: Option<&'a str>,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

// DTO for the generate request body.
#[derive(Debug, Default, Deserialize)]
pub struct GenerateRequest {
    pub domain: Option<String>,
}

// DTO for the status endpoint. `time_remaining` is milliseconds, floored at 0.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MailboxStatus {
    pub email: String,
    pub is_active: bool,
    pub expires_at: DateTime<Utc>,
    pub time_remaining: i64,
}
