use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// A mailbox domain available for allocation.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Domain {
    pub id: String,
    pub domain: String,
    pub is_active: bool,
    pub updated_at: DateTime<Utc>,
}
