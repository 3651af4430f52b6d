use crate::models::mailbox::{Mailbox, NewMailbox};
use crate::services::error::ServiceError;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use uuid::Uuid;

const MAILBOX_COLUMNS: &str = "id, email, domain, actual_email, mail_tm_token, mail_tm_id, \
     expires_at, is_active, created_at";

/// Inserts a new mailbox row and returns it.
///
/// The address is expected to be fresh randomness; a unique-constraint
/// violation here is the rare/fatal path and is surfaced, not retried.
pub async fn create_mailbox(
    pool: &SqlitePool,
    new: &NewMailbox<'_>,
) -> Result<Mailbox, ServiceError> {
    let record = sqlx::query_as::<_, Mailbox>(
        r#"
        INSERT INTO temporary_emails
            (id, email, domain, actual_email, mail_tm_token, mail_tm_id,
             expires_at, is_active, created_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, TRUE, ?)
        RETURNING id, email, domain, actual_email, mail_tm_token, mail_tm_id,
                  expires_at, is_active, created_at
        "#,
    )
    .bind(Uuid::new_v4().to_string())
    .bind(new.email)
    .bind(new.domain)
    .bind(new.actual_email)
    .bind(new.mail_tm_token)
    .bind(new.mail_tm_id)
    .bind(new.expires_at)
    .bind(new.created_at)
    .fetch_one(pool)
    .await?;

    Ok(record)
}

/// Finds a mailbox that is still readable: present, active, and not yet
/// expired. Inactive and past-expiry rows are uniformly treated as absent
/// even when the sweeper has not deleted them yet.
pub async fn find_active_by_address(
    pool: &SqlitePool,
    address: &str,
    now: DateTime<Utc>,
) -> Result<Option<Mailbox>, ServiceError> {
    let record = sqlx::query_as::<_, Mailbox>(&format!(
        "SELECT {MAILBOX_COLUMNS} FROM temporary_emails \
         WHERE email = ? AND is_active = TRUE AND expires_at > ?"
    ))
    .bind(address)
    .bind(now)
    .fetch_optional(pool)
    .await?;

    Ok(record)
}

/// Finds a mailbox regardless of expiry. The status endpoint reports on
/// expired-but-not-yet-swept rows, so it cannot use the active lookup.
pub async fn find_by_address(
    pool: &SqlitePool,
    address: &str,
) -> Result<Option<Mailbox>, ServiceError> {
    let record = sqlx::query_as::<_, Mailbox>(&format!(
        "SELECT {MAILBOX_COLUMNS} FROM temporary_emails WHERE email = ?"
    ))
    .bind(address)
    .fetch_optional(pool)
    .await?;

    Ok(record)
}
