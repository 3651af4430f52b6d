use crate::services::error::ServiceError;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;

/// Deletes every mailbox whose expiry has passed, together with its mirrored
/// messages. Messages go first for referential cleanliness; no foreign-key
/// cascade is assumed. Returns the number of mailboxes removed.
pub async fn sweep_expired(pool: &SqlitePool, now: DateTime<Utc>) -> Result<u64, ServiceError> {
    let messages = sqlx::query(
        "DELETE FROM messages WHERE email_id IN \
         (SELECT id FROM temporary_emails WHERE expires_at <= ?)",
    )
    .bind(now)
    .execute(pool)
    .await?;

    let mailboxes = sqlx::query("DELETE FROM temporary_emails WHERE expires_at <= ?")
        .bind(now)
        .execute(pool)
        .await?;

    debug!(
        mailboxes = mailboxes.rows_affected(),
        messages = messages.rows_affected(),
        "expiry sweep pass"
    );
    Ok(mailboxes.rows_affected())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::mailbox::NewMailbox;
    use crate::models::message::NewMessage;
    use crate::services::mailbox::{create_mailbox, find_by_address};
    use crate::services::message::{insert_mirrored, list_by_mailbox};
    use chrono::Duration;

    async fn mailbox_expiring_at(
        pool: &SqlitePool,
        email: &str,
        expires_at: DateTime<Utc>,
    ) -> String {
        let mailbox = create_mailbox(
            pool,
            &NewMailbox {
                email,
                domain: "example.test",
                actual_email: None,
                mail_tm_token: None,
                mail_tm_id: None,
                expires_at,
                created_at: expires_at - Duration::minutes(10),
            },
        )
        .await
        .unwrap();
        mailbox.id
    }

    #[tokio::test]
    async fn sweep_removes_expired_mailboxes_and_their_messages() {
        let pool = crate::test_pool().await;
        let now = Utc::now();

        let expired = mailbox_expiring_at(&pool, "gone@example.test", now - Duration::seconds(1)).await;
        let live = mailbox_expiring_at(&pool, "live@example.test", now + Duration::minutes(5)).await;

        for (email_id, upstream_id) in [(&expired, "up-1"), (&live, "up-2")] {
            insert_mirrored(
                &pool,
                &NewMessage {
                    email_id,
                    mail_tm_message_id: Some(upstream_id),
                    sender: "s@example.org",
                    subject: "",
                    body: "",
                    received_at: now,
                },
            )
            .await
            .unwrap();
        }

        let deleted = sweep_expired(&pool, now).await.unwrap();
        assert_eq!(deleted, 1);

        assert!(find_by_address(&pool, "gone@example.test").await.unwrap().is_none());
        assert!(list_by_mailbox(&pool, &expired).await.unwrap().is_empty());

        // Unexpired data is untouched.
        assert!(find_by_address(&pool, "live@example.test").await.unwrap().is_some());
        assert_eq!(list_by_mailbox(&pool, &live).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn sweep_on_empty_database_deletes_nothing() {
        let pool = crate::test_pool().await;
        assert_eq!(sweep_expired(&pool, Utc::now()).await.unwrap(), 0);
    }
}
