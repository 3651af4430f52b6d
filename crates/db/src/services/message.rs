use crate::models::message::{Message, NewMessage};
use crate::services::error::ServiceError;
use sqlx::SqlitePool;
use uuid::Uuid;

/// Inserts a mirrored message, ignoring it if one with the same
/// (mailbox, upstream message id) pair already exists. Returns whether a row
/// was actually written, so callers can tell new mail from a repeat poll.
pub async fn insert_mirrored(
    pool: &SqlitePool,
    new: &NewMessage<'_>,
) -> Result<bool, ServiceError> {
    let result = sqlx::query(
        r#"
        INSERT INTO messages
            (id, email_id, mail_tm_message_id, sender, subject, body, is_read, received_at)
        VALUES (?, ?, ?, ?, ?, ?, FALSE, ?)
        ON CONFLICT (email_id, mail_tm_message_id) DO NOTHING
        "#,
    )
    .bind(Uuid::new_v4().to_string())
    .bind(new.email_id)
    .bind(new.mail_tm_message_id)
    .bind(new.sender)
    .bind(new.subject)
    .bind(new.body)
    .bind(new.received_at)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// All locally stored messages for a mailbox, newest first.
pub async fn list_by_mailbox(
    pool: &SqlitePool,
    email_id: &str,
) -> Result<Vec<Message>, ServiceError> {
    let records = sqlx::query_as::<_, Message>(
        r#"
        SELECT id, email_id, mail_tm_message_id, sender, subject, body, is_read, received_at
        FROM messages
        WHERE email_id = ?
        ORDER BY received_at DESC, id
        "#,
    )
    .bind(email_id)
    .fetch_all(pool)
    .await?;

    Ok(records)
}

/// Marks a message read. Tolerant no-op when the message is already read or
/// does not exist.
pub async fn mark_read(pool: &SqlitePool, message_id: &str) -> Result<(), ServiceError> {
    sqlx::query("UPDATE messages SET is_read = TRUE WHERE id = ?")
        .bind(message_id)
        .execute(pool)
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::mailbox::NewMailbox;
    use crate::services::mailbox::create_mailbox;
    use chrono::{Duration, Utc};

    async fn seeded_mailbox(pool: &SqlitePool) -> String {
        let now = Utc::now();
        let mailbox = create_mailbox(
            pool,
            &NewMailbox {
                email: "inbox@example.test",
                domain: "example.test",
                actual_email: None,
                mail_tm_token: None,
                mail_tm_id: None,
                expires_at: now + Duration::minutes(10),
                created_at: now,
            },
        )
        .await
        .unwrap();
        mailbox.id
    }

    fn upstream_message<'a>(email_id: &'a str, upstream_id: &'a str) -> NewMessage<'a> {
        NewMessage {
            email_id,
            mail_tm_message_id: Some(upstream_id),
            sender: "someone@example.org",
            subject: "hello",
            body: "body",
            received_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn repeated_insert_of_same_upstream_id_is_ignored() {
        let pool = crate::test_pool().await;
        let email_id = seeded_mailbox(&pool).await;

        let first = insert_mirrored(&pool, &upstream_message(&email_id, "up-1"))
            .await
            .unwrap();
        let second = insert_mirrored(&pool, &upstream_message(&email_id, "up-1"))
            .await
            .unwrap();

        assert!(first);
        assert!(!second);
        assert_eq!(list_by_mailbox(&pool, &email_id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn listing_is_newest_first() {
        let pool = crate::test_pool().await;
        let email_id = seeded_mailbox(&pool).await;

        let older = NewMessage {
            received_at: Utc::now() - Duration::minutes(5),
            ..upstream_message(&email_id, "up-old")
        };
        insert_mirrored(&pool, &older).await.unwrap();
        insert_mirrored(&pool, &upstream_message(&email_id, "up-new"))
            .await
            .unwrap();

        let messages = list_by_mailbox(&pool, &email_id).await.unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].mail_tm_message_id.as_deref(), Some("up-new"));
        assert_eq!(messages[1].mail_tm_message_id.as_deref(), Some("up-old"));
    }

    #[tokio::test]
    async fn mark_read_is_idempotent_and_tolerant() {
        let pool = crate::test_pool().await;
        let email_id = seeded_mailbox(&pool).await;
        insert_mirrored(&pool, &upstream_message(&email_id, "up-1"))
            .await
            .unwrap();
        let id = list_by_mailbox(&pool, &email_id).await.unwrap()[0].id.clone();

        mark_read(&pool, &id).await.unwrap();
        mark_read(&pool, &id).await.unwrap();
        assert!(list_by_mailbox(&pool, &email_id).await.unwrap()[0].is_read);

        // Unknown id is a no-op, not an error.
        mark_read(&pool, "no-such-message").await.unwrap();
    }
}
