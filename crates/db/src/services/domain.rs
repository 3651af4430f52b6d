use crate::models::domain::Domain;
use crate::services::error::ServiceError;
use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

/// Lists domains currently available for allocation.
pub async fn list_active(pool: &SqlitePool) -> Result<Vec<Domain>, ServiceError> {
    let records = sqlx::query_as::<_, Domain>(
        "SELECT id, domain, is_active, updated_at FROM domains \
         WHERE is_active = TRUE ORDER BY updated_at, domain",
    )
    .fetch_all(pool)
    .await?;

    Ok(records)
}

/// Idempotent upsert-if-absent: inserts the domain when missing and returns
/// the stored row either way. Existing rows are never overwritten.
pub async fn ensure_domain(pool: &SqlitePool, name: &str) -> Result<Domain, ServiceError> {
    sqlx::query(
        "INSERT INTO domains (id, domain, is_active, updated_at) VALUES (?, ?, TRUE, ?) \
         ON CONFLICT (domain) DO NOTHING",
    )
    .bind(Uuid::new_v4().to_string())
    .bind(name)
    .bind(Utc::now())
    .execute(pool)
    .await?;

    let record =
        sqlx::query_as::<_, Domain>("SELECT id, domain, is_active, updated_at FROM domains WHERE domain = ?")
            .bind(name)
            .fetch_one(pool)
            .await?;

    Ok(record)
}

/// Total number of registered domains, active or not. Used by the registry's
/// first-write-wins import policy.
pub async fn count(pool: &SqlitePool) -> Result<i64, ServiceError> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM domains")
        .fetch_one(pool)
        .await?;
    Ok(count)
}
