use chrono::Utc;
use db::services::cleanup;
use sqlx::SqlitePool;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{error, info};

/// Recurring expiry sweep. Owned by the process lifecycle: spawned at boot,
/// stopped through the shutdown channel. The interval is constant, with no
/// jitter or backoff; a failed tick logs and waits for the next one, which
/// re-covers any backlog via the unconditional `expires_at <= now` predicate.
pub async fn run(pool: SqlitePool, interval: Duration, mut shutdown: watch::Receiver<bool>) {
    let mut ticker = tokio::time::interval(interval);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                match cleanup::sweep_expired(&pool, Utc::now()).await {
                    Ok(deleted) if deleted > 0 => {
                        info!(deleted, "sweep removed expired mailboxes");
                    }
                    Ok(_) => {}
                    Err(e) => error!("sweep failed: {e}"),
                }
            }
            _ = shutdown.changed() => {
                info!("sweeper stopping");
                break;
            }
        }
    }
}
