use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use db::services::error::ServiceError;
use mailtm::MailTmClient;
use serde_json::json;
use sqlx::SqlitePool;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::error;

// Shared state for all request handlers and background tasks.
#[derive(Clone)]
pub struct AppState {
    pub db_pool: SqlitePool,
    pub mailtm: Arc<MailTmClient>,
    pub config: Arc<AppConfig>,
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    /// Domain seeded into the registry on boot.
    pub primary_domain: String,
    /// Domain the upstream provider actually accepts. Actual addresses are
    /// always formed under this one; visible addresses may use any
    /// registered domain.
    pub upstream_domain: String,
    pub mailtm_base_url: String,
    pub ttl: chrono::Duration,
    pub sweep_interval: Duration,
    pub upstream_timeout: Duration,
    pub local_part_len: usize,
    pub password_len: usize,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let primary_domain = env_or("PRIMARY_DOMAIN", "powerscrews.com");
        let upstream_domain =
            std::env::var("UPSTREAM_DOMAIN").unwrap_or_else(|_| primary_domain.clone());
        Self {
            upstream_domain,
            mailtm_base_url: env_or("MAILTM_BASE_URL", "https://api.mail.tm"),
            ttl: chrono::Duration::minutes(env_parse("TTL_MINUTES", 10)),
            sweep_interval: Duration::from_secs(env_parse("SWEEP_INTERVAL_SECS", 60)),
            upstream_timeout: Duration::from_secs(env_parse("UPSTREAM_TIMEOUT_SECS", 10)),
            local_part_len: env_parse("LOCAL_PART_LEN", 12),
            password_len: env_parse("PASSWORD_LEN", 16),
            primary_domain,
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}

// Errors a handler can surface. Upstream-provider failures never appear
// here; the lifecycle manager and mirror absorb them.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(&'static str),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Database error")]
    Service(#[from] ServiceError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.to_string()),
            ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Service(e) => {
                error!("request failed on persistence: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An unexpected database error occurred.".to_string(),
                )
            }
        };

        let body = Json(json!({ "error": message }));
        (status, body).into_response()
    }
}
