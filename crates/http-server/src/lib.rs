pub mod api;
pub mod core;
pub mod lifecycle;
pub mod mirror;
pub mod registry;
pub mod sweeper;

use crate::core::AppState;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;

/// Builds the application router. Kept out of `main` so integration tests
/// can drive it in-process.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/domains", get(api::email::list_domains_handler))
        .route("/api/generate", post(api::email::generate_email_handler))
        .route("/api/messages/:id", get(api::message::list_messages_handler))
        .route("/api/messages/:id/read", post(api::message::mark_read_handler))
        .route("/api/email/:email/status", get(api::email::email_status_handler))
        .route("/api/cleanup", post(api::email::cleanup_handler))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
