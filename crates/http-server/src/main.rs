use dotenvy::dotenv;
use http_server::core::{AppConfig, AppState};
use http_server::{registry, router, sweeper};
use mailtm::MailTmClient;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from a .env file.
    dotenv().ok();
    // Use a JSON logger for production-ready structured logging.
    tracing_subscriber::fmt().json().init();

    // --- Configuration ---
    let config = AppConfig::from_env();
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(3001);
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    // --- Database Pool ---
    let db_pool = match db::connect(&database_url).await {
        Ok(pool) => {
            info!("Database pool created successfully.");
            pool
        }
        Err(e) => {
            error!("Failed to create database pool: {}", e);
            return Err(e.into());
        }
    };
    db::MIGRATOR.run(&db_pool).await?;

    // --- Upstream client & shared state ---
    let mailtm = MailTmClient::new(config.mailtm_base_url.clone(), config.upstream_timeout)?;
    let state = AppState {
        db_pool: db_pool.clone(),
        mailtm: Arc::new(mailtm),
        config: Arc::new(config.clone()),
    };

    // Seed the domain registry before serving traffic.
    registry::initialize_domains(&state).await;

    // --- Background expiry sweeper ---
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let sweeper_task = tokio::spawn(sweeper::run(
        db_pool.clone(),
        config.sweep_interval,
        shutdown_rx,
    ));

    // --- Start HTTP Server ---
    // Bind to 0.0.0.0 to be reachable in a container.
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => {
            info!("HTTP Server listening on {}", addr);
            listener
        }
        Err(e) => {
            error!("Failed to bind to address {}: {}", addr, e);
            return Err(e.into());
        }
    };

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Stop the sweeper together with the server.
    let _ = shutdown_tx.send(true);
    let _ = sweeper_task.await;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
    }
}
