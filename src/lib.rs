pub mod api;
pub mod config;
pub mod db;
pub mod middleware;
pub mod server;
pub mod util;

use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{error, info};

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Database error: {0}")]
    Database(#[from] db::DbError),
    #[error("Server error: {0}")]
    Server(String),
}

pub async fn run(config_path: Option<&str>, database: Option<&str>) -> Result<(), ServerError> {
    let mut config = config::Config::load(config_path)?;
    if let Some(filename) = database {
        config.database.filename = filename.to_string();
    }

    info!("Opening document store at {}", config.database.filename);
    let db = Arc::new(db::SqliteRepository::new(&config.database.filename).await?);

    let address = config.listen.address.as_deref().unwrap_or("[::]");
    let addr: SocketAddr = format!("{}:{}", address, config.listen.port)
        .parse()
        .map_err(|e| ServerError::Server(format!("Invalid address: {}", e)))?;

    let state = server::AppState::new(config.clone(), db.clone());
    let app = server::build_router(state);

    info!("Movie server is listening on port {}", config.listen.port);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| ServerError::Server(format!("Failed to bind: {}", e)))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ServerError::Server(format!("Server error: {}", e)))?;

    db.close().await;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
    }
}
