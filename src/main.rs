use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use malls_api::config;
use malls_api::database::open_store;
use malls_api::{app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_PRIVATE_KEY, etc.
    let _ = dotenvy::dotenv();

    let config = config::config();

    let default_filter = if malls_api::is_development!() {
        "info,malls_api=debug,tower_http=debug"
    } else {
        "info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
        .init();

    tracing::info!("Starting {} in {} mode", config.app_name, config.environment.as_str());

    if config.security.jwt_private_key.is_empty() {
        anyhow::bail!("FATAL ERROR: JWT_PRIVATE_KEY is not defined");
    }

    let store = open_store(&config.database)
        .await
        .context("failed to open the document store")?;

    let state = AppState::new(Arc::new(config.clone()), store);
    let router = app(state);

    let bind_addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Listening on http://{}", bind_addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
