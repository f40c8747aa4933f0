//! booking-gateway server entry point.
//!
//! Starts the Axum HTTP server with the booking endpoints.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use booking_gateway::api;
use booking_gateway::app_state::AppState;
use booking_gateway::auth::TokenVerifier;
use booking_gateway::config::AppConfig;
use booking_gateway::persistence::{BookingStore, MemoryStore, PostgresStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = AppConfig::from_env()
        .map_err(|e| anyhow::anyhow!("invalid configuration: {e}"))?;
    tracing::info!(addr = %config.listen_addr, "starting booking-gateway");

    // Build persistence layer
    let store: Arc<dyn BookingStore> = if config.persistence_enabled {
        Arc::new(
            PostgresStore::connect(&config)
                .await
                .context("failed to initialise database")?,
        )
    } else {
        tracing::warn!("persistence disabled; bookings are kept in memory");
        Arc::new(MemoryStore::new())
    };

    // Build application state and router
    let app_state = AppState::new(store, TokenVerifier::new(&config.jwt_secret));
    let app = api::build_app(app_state, Duration::from_secs(config.request_timeout_secs));

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.listen_addr))?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
