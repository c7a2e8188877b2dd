//! Baitulmal API Server
//!
//! Main entry point for the Baitulmal backend service.

use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use baitulmal_api::{AppState, create_router};
use baitulmal_core::cache::SummaryCache;
use baitulmal_db::connect;
use baitulmal_shared::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "baitulmal=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    // Connect to database
    let db = connect(&config.database.url).await?;
    info!("Connected to database");

    // Create the report cache
    let summaries = SummaryCache::new(
        config.cache.capacity,
        Duration::from_secs(config.cache.ttl_secs),
    );
    info!(
        capacity = config.cache.capacity,
        ttl_secs = config.cache.ttl_secs,
        "Report cache configured"
    );

    // Create application state
    let state = AppState {
        db: Arc::new(db),
        summaries: Arc::new(summaries),
    };

    // Create router
    let app = create_router(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
