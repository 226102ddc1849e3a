//! Blobrelay API Server
//!
//! Main entry point for the upload relay service.

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use blobrelay_api::{AppState, create_router};
use blobrelay_core::storage::BlobStorage;
use blobrelay_shared::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "blobrelay=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Configuration must be valid before anything is served
    let config = AppConfig::load().context("failed to load configuration")?;

    let storage = BlobStorage::connect(config.storage.clone())
        .context("failed to create blob storage client")?;
    info!(
        container = %storage.container_name(),
        container_url = %storage.container_url(),
        max_upload_bytes = ?config.server.max_upload_bytes,
        "Blob storage configured"
    );

    let app = create_router(AppState::new(storage), &config.server);

    let addr = config.server.bind_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
