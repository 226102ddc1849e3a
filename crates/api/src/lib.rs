//! HTTP API layer with Axum routes.
//!
//! This crate provides:
//! - The health and upload routes
//! - Error-to-response mapping
//! - Router assembly with tracing, CORS and body-limit layers

pub mod error;
pub mod routes;

#[cfg(test)]
mod test_support;

use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use blobrelay_core::storage::BlobStorage;
use blobrelay_shared::ServerConfig;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use error::ApiError;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Storage wrapper holding the process-wide blob client.
    pub storage: Arc<BlobStorage>,
}

impl AppState {
    /// Create state around a storage wrapper.
    #[must_use]
    pub fn new(storage: BlobStorage) -> Self {
        Self {
            storage: Arc::new(storage),
        }
    }
}

/// Creates the main application router.
///
/// Uploads are unbounded unless `server.max_upload_bytes` is set.
pub fn create_router(state: AppState, server: &ServerConfig) -> Router {
    let body_limit = server
        .max_upload_bytes
        .map_or_else(DefaultBodyLimit::disable, DefaultBodyLimit::max);

    Router::new()
        .merge(routes::api_routes())
        .layer(body_limit)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
