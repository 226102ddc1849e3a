//! Health check endpoint.

use axum::{Json, Router, routing::get};
use serde::Serialize;

use crate::AppState;

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Service status.
    pub message: &'static str,
}

/// Health check handler. Has no dependencies and cannot fail.
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse { message: "Healthy" })
}

/// Creates health check routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/", get(health_check))
}
