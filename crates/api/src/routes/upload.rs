//! File upload route.
//!
//! `POST /upload/` takes a multipart body, reads the first part that carries
//! a filename fully into memory and writes it to the container under that
//! filename. Uploads with the same filename replace each other.

use axum::{
    Json, Router,
    extract::{Multipart, State, multipart::MultipartRejection},
    http::StatusCode,
    routing::post,
};
use blobrelay_shared::AppError;
use bytes::Bytes;
use serde::Serialize;
use tracing::info;

use crate::{AppState, error::ApiError};

/// Creates the upload routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/upload/", post(upload_file))
        .route("/upload", post(upload_file))
}

/// Response for a stored upload.
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    /// Address of the written blob.
    pub blob_url: String,
}

/// POST `/upload/`
async fn upload_file(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<(StatusCode, Json<UploadResponse>), ApiError> {
    let mut multipart = multipart.map_err(|e| AppError::unexpected(e.body_text()))?;
    let (filename, data) = read_file_part(&mut multipart).await?;
    let size = data.len();

    let blob_url = state.storage.upload_buffer(data, &filename).await?;

    info!(object_name = %filename, size, blob_url = %blob_url, "File uploaded");
    Ok((StatusCode::CREATED, Json(UploadResponse { blob_url })))
}

/// Pull the first part with a filename out of the body, skipping plain fields.
async fn read_file_part(multipart: &mut Multipart) -> Result<(String, Bytes), AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::unexpected(e.body_text()))?
    {
        let Some(filename) = field.file_name().map(ToOwned::to_owned) else {
            continue;
        };
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::unexpected(e.body_text()))?;
        return Ok((filename, data));
    }

    Err(AppError::unexpected("request contains no file part"))
}
