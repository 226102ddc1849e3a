//! Mapping of application errors onto HTTP responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use blobrelay_core::storage::StorageError;
use blobrelay_shared::AppError;
use serde_json::json;
use tracing::error;

/// Error returned by handlers.
///
/// Renders as `{"detail": "<message>"}` with the status of the wrapped
/// [`AppError`].
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.0.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let detail = self.0.to_string();

        error!(code = self.0.error_code(), error = %detail, "Request failed");

        (status, Json(json!({ "detail": detail }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use rstest::rstest;

    #[rstest]
    #[case(AppError::Storage("quota exceeded".into()), "Azure upload failed: quota exceeded")]
    #[case(AppError::Io("denied".into()), "I/O error: denied")]
    #[case(AppError::Unexpected("bad body".into()), "Unexpected error: bad body")]
    #[tokio::test]
    async fn test_error_response_body(#[case] err: AppError, #[case] expected: &str) {
        let response = ApiError(err).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["detail"], expected);
    }

    #[test]
    fn test_storage_error_converts() {
        let ApiError(inner) = StorageError::operation("timeout").into();
        assert!(matches!(inner, AppError::Storage(_)));
    }
}
