use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::candidates::upload::{CV_REQUIRED_MESSAGE, CV_TOO_LARGE_MESSAGE, CV_TYPE_MESSAGE};

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("CV file is missing from the submission")]
    CvRequired,

    #[error("Unsupported CV content type: {0}")]
    UnsupportedFileType(String),

    #[error("CV file exceeds the size limit")]
    FileTooLarge,

    #[error("Invalid multipart body: {0}")]
    InvalidMultipart(String),

    #[error("Upload storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Route not found")]
    RouteNotFound,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::CvRequired => (
                StatusCode::BAD_REQUEST,
                json!({ "error": CV_REQUIRED_MESSAGE }),
            ),
            AppError::UnsupportedFileType(content_type) => {
                tracing::warn!("Rejected CV with content type '{content_type}'");
                (StatusCode::BAD_REQUEST, json!({ "error": CV_TYPE_MESSAGE }))
            }
            AppError::FileTooLarge => (
                StatusCode::PAYLOAD_TOO_LARGE,
                json!({ "error": CV_TOO_LARGE_MESSAGE }),
            ),
            AppError::InvalidMultipart(msg) => {
                tracing::warn!("Invalid multipart body: {msg}");
                (
                    StatusCode::BAD_REQUEST,
                    json!({ "error": "Invalid multipart body" }),
                )
            }
            AppError::Storage(e) => {
                tracing::error!("Upload storage error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Internal server error" }),
                )
            }
            AppError::Database(e) => {
                tracing::error!("Error creating candidate: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "success": false, "error": "Error creating candidate" }),
                )
            }
            AppError::RouteNotFound => (
                StatusCode::NOT_FOUND,
                json!({ "error": "Route not found" }),
            ),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::Value;

    async fn render(err: AppError) -> (StatusCode, Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_cv_required_is_bad_request() {
        let (status, body) = render(AppError::CvRequired).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], CV_REQUIRED_MESSAGE);
        assert!(body.get("success").is_none());
    }

    #[tokio::test]
    async fn test_database_error_reports_failure_flag() {
        let (status, body) = render(AppError::Database(sqlx::Error::PoolTimedOut)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Error creating candidate");
    }

    #[tokio::test]
    async fn test_storage_error_is_generic() {
        let err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
        let (status, body) = render(AppError::Storage(err)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Internal server error");
    }

    #[tokio::test]
    async fn test_file_too_large_is_413() {
        let (status, body) = render(AppError::FileTooLarge).await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(body["error"], CV_TOO_LARGE_MESSAGE);
    }

    #[tokio::test]
    async fn test_route_not_found_shape() {
        let (status, body) = render(AppError::RouteNotFound).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, serde_json::json!({ "error": "Route not found" }));
    }
}
