pub mod health;

use std::any::Any;

use axum::{
    body::Body,
    extract::DefaultBodyLimit,
    http::{header, Response, StatusCode},
    routing::{get, post},
    Router,
};
use tower_http::catch_panic::CatchPanicLayer;

use crate::candidates::handlers;
use crate::candidates::upload::MAX_REQUEST_BYTES;
use crate::errors::AppError;
use crate::state::AppState;

async fn route_not_found() -> AppError {
    AppError::RouteNotFound
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health::root_handler))
        .route("/health", get(health::health_handler))
        .route("/api", get(health::api_index_handler))
        // Other methods on the intake path answer like any unknown route.
        .route(
            "/api/candidates",
            post(handlers::handle_create_candidate).fallback(route_not_found),
        )
        .fallback(route_not_found)
        .layer(DefaultBodyLimit::max(MAX_REQUEST_BYTES))
        .layer(CatchPanicLayer::custom(panic_response))
        .with_state(state)
}

fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response<Body> {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    tracing::error!("Handler panicked: {detail}");

    Response::builder()
        .status(StatusCode::INTERNAL_SERVER_ERROR)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"error":"Internal server error"}"#))
        .unwrap_or_else(|_| Response::new(Body::empty()))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::body::to_bytes;
    use axum::http::Request;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::candidates::repository::CandidateRepository;
    use crate::config::Config;
    use crate::models::candidate::{Candidate, NewCandidate};

    struct UnreachableRepository;

    #[async_trait]
    impl CandidateRepository for UnreachableRepository {
        async fn create(&self, _candidate: NewCandidate) -> Result<Candidate, sqlx::Error> {
            Err(sqlx::Error::PoolClosed)
        }
    }

    fn app() -> Router {
        build_router(AppState {
            candidates: Arc::new(UnreachableRepository),
            config: Config {
                database_url: "postgres://unused".to_string(),
                database_max_connections: 1,
                upload_dir: std::env::temp_dir(),
                port: 0,
                rust_log: "info".to_string(),
            },
        })
    }

    async fn send(method: &str, uri: &str) -> (StatusCode, Vec<u8>) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        let response = app().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, bytes.to_vec())
    }

    #[tokio::test]
    async fn test_unknown_route_is_404() {
        let (status, body) = send("GET", "/api/jobs").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body, json!({ "error": "Route not found" }));
    }

    #[tokio::test]
    async fn test_wrong_method_on_intake_is_404() {
        let (status, body) = send("GET", "/api/candidates").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["error"], "Route not found");
    }

    #[tokio::test]
    async fn test_root_greeting() {
        let (status, body) = send("GET", "/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"Hola LTI!");
    }

    #[tokio::test]
    async fn test_api_index() {
        let (status, body) = send("GET", "/api").await;
        assert_eq!(status, StatusCode::OK);
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["message"], "API is working");
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = send("GET", "/health").await;
        assert_eq!(status, StatusCode::OK);
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "talent-api");
    }

    #[tokio::test]
    async fn test_panic_response_body() {
        let response = panic_response(Box::new("boom"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, json!({ "error": "Internal server error" }));
    }
}
