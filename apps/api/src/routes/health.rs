use axum::Json;
use serde_json::{json, Value};

/// GET /health
/// Returns a simple status object with service version.
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "talent-api"
    }))
}

/// GET /
pub async fn root_handler() -> &'static str {
    "Hola LTI!"
}

/// GET /api
pub async fn api_index_handler() -> Json<Value> {
    Json(json!({ "message": "API is working" }))
}
