// document-backend/src/api/handlers/health.rs

use axum::{routing::get, Json, Router};
use serde_json::{json, Value};

/// 死活監視
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

pub fn health_router() -> Router {
    Router::new().route("/health", get(health_handler))
}
