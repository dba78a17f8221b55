//! Liveness endpoints.

use axum::Json;
use serde_json::{json, Value};

/// Handler for `GET /api/`
pub async fn root() -> Json<Value> {
    Json(json!({ "message": "Resume Roaster API is running" }))
}

/// Handler for `GET /api/health`
pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "resume-roaster",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
