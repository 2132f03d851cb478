//! Health endpoint for the retrieval API.

use axum::Json;
use serde_json::{json, Value};

/// GET /api/health: returns basic service health info.
pub async fn get_health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
