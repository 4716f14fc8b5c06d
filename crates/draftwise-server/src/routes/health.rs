//! Liveness endpoint.

use axum::Json;
use serde_json::{json, Value};

/// `GET /health` — always OK.
pub async fn health() -> Json<Value> {
    Json(json!({ "ok": true }))
}
