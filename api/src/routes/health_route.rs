use std::sync::Arc;

use axum::{Json, extract::State};
use serde_json::{Value, json};

use crate::core::app_state::AppState;

/// Handler: GET /health. Liveness only, no upstream probes.
pub async fn health(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "strategy": state.pipeline.strategy().to_string(),
    }))
}
