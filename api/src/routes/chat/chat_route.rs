//! POST /api/chat: answers a shop question from retrieved context.

use std::sync::Arc;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::HeaderMap,
};
use tracing::{debug, error, info, warn};

use crate::{
    core::app_state::AppState,
    error_handler::{AppError, AppResult},
    middleware_layer::request_id::REQUEST_ID_HEADER,
    routes::chat::chat_request::{ChatRequest, ChatResponse},
};

/// Handler: POST /api/chat
///
/// # Example
/// ```bash
/// curl -X POST http://127.0.0.1:3000/api/chat \
///   -H 'content-type: application/json' \
///   -d '{"message":"What products do you have under $20?"}'
/// ```
pub async fn chat(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> AppResult<Json<ChatResponse>> {
    let request_id = headers
        .get(REQUEST_ID_HEADER)
        .and_then(|h| h.to_str().ok())
        .unwrap_or("-");

    let Json(body) = payload.inspect_err(|e| {
        warn!(request_id = %request_id, error = %e, "chat: rejected payload");
    })?;

    debug!(
        request_id = %request_id,
        message_len = body.message.len(),
        "chat: start"
    );

    match state.pipeline.answer(&body.message).await {
        Ok(answer) => {
            info!(
                request_id = %request_id,
                category = ?answer.category,
                rows = answer.context_rows,
                outcome = ?answer.outcome,
                "chat: success"
            );
            Ok(Json(answer.into()))
        }
        Err(err) => {
            if err.is_client_error() {
                warn!(request_id = %request_id, error = %err, "chat: invalid question");
            } else {
                error!(request_id = %request_id, error = %err, "chat: pipeline failed");
            }
            Err(AppError::from(err))
        }
    }
}
