//! PostgREST RPC client for the similarity-search functions.
//!
//! Endpoint used:
//!   * POST /rest/v1/rpc/:function  body `{"question_vector": [f32...]}`
//!
//! The function returns a JSON array of rows, already ranked.

use std::time::Instant;

use reqwest::{Client, header};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use crate::{
    config::StoreConfig,
    errors::{StoreError, StoreResult},
    record::ContextRow,
};

/// Max characters of a raw error body kept when PostgREST sent no `message`.
const BODY_SNIPPET_LIMIT: usize = 300;

/// Supabase HTTP client wrapper.
#[derive(Debug, Clone)]
pub struct SupabaseStore {
    http: Client,
    rpc_base: String, // e.g. "https://abcd.supabase.co/rest/v1/rpc"
}

impl SupabaseStore {
    /// Builds the client; `apikey` and bearer auth are sent on every call.
    pub fn new(cfg: StoreConfig) -> StoreResult<Self> {
        cfg.validate()?;

        let key = cfg.api_key.trim();
        let mut headers = header::HeaderMap::new();
        let mut apikey = header::HeaderValue::from_str(key)
            .map_err(|_| StoreError::Config("api_key is not a valid header value".into()))?;
        apikey.set_sensitive(true);
        let mut bearer = header::HeaderValue::from_str(&format!("Bearer {key}"))
            .map_err(|_| StoreError::Config("api_key is not a valid header value".into()))?;
        bearer.set_sensitive(true);
        headers.insert("apikey", apikey);
        headers.insert(header::AUTHORIZATION, bearer);

        let http = Client::builder()
            .timeout(cfg.timeout())
            .default_headers(headers)
            .build()?;

        let rpc_base = format!("{}/rest/v1/rpc", cfg.url.trim().trim_end_matches('/'));
        debug!("Creating SupabaseStore with rpc_base={}", rpc_base);

        Ok(Self { http, rpc_base })
    }

    /// Calls `function` with the question embedding and returns its rows in order.
    ///
    /// # Errors
    /// - [`StoreError::Rpc`] for non-2xx answers (PostgREST message attached)
    /// - [`StoreError::Transport`] for network failures
    /// - [`StoreError::Decode`] when the body is not an array of rows
    pub async fn call_rpc(
        &self,
        function: &str,
        question_vector: &[f32],
    ) -> StoreResult<Vec<ContextRow>> {
        let started = Instant::now();
        let url = format!("{}/{}", self.rpc_base, function);
        debug!(function, dim = question_vector.len(), "POST {}", url);

        let resp = self
            .http
            .post(&url)
            .json(&RpcArgs { question_vector })
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;

        if !status.is_success() {
            let message = rpc_error_message(&body);
            error!(
                function,
                status = status.as_u16(),
                %message,
                latency_ms = started.elapsed().as_millis(),
                "rpc returned non-success status"
            );
            return Err(StoreError::Rpc {
                function: function.to_string(),
                status: status.as_u16(),
                message,
            });
        }

        // PostgREST answers `null` when a set-returning function yields nothing.
        let rows: Option<Vec<ContextRow>> = serde_json::from_str(&body).map_err(|e| {
            error!(function, error = %e, "failed to decode rpc rows");
            StoreError::Decode(format!("{function}: {e}"))
        })?;
        let rows = rows.unwrap_or_default();

        info!(
            function,
            rows = rows.len(),
            latency_ms = started.elapsed().as_millis(),
            "rpc completed"
        );

        Ok(rows)
    }
}

#[derive(Debug, Serialize)]
struct RpcArgs<'a> {
    question_vector: &'a [f32],
}

/// PostgREST error envelope.
#[derive(Debug, Deserialize)]
struct PostgrestError {
    message: Option<String>,
}

/// Picks the human-readable part of an RPC error body.
fn rpc_error_message(body: &str) -> String {
    if let Ok(PostgrestError { message: Some(m) }) = serde_json::from_str::<PostgrestError>(body) {
        if !m.trim().is_empty() {
            return m;
        }
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "empty response body".to_string();
    }
    trimmed.chars().take(BODY_SNIPPET_LIMIT).collect()
}
