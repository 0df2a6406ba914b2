//! Default LLM configs loaded from environment variables.
//!
//! Three roles are produced, all against the same OpenAI-compatible API:
//!
//! - **Slow**      → answer model (final grounded completion)
//! - **Fast**      → router model (single-word classification)
//! - **Embedding** → embedding generator
//!
//! # Environment variables
//!
//! - `OPENAI_API_KEY`      = bearer token (mandatory)
//! - `OPENAI_BASE_URL`     = API base, default `https://api.openai.com`
//! - `OPENAI_CHAT_MODEL`   = answer model, default `gpt-4`
//! - `OPENAI_ROUTER_MODEL` = router model, optional (falls back to the answer model)
//! - `EMBEDDING_MODEL`     = embedding model, default `text-embedding-3-small`
//! - `LLM_MAX_TOKENS`      = optional max tokens (u32)
//! - `LLM_TEMPERATURE`     = optional temperature (f32, `0.0..=2.0`)
//! - `LLM_TIMEOUT_SECS`    = optional request timeout (u64)

use crate::{
    config::llm_model_config::LlmModelConfig,
    error_handler::{
        EnvLookup, Result, env_opt, env_opt_f32, env_opt_u32, env_opt_u64, must_env,
        validate_http_endpoint, validate_range_f32,
    },
};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com";
pub const DEFAULT_CHAT_MODEL: &str = "gpt-4";
pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-3-small";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Settings shared by every profile.
struct Common {
    endpoint: String,
    api_key: String,
    timeout_secs: u64,
}

fn common(env: EnvLookup<'_>) -> Result<Common> {
    let api_key = must_env(env, "OPENAI_API_KEY")?;
    let endpoint =
        env_opt(env, "OPENAI_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
    validate_http_endpoint("OPENAI_BASE_URL", &endpoint)?;
    let timeout_secs = env_opt_u64(env, "LLM_TIMEOUT_SECS")?.unwrap_or(DEFAULT_TIMEOUT_SECS);

    Ok(Common {
        endpoint,
        api_key,
        timeout_secs,
    })
}

/// Constructs the config for the **slow/answer** model.
///
/// # Env
/// - `OPENAI_CHAT_MODEL` (optional, default `gpt-4`)
/// - `LLM_MAX_TOKENS`, `LLM_TEMPERATURE` (optional)
pub fn config_openai_slow(env: EnvLookup<'_>) -> Result<LlmModelConfig> {
    let c = common(env)?;
    let model =
        env_opt(env, "OPENAI_CHAT_MODEL").unwrap_or_else(|| DEFAULT_CHAT_MODEL.to_string());
    let max_tokens = env_opt_u32(env, "LLM_MAX_TOKENS")?;
    let temperature = env_opt_f32(env, "LLM_TEMPERATURE")?;
    if let Some(t) = temperature {
        validate_range_f32("LLM_TEMPERATURE", t, 0.0, 2.0)?;
    }

    Ok(LlmModelConfig {
        model,
        endpoint: c.endpoint,
        api_key: Some(c.api_key),
        max_tokens,
        temperature,
        top_p: None,
        timeout_secs: Some(c.timeout_secs),
    })
}

/// Constructs the config for the **fast/router** model, if one is configured.
///
/// Returns `Ok(None)` when `OPENAI_ROUTER_MODEL` is unset; callers fall back
/// to the slow profile.
///
/// # Defaults
/// - `temperature = Some(0.0)`
pub fn config_openai_fast(env: EnvLookup<'_>) -> Result<Option<LlmModelConfig>> {
    let Some(model) = env_opt(env, "OPENAI_ROUTER_MODEL") else {
        return Ok(None);
    };
    let c = common(env)?;

    Ok(Some(LlmModelConfig {
        model,
        endpoint: c.endpoint,
        api_key: Some(c.api_key),
        max_tokens: None,
        temperature: Some(0.0),
        top_p: None,
        timeout_secs: Some(c.timeout_secs),
    }))
}

/// Constructs the config for the **embedding** model.
///
/// # Env
/// - `EMBEDDING_MODEL` (optional, default `text-embedding-3-small`)
pub fn config_openai_embedding(env: EnvLookup<'_>) -> Result<LlmModelConfig> {
    let c = common(env)?;
    let model =
        env_opt(env, "EMBEDDING_MODEL").unwrap_or_else(|| DEFAULT_EMBEDDING_MODEL.to_string());

    Ok(LlmModelConfig {
        model,
        endpoint: c.endpoint,
        api_key: Some(c.api_key),
        max_tokens: None,
        temperature: None,
        top_p: None,
        timeout_secs: Some(c.timeout_secs),
    })
}
