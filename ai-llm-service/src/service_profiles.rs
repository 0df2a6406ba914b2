//! Shared LLM service with three profiles: `fast`, `slow`, and `embedding`.
//!
//! - Construct once at startup, wrap in `Arc`, and pass clones to dependents.
//! - Each profile owns a ready [`OpenAiService`]; nothing is created per request.
//! - If the `fast` profile is not provided, it falls back to `slow`.
//!
//! # Example
//! ```no_run
//! use std::sync::Arc;
//! use ai_llm_service::{GenerateOptions, LlmServiceProfiles};
//! use ai_llm_service::error_handler::process_env;
//!
//! # async fn run() -> Result<(), ai_llm_service::AiLlmError> {
//! let svc = Arc::new(LlmServiceProfiles::from_env(&process_env)?);
//!
//! let label = svc
//!     .generate_fast("Is this about products?", None, GenerateOptions::short_deterministic(10))
//!     .await?;
//! let emb = svc.embed("Ferris").await?;
//! println!("{label}: dim = {}", emb.len());
//! # Ok(())
//! # }
//! ```

use tracing::info;

use crate::{
    config::{
        default_config::{config_openai_embedding, config_openai_fast, config_openai_slow},
        llm_model_config::{GenerateOptions, LlmModelConfig},
    },
    error_handler::{AiLlmError, EnvLookup},
    services::open_ai_service::OpenAiService,
};

/// Three logical model profiles over one OpenAI-compatible API.
#[derive(Debug)]
pub struct LlmServiceProfiles {
    fast: OpenAiService,
    slow: OpenAiService,
    embedding: OpenAiService,
}

impl LlmServiceProfiles {
    /// Creates a new service with three profiles.
    ///
    /// - `slow`: required answer profile (quality).
    /// - `fast_opt`: optional router profile. If `None`, falls back to `slow`.
    /// - `embedding`: required embedding profile.
    ///
    /// # Errors
    /// Returns [`AiLlmError`] if any profile config is invalid.
    pub fn new(
        slow: LlmModelConfig,
        fast_opt: Option<LlmModelConfig>,
        embedding: LlmModelConfig,
    ) -> Result<Self, AiLlmError> {
        let fast = fast_opt.unwrap_or_else(|| slow.clone());

        info!(
            fast = %fast.model,
            slow = %slow.model,
            embedding = %embedding.model,
            "LLM profiles configured"
        );

        Ok(Self {
            fast: OpenAiService::new(fast)?,
            slow: OpenAiService::new(slow)?,
            embedding: OpenAiService::new(embedding)?,
        })
    }

    /// Builds all profiles from environment variables (see [`crate::config::default_config`]).
    pub fn from_env(env: EnvLookup<'_>) -> Result<Self, AiLlmError> {
        Self::new(
            config_openai_slow(env)?,
            config_openai_fast(env)?,
            config_openai_embedding(env)?,
        )
    }

    /// Generates text using the **fast** profile.
    ///
    /// # Errors
    /// Returns [`AiLlmError`] if generation fails.
    pub async fn generate_fast(
        &self,
        prompt: &str,
        system: Option<&str>,
        opts: GenerateOptions,
    ) -> Result<String, AiLlmError> {
        self.fast.generate(prompt, system, opts).await
    }

    /// Generates text using the **slow** profile.
    pub async fn generate_slow(
        &self,
        prompt: &str,
        system: Option<&str>,
        opts: GenerateOptions,
    ) -> Result<String, AiLlmError> {
        self.slow.generate(prompt, system, opts).await
    }

    /// Computes embeddings using the **embedding** profile.
    ///
    /// # Errors
    /// Returns [`AiLlmError`] if embedding fails.
    pub async fn embed(&self, input: &str) -> Result<Vec<f32>, AiLlmError> {
        self.embedding.embeddings(input).await
    }

    /// Returns references to the current profiles `(fast, slow, embedding)`.
    pub fn profiles(&self) -> (&LlmModelConfig, &LlmModelConfig, &LlmModelConfig) {
        (
            self.fast.config(),
            self.slow.config(),
            self.embedding.config(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg(model: &str) -> LlmModelConfig {
        LlmModelConfig {
            model: model.into(),
            endpoint: "https://api.openai.com".into(),
            api_key: Some("sk-test".into()),
            max_tokens: None,
            temperature: None,
            top_p: None,
            timeout_secs: None,
        }
    }

    #[test]
    fn fast_falls_back_to_slow() {
        let svc =
            LlmServiceProfiles::new(cfg("gpt-4"), None, cfg("text-embedding-3-small")).unwrap();
        let (fast, slow, emb) = svc.profiles();
        assert_eq!(fast, slow);
        assert_eq!(emb.model, "text-embedding-3-small");
    }

    #[test]
    fn invalid_profile_fails_construction() {
        let mut bad = cfg("text-embedding-3-small");
        bad.api_key = None;
        assert!(LlmServiceProfiles::new(cfg("gpt-4"), Some(cfg("gpt-4o-mini")), bad).is_err());
    }
}
