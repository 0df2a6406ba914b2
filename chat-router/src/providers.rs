//! Seams to the external services, and their production adapters.
//!
//! - [`Embedder`]     text → vector
//! - [`Completer`]    (system, user, temperature, max tokens) → text
//! - [`ContextStore`] (category, vector) → ranked rows

use std::sync::Arc;

use ai_llm_service::{GenerateOptions, LlmServiceProfiles};
use async_trait::async_trait;
use vector_store::{ContextRow, SupabaseStore};

use crate::{category::Category, error::ChatError};

/// One completion call.
#[derive(Debug, Clone, Copy)]
pub struct CompletionRequest<'a> {
    pub system: &'a str,
    pub user: &'a str,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
}

#[async_trait]
pub trait Embedder: Send + Sync {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, ChatError>;
}

#[async_trait]
pub trait Completer: Send + Sync {
    async fn complete(&self, req: CompletionRequest<'_>) -> Result<String, ChatError>;
}

#[async_trait]
pub trait ContextStore: Send + Sync {
    /// Runs the lookup bound to `category`; rows keep the store's order.
    async fn lookup(&self, category: Category, vector: &[f32])
    -> Result<Vec<ContextRow>, ChatError>;
}

#[async_trait]
impl Embedder for LlmServiceProfiles {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, ChatError> {
        Ok(LlmServiceProfiles::embed(self, text).await?)
    }
}

/// Which generation profile a [`LlmCompleter`] calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelTier {
    /// Router model (classification).
    Fast,
    /// Answer model.
    Slow,
}

/// [`Completer`] over one profile of [`LlmServiceProfiles`].
#[derive(Debug, Clone)]
pub struct LlmCompleter {
    svc: Arc<LlmServiceProfiles>,
    tier: ModelTier,
}

impl LlmCompleter {
    pub fn new(svc: Arc<LlmServiceProfiles>, tier: ModelTier) -> Self {
        Self { svc, tier }
    }
}

#[async_trait]
impl Completer for LlmCompleter {
    async fn complete(&self, req: CompletionRequest<'_>) -> Result<String, ChatError> {
        let opts = GenerateOptions {
            temperature: req.temperature,
            max_tokens: req.max_tokens,
        };
        let text = match self.tier {
            ModelTier::Fast => {
                self.svc
                    .generate_fast(req.user, Some(req.system), opts)
                    .await?
            }
            ModelTier::Slow => {
                self.svc
                    .generate_slow(req.user, Some(req.system), opts)
                    .await?
            }
        };
        Ok(text)
    }
}

#[async_trait]
impl ContextStore for SupabaseStore {
    async fn lookup(
        &self,
        category: Category,
        vector: &[f32],
    ) -> Result<Vec<ContextRow>, ChatError> {
        Ok(self.call_rpc(category.rpc_function(), vector).await?)
    }
}
