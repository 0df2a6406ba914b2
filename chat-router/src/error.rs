//! Typed error for the chat-router crate.

use ai_llm_service::AiLlmError;
use thiserror::Error;
use vector_store::StoreError;

#[derive(Debug, Error)]
pub enum ChatError {
    /// Question was empty or whitespace-only; nothing was sent upstream.
    #[error("message must not be empty")]
    EmptyQuestion,

    /// Invalid pipeline configuration (startup only).
    #[error("config error: {0}")]
    Config(String),

    /// Embedding, classification or answer call failed.
    #[error(transparent)]
    Llm(#[from] AiLlmError),

    /// Vector-store lookup failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ChatError {
    /// `true` when the caller sent something we refuse to process.
    pub fn is_client_error(&self) -> bool {
        matches!(self, ChatError::EmptyQuestion)
    }
}
