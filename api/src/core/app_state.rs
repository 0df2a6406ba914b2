use std::sync::Arc;

use ai_llm_service::{AiLlmError, LlmServiceProfiles, error_handler::process_env};
use chat_router::{ChatConfig, ChatError, ChatPipeline};
use thiserror::Error;
use tracing::info;
use vector_store::{StoreConfig, StoreError, SupabaseStore};

/// Startup configuration failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("LLM config: {0}")]
    Llm(#[from] AiLlmError),

    #[error("vector store config: {0}")]
    Store(#[from] StoreError),

    #[error("chat config: {0}")]
    Chat(#[from] ChatError),
}

/// Shared state for all HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    /// Question-answering pipeline; stateless, shared by every request.
    pub pipeline: Arc<ChatPipeline>,
}

impl AppState {
    pub fn new(pipeline: ChatPipeline) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
        }
    }

    /// Builds clients once from environment variables.
    ///
    /// See `ai_llm_service::config::default_config`, `StoreConfig::from_env`
    /// and `ChatConfig::from_env` for the variables read.
    pub fn from_env() -> Result<Self, ConfigError> {
        let svc = Arc::new(LlmServiceProfiles::from_env(&process_env)?);
        let store = SupabaseStore::new(StoreConfig::from_env()?)?;
        let chat_cfg = ChatConfig::from_env()?;

        let (fast, slow, embedding) = svc.profiles();
        info!(
            strategy = %chat_cfg.strategy,
            router_model = %fast.model,
            answer_model = %slow.model,
            embedding_model = %embedding.model,
            "chat pipeline configured"
        );

        Ok(Self::new(ChatPipeline::from_services(svc, store, &chat_cfg)))
    }
}
