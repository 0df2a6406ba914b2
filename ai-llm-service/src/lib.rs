//! Shared LLM client for the chat backend.
//!
//! Talks to an OpenAI-compatible REST API for two things: embeddings and
//! non-streaming chat completions. Configs are loaded from the environment
//! (see [`config::default_config`]) and grouped into three profiles by
//! [`service_profiles::LlmServiceProfiles`].

pub mod config;
pub mod error_handler;
pub mod service_profiles;
pub mod services;

pub use config::llm_model_config::{GenerateOptions, LlmModelConfig};
pub use error_handler::{AiLlmError, ConfigError, ProviderError};
pub use service_profiles::LlmServiceProfiles;
pub use services::open_ai_service::OpenAiService;
