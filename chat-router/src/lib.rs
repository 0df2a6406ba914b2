//! Question → category → context → grounded answer.
//!
//! Public entry point is [`ChatPipeline::answer`]. It embeds the question,
//! routes it to one of the shop's lookup functions ([`Category`]), fetches
//! context rows from the vector store, and asks the model to answer strictly
//! from that context. Two fixed replies short-circuit the pipeline: one when
//! no category applies, one when the lookup produced no usable text.
//!
//! Every upstream dependency sits behind a trait in [`providers`], so the
//! pipeline can run against fakes.

pub mod api_types;
pub mod category;
pub mod cfg;
pub mod error;
pub mod pipeline;
pub mod prompt;
pub mod providers;
pub mod router;

pub use api_types::{AnswerOutcome, ChatAnswer};
pub use category::Category;
pub use cfg::ChatConfig;
pub use error::ChatError;
pub use pipeline::ChatPipeline;
pub use providers::{CompletionRequest, Completer, ContextStore, Embedder, LlmCompleter, ModelTier};
pub use router::{CategoryRouter, RoutingStrategy};
