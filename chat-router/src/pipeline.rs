//! Retriever-composer: embed, route, look up, answer.

use std::sync::Arc;

use ai_llm_service::LlmServiceProfiles;
use tracing::{debug, info};
use vector_store::SupabaseStore;

use crate::{
    api_types::{AnswerOutcome, ChatAnswer},
    cfg::ChatConfig,
    error::ChatError,
    prompt::{ANSWER_SYSTEM, NO_CATEGORY_MESSAGE, NO_CONTEXT_MESSAGE, build_context, build_user_prompt},
    providers::{Completer, CompletionRequest, ContextStore, Embedder, LlmCompleter, ModelTier},
    router::{CategoryRouter, RoutingStrategy},
};

/// Stateless per-request pipeline over injected providers.
///
/// Build once, share behind `Arc`; [`ChatPipeline::answer`] keeps nothing
/// between calls.
pub struct ChatPipeline {
    embedder: Arc<dyn Embedder>,
    router: CategoryRouter,
    answerer: Arc<dyn Completer>,
    store: Arc<dyn ContextStore>,
    answer_temperature: Option<f32>,
    answer_max_tokens: Option<u32>,
}

impl ChatPipeline {
    pub fn new(
        embedder: Arc<dyn Embedder>,
        router: CategoryRouter,
        answerer: Arc<dyn Completer>,
        store: Arc<dyn ContextStore>,
        cfg: &ChatConfig,
    ) -> Self {
        Self {
            embedder,
            router,
            answerer,
            store,
            answer_temperature: cfg.answer_temperature,
            answer_max_tokens: cfg.answer_max_tokens,
        }
    }

    /// Wires the production providers: OpenAI profiles and the Supabase store.
    ///
    /// The fast profile classifies, the slow profile answers.
    pub fn from_services(
        svc: Arc<LlmServiceProfiles>,
        store: SupabaseStore,
        cfg: &ChatConfig,
    ) -> Self {
        let router = match cfg.strategy {
            RoutingStrategy::Keyword => CategoryRouter::Keyword,
            RoutingStrategy::Classification => CategoryRouter::Classification {
                classifier: Arc::new(LlmCompleter::new(svc.clone(), ModelTier::Fast)),
            },
        };
        let answerer = Arc::new(LlmCompleter::new(svc.clone(), ModelTier::Slow));

        Self::new(svc, router, answerer, Arc::new(store), cfg)
    }

    pub fn strategy(&self) -> RoutingStrategy {
        self.router.strategy()
    }

    /// Answers one question.
    ///
    /// 1. Reject empty input.
    /// 2. Embed and route concurrently (independent calls).
    /// 3. No category → fixed apology, no lookup.
    /// 4. Look up rows for the category; no usable text → fixed reply, no model call.
    /// 5. Ask the answer model with the question and the joined context.
    ///
    /// # Errors
    /// [`ChatError::EmptyQuestion`] for blank input; otherwise the first
    /// upstream failure, unretried.
    pub async fn answer(&self, question: &str) -> Result<ChatAnswer, ChatError> {
        if question.trim().is_empty() {
            return Err(ChatError::EmptyQuestion);
        }

        let (embedding, category) =
            tokio::try_join!(self.embedder.embed(question), self.router.route(question))?;
        debug!(dim = embedding.len(), category = ?category, "embedded and routed");

        let Some(category) = category else {
            info!(strategy = %self.strategy(), "no category matched");
            return Ok(ChatAnswer {
                content: NO_CATEGORY_MESSAGE.to_string(),
                category: None,
                context_rows: 0,
                outcome: AnswerOutcome::NoCategory,
            });
        };

        let rows = self.store.lookup(category, &embedding).await?;
        let context = build_context(&rows);

        if context.is_empty() {
            info!(%category, rows = rows.len(), "lookup returned no usable context");
            return Ok(ChatAnswer {
                content: NO_CONTEXT_MESSAGE.to_string(),
                category: Some(category),
                context_rows: rows.len(),
                outcome: AnswerOutcome::EmptyContext,
            });
        }

        let user = build_user_prompt(question, &context);
        let content = self
            .answerer
            .complete(CompletionRequest {
                system: ANSWER_SYSTEM,
                user: &user,
                temperature: self.answer_temperature,
                max_tokens: self.answer_max_tokens,
            })
            .await?;

        info!(
            %category,
            rows = rows.len(),
            context_chars = context.len(),
            answer_len = content.len(),
            "answer composed"
        );

        Ok(ChatAnswer {
            content,
            category: Some(category),
            context_rows: rows.len(),
            outcome: AnswerOutcome::Answered,
        })
    }
}
