//! Public result types re-used by the HTTP layer.

use crate::category::Category;

/// How the pipeline produced its reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerOutcome {
    /// The model answered from retrieved context.
    Answered,
    /// Router found no matching category; fixed apology returned.
    NoCategory,
    /// Lookup returned no usable text; fixed "nothing found" returned.
    EmptyContext,
}

/// Final reply for one question, with light diagnostics.
///
/// # Example
/// ```
/// use chat_router::{AnswerOutcome, Category, ChatAnswer};
/// let a = ChatAnswer {
///     content: "The mug costs $12.".into(),
///     category: Some(Category::Product),
///     context_rows: 3,
///     outcome: AnswerOutcome::Answered,
/// };
/// assert_eq!(a.category.map(Category::table), Some("products"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ChatAnswer {
    pub content: String,
    /// Category the question was routed to; `None` when nothing matched.
    pub category: Option<Category>,
    /// Rows returned by the lookup (before empty payloads were dropped).
    pub context_rows: usize,
    pub outcome: AnswerOutcome,
}
