use chat_router::ChatAnswer;
use serde::{Deserialize, Serialize};

/// Request payload for /api/chat.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    /// The user's question.
    pub message: String,
}

/// Response payload for /api/chat.
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    /// Model answer or one of the fixed replies.
    pub content: String,
    /// Table the context came from; absent when no category matched.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table: Option<&'static str>,
    /// Rows the lookup returned; absent when no lookup ran.
    #[serde(rename = "contextLength", skip_serializing_if = "Option::is_none")]
    pub context_length: Option<usize>,
}

impl From<ChatAnswer> for ChatResponse {
    fn from(a: ChatAnswer) -> Self {
        Self {
            content: a.content,
            table: a.category.map(|c| c.table()),
            context_length: a.category.map(|_| a.context_rows),
        }
    }
}
