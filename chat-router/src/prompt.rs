//! Prompts and fixed replies.

use vector_store::ContextRow;

use crate::category::Category;

/// Reply when the router finds no category for the question.
pub const NO_CATEGORY_MESSAGE: &str = "I apologize, but I can only help with questions related to customers, products, or orders. Could you please rephrase your question?";

/// Reply when the lookup produced no usable context.
pub const NO_CONTEXT_MESSAGE: &str =
    "I couldn't find any relevant information to answer your question.";

/// System instruction for the final, grounded answer.
pub const ANSWER_SYSTEM: &str = "You are a helpful assistant that answers questions about e-commerce data. Use only the provided context to answer questions. If you can't find the information in the context, say so.";

/// Token the classifier returns when no category fits.
pub const NONE_LABEL: &str = "NONE";

/// System instruction for the one-word classification call.
///
/// Lists every category with its topics, plus the `NONE` escape hatch.
pub fn classifier_system() -> String {
    let mut out = String::from(
        "You route questions about an online shop to the right data source.\n\
         Reply with exactly one word from this list and nothing else:\n\n",
    );
    for c in Category::ALL {
        out.push_str(c.label());
        out.push_str(": ");
        out.push_str(&c.topics().join("; "));
        out.push('\n');
    }
    out.push_str(NONE_LABEL);
    out.push_str(": the question has nothing to do with customers, products or orders\n\n");
    out.push_str(
        "Be lenient: if the question could reasonably be answered from one of the sources, \
         pick it. Use NONE only for clearly unrelated input.",
    );
    out
}

/// Newline-joined text payloads, in the order the store returned them.
///
/// Rows whose payload is blank are skipped, so an all-blank result yields `""`.
pub fn build_context(rows: &[ContextRow]) -> String {
    rows.iter()
        .map(ContextRow::text)
        .filter(|t| !t.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// User turn for the final answer: the question followed by the context block.
pub fn build_user_prompt(question: &str, context: &str) -> String {
    format!("Question: {question}\nContext: {context}")
}
