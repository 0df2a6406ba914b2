//! Question → category routing.
//!
//! Two strategies exist and exactly one is active per deployment:
//!
//! - **Keyword**: lower-cases the question; `"product"` wins, then
//!   `"invoice"`, otherwise customer. Total: always returns a category.
//! - **Classification**: one short model call that replies with a category
//!   label or `NONE`. Partial: unrecognized replies mean "no category".

use std::{fmt, str::FromStr, sync::Arc};

use ai_llm_service::GenerateOptions;
use tracing::{debug, warn};

use crate::{
    category::Category,
    error::ChatError,
    prompt::{NONE_LABEL, classifier_system},
    providers::{Completer, CompletionRequest},
};

/// Token budget for the classification reply.
pub const CLASSIFIER_MAX_TOKENS: u32 = 10;

/// Configured routing strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RoutingStrategy {
    #[default]
    Keyword,
    Classification,
}

impl FromStr for RoutingStrategy {
    type Err = ChatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "keyword" => Ok(RoutingStrategy::Keyword),
            "classification" | "classifier" => Ok(RoutingStrategy::Classification),
            other => Err(ChatError::Config(format!(
                "unknown routing strategy {other:?} (expected \"keyword\" or \"classification\")"
            ))),
        }
    }
}

impl fmt::Display for RoutingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RoutingStrategy::Keyword => "keyword",
            RoutingStrategy::Classification => "classification",
        })
    }
}

/// Keyword routing. First match wins: `product` is checked before `invoice`.
pub fn route_by_keyword(question: &str) -> Category {
    let q = question.to_lowercase();
    if q.contains("product") {
        Category::Product
    } else if q.contains("invoice") {
        Category::Order
    } else {
        Category::Customer
    }
}

/// Interprets the classifier reply.
///
/// Whitespace, surrounding quotes/backticks and trailing periods (inside or
/// outside the quotes) are stripped, then the label is upper-cased and
/// matched exactly.
pub fn parse_classification(reply: &str) -> Option<Category> {
    let label = reply
        .trim()
        .trim_end_matches('.')
        .trim_matches(|c| matches!(c, '"' | '\'' | '`'))
        .trim()
        .trim_end_matches('.')
        .trim()
        .to_uppercase();

    let category = Category::from_label(&label);
    if category.is_none() && label != NONE_LABEL {
        warn!(reply = %reply, "classifier returned an unrecognized label; treating as no category");
    }
    category
}

/// Active router.
#[derive(Clone)]
pub enum CategoryRouter {
    Keyword,
    Classification { classifier: Arc<dyn Completer> },
}

impl CategoryRouter {
    pub fn strategy(&self) -> RoutingStrategy {
        match self {
            CategoryRouter::Keyword => RoutingStrategy::Keyword,
            CategoryRouter::Classification { .. } => RoutingStrategy::Classification,
        }
    }

    /// Picks a category; `Ok(None)` means nothing matched.
    ///
    /// # Errors
    /// Propagates the classifier's upstream failure; keyword routing never fails.
    pub async fn route(&self, question: &str) -> Result<Option<Category>, ChatError> {
        let category = match self {
            CategoryRouter::Keyword => Some(route_by_keyword(question)),
            CategoryRouter::Classification { classifier } => {
                let system = classifier_system();
                let opts = GenerateOptions::short_deterministic(CLASSIFIER_MAX_TOKENS);
                let reply = classifier
                    .complete(CompletionRequest {
                        system: &system,
                        user: question,
                        temperature: opts.temperature,
                        max_tokens: opts.max_tokens,
                    })
                    .await?;
                parse_classification(&reply)
            }
        };

        debug!(
            strategy = %self.strategy(),
            category = ?category,
            "question routed"
        );
        Ok(category)
    }
}

impl fmt::Debug for CategoryRouter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CategoryRouter")
            .field(&self.strategy())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;

    #[test]
    fn keyword_routes_product_first() {
        assert_eq!(
            route_by_keyword("What products do you have under $20?"),
            Category::Product
        );
        assert_eq!(route_by_keyword("PRODUCT list please"), Category::Product);
        assert_eq!(
            route_by_keyword("Which product is on invoice 42?"),
            Category::Product
        );
    }

    #[test]
    fn keyword_routes_invoice_to_order() {
        assert_eq!(route_by_keyword("Show my latest Invoice"), Category::Order);
    }

    #[test]
    fn keyword_defaults_to_customer() {
        assert_eq!(route_by_keyword("Who lives in Berlin?"), Category::Customer);
        assert_eq!(route_by_keyword("asdkjasd"), Category::Customer);
        // "order" is not a keyword.
        assert_eq!(route_by_keyword("where is my order"), Category::Customer);
    }

    #[test]
    fn classification_labels_are_parsed_leniently() {
        assert_eq!(parse_classification("PRODUCT"), Some(Category::Product));
        assert_eq!(parse_classification("  order\n"), Some(Category::Order));
        assert_eq!(parse_classification("\"Customer\"."), Some(Category::Customer));
        assert_eq!(parse_classification("\"PRODUCT.\""), Some(Category::Product));
        assert_eq!(parse_classification("'order'."), Some(Category::Order));
        assert_eq!(parse_classification("Product."), Some(Category::Product));
        assert_eq!(parse_classification("NONE"), None);
        assert_eq!(parse_classification("I think PRODUCT"), None);
        assert_eq!(parse_classification(""), None);
    }

    #[test]
    fn strategy_parses_from_config_values() {
        assert_eq!(
            "keyword".parse::<RoutingStrategy>().unwrap(),
            RoutingStrategy::Keyword
        );
        assert_eq!(
            " Classification ".parse::<RoutingStrategy>().unwrap(),
            RoutingStrategy::Classification
        );
        assert!("both".parse::<RoutingStrategy>().is_err());
    }

    struct ScriptedClassifier {
        reply: &'static str,
        seen: Mutex<Vec<(String, Option<f32>, Option<u32>)>>,
    }

    #[async_trait]
    impl Completer for ScriptedClassifier {
        async fn complete(&self, req: CompletionRequest<'_>) -> Result<String, ChatError> {
            self.seen.lock().unwrap().push((
                req.user.to_string(),
                req.temperature,
                req.max_tokens,
            ));
            Ok(self.reply.to_string())
        }
    }

    #[tokio::test]
    async fn classification_router_sends_deterministic_short_call() {
        let classifier = Arc::new(ScriptedClassifier {
            reply: "ORDER",
            seen: Mutex::new(Vec::new()),
        });
        let router = CategoryRouter::Classification {
            classifier: classifier.clone(),
        };

        let category = router.route("When did my parcel ship?").await.unwrap();
        assert_eq!(category, Some(Category::Order));

        let seen = classifier.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].0, "When did my parcel ship?");
        assert_eq!(seen[0].1, Some(0.0));
        assert_eq!(seen[0].2, Some(CLASSIFIER_MAX_TOKENS));
    }

    #[tokio::test]
    async fn routing_is_stable_for_repeated_questions() {
        let classifier = Arc::new(ScriptedClassifier {
            reply: "PRODUCT",
            seen: Mutex::new(Vec::new()),
        });
        let router = CategoryRouter::Classification { classifier };
        let q = "Do you sell mugs?";
        assert_eq!(
            router.route(q).await.unwrap(),
            router.route(q).await.unwrap()
        );

        let kw = CategoryRouter::Keyword;
        assert_eq!(kw.route(q).await.unwrap(), kw.route(q).await.unwrap());
    }
}
