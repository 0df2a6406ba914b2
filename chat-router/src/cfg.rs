//! Runtime configuration loaded from environment variables.

use std::str::FromStr;

use crate::{error::ChatError, router::RoutingStrategy};

/// Config bag for the pipeline.
///
/// - `ROUTER_STRATEGY`     = `keyword` (default) or `classification`
/// - `ANSWER_TEMPERATURE`  = optional override for the answer call
/// - `ANSWER_MAX_TOKENS`   = optional override for the answer call
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChatConfig {
    pub strategy: RoutingStrategy,
    pub answer_temperature: Option<f32>,
    pub answer_max_tokens: Option<u32>,
}

impl ChatConfig {
    /// Build from the process environment.
    pub fn from_env() -> Result<Self, ChatError> {
        Self::from_lookup(&|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable source.
    ///
    /// # Example
    /// ```
    /// # use chat_router::{ChatConfig, RoutingStrategy};
    /// let cfg = ChatConfig::from_lookup(&|name| {
    ///     (name == "ROUTER_STRATEGY").then(|| "classification".to_string())
    /// })
    /// .unwrap();
    /// assert_eq!(cfg.strategy, RoutingStrategy::Classification);
    /// ```
    pub fn from_lookup(env: &dyn Fn(&str) -> Option<String>) -> Result<Self, ChatError> {
        let strategy = match non_blank(env, "ROUTER_STRATEGY") {
            Some(v) => v.parse()?,
            None => RoutingStrategy::default(),
        };

        Ok(Self {
            strategy,
            answer_temperature: parse(env, "ANSWER_TEMPERATURE")?,
            answer_max_tokens: parse(env, "ANSWER_MAX_TOKENS")?,
        })
    }
}

fn non_blank(env: &dyn Fn(&str) -> Option<String>, k: &str) -> Option<String> {
    env(k).map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn parse<T: FromStr>(env: &dyn Fn(&str) -> Option<String>, k: &str) -> Result<Option<T>, ChatError> {
    match non_blank(env, k) {
        Some(v) => v
            .parse()
            .map(Some)
            .map_err(|_| ChatError::Config(format!("{k}: cannot parse {v:?}"))),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_keyword_without_overrides() {
        let cfg = ChatConfig::from_lookup(&|_| None).unwrap();
        assert_eq!(cfg, ChatConfig::default());
        assert_eq!(cfg.strategy, RoutingStrategy::Keyword);
    }

    #[test]
    fn reads_answer_overrides() {
        let env = |name: &str| match name {
            "ANSWER_TEMPERATURE" => Some("0".to_string()),
            "ANSWER_MAX_TOKENS" => Some("300".to_string()),
            _ => None,
        };
        let cfg = ChatConfig::from_lookup(&env).unwrap();
        assert_eq!(cfg.answer_temperature, Some(0.0));
        assert_eq!(cfg.answer_max_tokens, Some(300));
    }

    #[test]
    fn bad_values_are_config_errors() {
        let env = |name: &str| (name == "ANSWER_MAX_TOKENS").then(|| "lots".to_string());
        assert!(matches!(
            ChatConfig::from_lookup(&env),
            Err(ChatError::Config(_))
        ));

        let env = |name: &str| (name == "ROUTER_STRATEGY").then(|| "magic".to_string());
        assert!(ChatConfig::from_lookup(&env).is_err());
    }
}
