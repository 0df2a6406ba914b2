//! Connection settings for the Supabase project.

use std::time::Duration;

use crate::errors::{StoreError, StoreResult};

/// Default request timeout when `SUPABASE_TIMEOUT_SECS` is unset.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for the RPC client.
#[derive(Clone, Debug, PartialEq)]
pub struct StoreConfig {
    /// Project URL, e.g. `https://abcd.supabase.co`.
    pub url: String,
    /// Anon (or service) key, sent as `apikey` and bearer token.
    pub api_key: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl StoreConfig {
    /// Creates a config with the default timeout.
    pub fn new(url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            api_key: api_key.into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Loads from `SUPABASE_URL`, `SUPABASE_ANON_KEY` and `SUPABASE_TIMEOUT_SECS`.
    pub fn from_env() -> StoreResult<Self> {
        Self::from_lookup(&|name| std::env::var(name).ok())
    }

    /// Same as [`StoreConfig::from_env`] with an injectable variable source.
    pub fn from_lookup(env: &dyn Fn(&str) -> Option<String>) -> StoreResult<Self> {
        let get = |name: &str| env(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let url = get("SUPABASE_URL")
            .ok_or_else(|| StoreError::Config("SUPABASE_URL is not set".into()))?;
        let api_key = get("SUPABASE_ANON_KEY")
            .ok_or_else(|| StoreError::Config("SUPABASE_ANON_KEY is not set".into()))?;
        let timeout_secs = match get("SUPABASE_TIMEOUT_SECS") {
            Some(v) => v.parse::<u64>().map_err(|_| {
                StoreError::Config(format!("SUPABASE_TIMEOUT_SECS: expected u64, got {v:?}"))
            })?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        let cfg = Self {
            url,
            api_key,
            timeout_secs,
        };
        cfg.validate()?;
        Ok(cfg)
    }

    /// Validates config values.
    pub fn validate(&self) -> StoreResult<()> {
        let url = self.url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(StoreError::Config(
                "url must start with http:// or https://".into(),
            ));
        }
        if self.api_key.trim().is_empty() {
            return Err(StoreError::Config("api_key is empty".into()));
        }
        if self.timeout_secs == 0 {
            return Err(StoreError::Config("timeout_secs must be > 0".into()));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_required_vars() {
        let env = |name: &str| match name {
            "SUPABASE_URL" => Some("https://demo.supabase.co".to_string()),
            "SUPABASE_ANON_KEY" => Some("anon".to_string()),
            _ => None,
        };
        let cfg = StoreConfig::from_lookup(&env).unwrap();
        assert_eq!(cfg, StoreConfig::new("https://demo.supabase.co", "anon"));
    }

    #[test]
    fn missing_key_is_config_error() {
        let env = |name: &str| (name == "SUPABASE_URL").then(|| "https://demo.supabase.co".to_string());
        assert!(matches!(
            StoreConfig::from_lookup(&env),
            Err(StoreError::Config(_))
        ));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let mut cfg = StoreConfig::new("https://demo.supabase.co", "anon");
        cfg.timeout_secs = 0;
        assert!(cfg.validate().is_err());
    }
}
