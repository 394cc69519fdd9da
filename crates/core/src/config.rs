//! Application configuration
//!
//! The only externally supplied value the frontend strictly needs is the API
//! base URL. Everything else has defaults and can be overridden from
//! `FASTADMIN_*` environment variables (nested keys use `__`, e.g.
//! `FASTADMIN_QUERY__STALE_TIME_SECS=60`). `VITE_API_URL` is accepted as an
//! alias for `FASTADMIN_API_URL` so existing deployment env files keep working.

use crate::error::CoreResult;
use config::{Config, ConfigError, Environment, Map};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// API base URL used when nothing is configured
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Trait for validating configuration values
pub trait ValidateConfig {
    /// Returns Ok(()) if valid, or an error describing what's wrong
    fn validate(&self) -> Result<(), ConfigError>;
}

/// Top-level frontend configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Base URL of the backend API, without the `/api/v1` prefix
    pub api_url: String,
    /// Log level filter (e.g. "info", "fastadmin_session=debug")
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Query cache and retry settings
    #[serde(default)]
    pub query: QueryConfig,
}

/// Query cache freshness and retry configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryConfig {
    /// How long fetched data is served without hitting the network
    #[serde(default = "default_stale_time_secs")]
    pub stale_time_secs: u64,
    /// How long unused data stays in the cache
    #[serde(default = "default_gc_time_secs")]
    pub gc_time_secs: u64,
    /// Retries after the first failed attempt
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    /// First backoff delay; doubled on every retry
    #[serde(default = "default_retry_base_delay_ms")]
    pub retry_base_delay_ms: u64,
    /// Upper bound for a single backoff delay
    #[serde(default = "default_retry_max_delay_ms")]
    pub retry_max_delay_ms: u64,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            stale_time_secs: default_stale_time_secs(),
            gc_time_secs: default_gc_time_secs(),
            max_retries: default_max_retries(),
            retry_base_delay_ms: default_retry_base_delay_ms(),
            retry_max_delay_ms: default_retry_max_delay_ms(),
        }
    }
}

impl QueryConfig {
    pub const fn stale_time(&self) -> Duration {
        Duration::from_secs(self.stale_time_secs)
    }

    pub const fn gc_time(&self) -> Duration {
        Duration::from_secs(self.gc_time_secs)
    }

    pub const fn retry_base_delay(&self) -> Duration {
        Duration::from_millis(self.retry_base_delay_ms)
    }

    pub const fn retry_max_delay(&self) -> Duration {
        Duration::from_millis(self.retry_max_delay_ms)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            log_level: default_log_level(),
            query: QueryConfig::default(),
        }
    }
}

impl AppConfig {
    /// Build a configuration for a known API URL with default settings
    pub fn with_api_url(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            ..Self::default()
        }
    }

    /// Load configuration from the process environment
    pub fn load() -> CoreResult<Self> {
        Self::load_from(None)
    }

    /// Load configuration from an explicit variable map instead of the
    /// process environment (`None` reads the real environment).
    pub fn load_from(vars: Option<Map<String, String>>) -> CoreResult<Self> {
        let vite_url = match &vars {
            Some(vars) => vars.get("VITE_API_URL").cloned(),
            None => std::env::var("VITE_API_URL").ok(),
        };

        let config = Config::builder()
            .set_default("api_url", vite_url.unwrap_or_else(|| DEFAULT_API_URL.to_string()))?
            .add_source(
                Environment::with_prefix("FASTADMIN")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .source(vars),
            )
            .build()?;

        let app: Self = config.try_deserialize()?;
        app.validate()?;
        tracing::debug!(api_url = %app.api_url, "Loaded configuration");
        Ok(app)
    }

    /// Load configuration from `(name, value)` pairs, for targets without a
    /// process environment such as a browser bundle with values baked in at
    /// compile time
    pub fn from_vars<I, K, V>(pairs: I) -> CoreResult<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let vars = pairs
            .into_iter()
            .map(|(name, value)| (name.into(), value.into()))
            .collect();
        Self::load_from(Some(vars))
    }

    /// The API URL with any trailing slash removed
    pub fn base_url(&self) -> &str {
        self.api_url.trim_end_matches('/')
    }
}

impl ValidateConfig for AppConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        let url = url::Url::parse(&self.api_url)
            .map_err(|e| ConfigError::Message(format!("api_url '{}' is not a URL: {e}", self.api_url)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::Message(format!(
                "api_url must use http or https, got '{}'",
                url.scheme()
            )));
        }
        self.query.validate()
    }
}

impl ValidateConfig for QueryConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.gc_time_secs < self.stale_time_secs {
            return Err(ConfigError::Message(
                "query.gc_time_secs must not be shorter than query.stale_time_secs".into(),
            ));
        }
        if self.retry_max_delay_ms < self.retry_base_delay_ms {
            return Err(ConfigError::Message(
                "query.retry_max_delay_ms must not be shorter than query.retry_base_delay_ms".into(),
            ));
        }
        Ok(())
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

const fn default_stale_time_secs() -> u64 {
    5 * 60
}

const fn default_gc_time_secs() -> u64 {
    30 * 60
}

const fn default_max_retries() -> u32 {
    3
}

const fn default_retry_base_delay_ms() -> u64 {
    1_000
}

const fn default_retry_max_delay_ms() -> u64 {
    30_000
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CoreError;

    fn vars(pairs: &[(&str, &str)]) -> Option<Map<String, String>> {
        Some(
            pairs
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
        )
    }

    #[test]
    fn defaults_apply_without_variables() {
        let config = AppConfig::load_from(vars(&[])).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.query.stale_time(), Duration::from_secs(300));
        assert_eq!(config.query.gc_time(), Duration::from_secs(1800));
        assert_eq!(config.query.max_retries, 3);
    }

    #[test]
    fn prefixed_variables_override_defaults() {
        let config = AppConfig::load_from(vars(&[
            ("FASTADMIN_API_URL", "https://api.example.com/"),
            ("FASTADMIN_LOG_LEVEL", "debug"),
            ("FASTADMIN_QUERY__STALE_TIME_SECS", "60"),
        ]))
        .unwrap();

        assert_eq!(config.api_url, "https://api.example.com/");
        assert_eq!(config.base_url(), "https://api.example.com");
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.query.stale_time_secs, 60);
        assert_eq!(config.query.gc_time_secs, 1800);
    }

    #[test]
    fn vite_alias_is_used_when_prefixed_variable_is_absent() {
        let config =
            AppConfig::load_from(vars(&[("VITE_API_URL", "http://backend:8000")])).unwrap();
        assert_eq!(config.api_url, "http://backend:8000");

        let config = AppConfig::load_from(vars(&[
            ("VITE_API_URL", "http://backend:8000"),
            ("FASTADMIN_API_URL", "http://override:9000"),
        ]))
        .unwrap();
        assert_eq!(config.api_url, "http://override:9000");
    }

    #[test]
    fn pairs_load_like_environment_variables() {
        let config = AppConfig::from_vars([
            ("FASTADMIN_API_URL", "https://admin.example.com"),
            ("FASTADMIN_QUERY__MAX_RETRIES", "1"),
        ])
        .unwrap();
        assert_eq!(config.api_url, "https://admin.example.com");
        assert_eq!(config.query.max_retries, 1);
        assert_eq!(config.log_level, "info");

        let err = AppConfig::from_vars([("FASTADMIN_API_URL", "mailto:a@b")]).unwrap_err();
        assert!(matches!(err, CoreError::InvalidConfig { .. }));
    }

    #[test]
    fn rejects_non_http_urls() {
        let err = AppConfig::load_from(vars(&[("FASTADMIN_API_URL", "ftp://files")])).unwrap_err();
        assert!(matches!(err, CoreError::InvalidConfig { .. }));

        assert!(AppConfig::with_api_url("not a url").validate().is_err());
    }

    #[test]
    fn rejects_gc_shorter_than_stale() {
        let mut config = AppConfig::default();
        config.query.gc_time_secs = 10;
        config.query.stale_time_secs = 20;
        assert!(config.validate().is_err());
    }
}
