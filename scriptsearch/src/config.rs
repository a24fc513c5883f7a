//! Top-level configuration.
//!
//! Every tunable of a search session lives in [`SearchConfig`]. Values come
//! from defaults, optionally overlaid by a JSON file and then by
//! `SCRIPTSEARCH_*` environment variables.

use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use std::path::Path;
use std::time::Duration;

use crate::cache::DEFAULT_CACHE_CAPACITY;
use crate::client::ApiConfig;
use crate::errors::SearchError;
use crate::results::{SortSpec, DEFAULT_PAGE_SIZE};
use crate::validation::ValidatorConfig;

/// Default wait between resolving a new source and querying it.
pub const DEFAULT_INGESTION_DELAY_MS: u64 = 6500;

/// Environment variable overriding the API base URL.
pub const ENV_API_URL: &str = "SCRIPTSEARCH_API_URL";
/// Environment variable overriding the cache capacity.
pub const ENV_CACHE_CAPACITY: &str = "SCRIPTSEARCH_CACHE_CAPACITY";
/// Environment variable overriding the page size.
pub const ENV_PAGE_SIZE: &str = "SCRIPTSEARCH_PAGE_SIZE";
/// Environment variable overriding the ingestion delay, in milliseconds.
pub const ENV_INGESTION_DELAY_MS: &str = "SCRIPTSEARCH_INGESTION_DELAY_MS";
/// Environment variable overriding the query word limit.
pub const ENV_WORD_LIMIT: &str = "SCRIPTSEARCH_WORD_LIMIT";
/// Environment variable overriding the query character limit.
pub const ENV_CHARACTER_LIMIT: &str = "SCRIPTSEARCH_CHARACTER_LIMIT";

/// Configuration of a search session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Transcript API endpoints.
    #[serde(default)]
    pub api: ApiConfig,
    /// Query validation limits.
    #[serde(default)]
    pub validator: ValidatorConfig,
    /// Number of resolved sources remembered.
    #[serde(default = "default_cache_capacity")]
    pub cache_capacity: usize,
    /// Results per page.
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    /// Wait after resolving a new source, in milliseconds.
    #[serde(default = "default_ingestion_delay_ms")]
    pub ingestion_delay_ms: u64,
    /// Ordering applied until the caller picks another.
    #[serde(default)]
    pub default_sort: SortSpec,
}

fn default_cache_capacity() -> usize {
    DEFAULT_CACHE_CAPACITY
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

fn default_ingestion_delay_ms() -> u64 {
    DEFAULT_INGESTION_DELAY_MS
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            validator: ValidatorConfig::default(),
            cache_capacity: default_cache_capacity(),
            page_size: default_page_size(),
            ingestion_delay_ms: default_ingestion_delay_ms(),
            default_sort: SortSpec::default(),
        }
    }
}

impl SearchConfig {
    /// Creates a configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API configuration.
    #[must_use]
    pub fn with_api(mut self, api: ApiConfig) -> Self {
        self.api = api;
        self
    }

    /// Sets the validator configuration.
    #[must_use]
    pub fn with_validator(mut self, validator: ValidatorConfig) -> Self {
        self.validator = validator;
        self
    }

    /// Sets the cache capacity.
    #[must_use]
    pub fn with_cache_capacity(mut self, capacity: usize) -> Self {
        self.cache_capacity = capacity;
        self
    }

    /// Sets the page size.
    #[must_use]
    pub fn with_page_size(mut self, size: usize) -> Self {
        self.page_size = size;
        self
    }

    /// Sets the ingestion delay.
    #[must_use]
    pub fn with_ingestion_delay(mut self, delay: Duration) -> Self {
        self.ingestion_delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Sets the initial sort.
    #[must_use]
    pub fn with_default_sort(mut self, sort: SortSpec) -> Self {
        self.default_sort = sort;
        self
    }

    /// Ingestion delay as a duration.
    #[must_use]
    pub fn ingestion_delay(&self) -> Duration {
        Duration::from_millis(self.ingestion_delay_ms)
    }

    /// Cache capacity, checked to be non-zero.
    pub fn cache_capacity(&self) -> Result<NonZeroUsize, SearchError> {
        NonZeroUsize::new(self.cache_capacity)
            .ok_or_else(|| SearchError::Config("cache_capacity must be at least 1".to_string()))
    }

    /// Page size, checked to be non-zero.
    pub fn page_size(&self) -> Result<NonZeroUsize, SearchError> {
        NonZeroUsize::new(self.page_size)
            .ok_or_else(|| SearchError::Config("page_size must be at least 1".to_string()))
    }

    /// Checks every value the orchestrator relies on.
    pub fn validate(&self) -> Result<(), SearchError> {
        self.cache_capacity()?;
        self.page_size()?;
        if self.validator.word_limit == 0 {
            return Err(SearchError::Config("validator.word_limit must be at least 1".to_string()));
        }
        if self.validator.character_limit == 0 {
            return Err(SearchError::Config(
                "validator.character_limit must be at least 1".to_string(),
            ));
        }
        if self.api.base_url.trim().is_empty() {
            return Err(SearchError::Config("api.base_url must not be empty".to_string()));
        }
        Ok(())
    }

    /// Loads a JSON file. Missing keys take their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, SearchError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| SearchError::Config(format!("cannot read {}: {e}", path.display())))?;
        let mut config: Self = serde_json::from_str(&text)
            .map_err(|e| SearchError::Config(format!("cannot parse {}: {e}", path.display())))?;
        config.api.base_url = config.api.base_url.trim_end_matches('/').to_string();
        config.validate()?;
        Ok(config)
    }

    /// Defaults overlaid with the process environment.
    pub fn from_env() -> Result<Self, SearchError> {
        Self::default().apply_env_overrides(|key| std::env::var(key).ok())
    }

    /// Overlays values returned by `lookup` for the `SCRIPTSEARCH_*` keys.
    ///
    /// Unset or blank variables are ignored; unparsable ones are an error.
    pub fn apply_env_overrides<F>(mut self, lookup: F) -> Result<Self, SearchError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        if let Some(url) = get(ENV_API_URL) {
            self.api = self.api.with_base_url(url);
        }
        if let Some(value) = get(ENV_CACHE_CAPACITY) {
            self.cache_capacity = parse_env(ENV_CACHE_CAPACITY, &value)?;
        }
        if let Some(value) = get(ENV_PAGE_SIZE) {
            self.page_size = parse_env(ENV_PAGE_SIZE, &value)?;
        }
        if let Some(value) = get(ENV_INGESTION_DELAY_MS) {
            self.ingestion_delay_ms = parse_env(ENV_INGESTION_DELAY_MS, &value)?;
        }
        if let Some(value) = get(ENV_WORD_LIMIT) {
            self.validator.word_limit = parse_env(ENV_WORD_LIMIT, &value)?;
        }
        if let Some(value) = get(ENV_CHARACTER_LIMIT) {
            self.validator.character_limit = parse_env(ENV_CHARACTER_LIMIT, &value)?;
        }

        self.validate()?;
        Ok(self)
    }
}

fn parse_env<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, SearchError> {
    value
        .parse()
        .map_err(|_| SearchError::Config(format!("{key} has invalid value {value:?}")))
}
