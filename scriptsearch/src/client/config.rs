//! Configuration for the transcript API client.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Base URL of the hosted transcript API.
pub const DEFAULT_API_URL: &str = "https://us-central1-scriptsearch.cloudfunctions.net/transcript-api";

/// Endpoint and transport settings for [`HttpTranscriptApi`](super::HttpTranscriptApi).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Service base URL, without a trailing slash.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Path of the resolve endpoint.
    #[serde(default = "default_resolve_path")]
    pub resolve_path: String,
    /// Path of the query endpoint.
    #[serde(default = "default_query_path")]
    pub query_path: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: f64,
    /// User agent string.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_base_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_resolve_path() -> String {
    "/resolve".to_string()
}

fn default_query_path() -> String {
    "/search".to_string()
}

fn default_timeout() -> f64 {
    30.0
}

fn default_user_agent() -> String {
    concat!("scriptsearch/", env!("CARGO_PKG_VERSION")).to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            resolve_path: default_resolve_path(),
            query_path: default_query_path(),
            timeout_seconds: default_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

impl ApiConfig {
    /// Creates a configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the base URL. A trailing slash is dropped.
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Sets the timeout.
    #[must_use]
    pub fn with_timeout(mut self, seconds: f64) -> Self {
        self.timeout_seconds = seconds;
        self
    }

    /// Sets the user agent.
    #[must_use]
    pub fn with_user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = agent.into();
        self
    }

    /// Full resolve endpoint URL.
    #[must_use]
    pub fn resolve_url(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), self.resolve_path)
    }

    /// Full query endpoint URL.
    #[must_use]
    pub fn query_url(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), self.query_path)
    }

    /// Timeout as a duration. Non-positive or non-finite values fall back to
    /// the default.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::try_from_secs_f64(self.timeout_seconds)
            .ok()
            .filter(|d| !d.is_zero())
            .unwrap_or_else(|| Duration::from_secs_f64(default_timeout()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_config_defaults() {
        let config = ApiConfig::default();
        assert_eq!(config.base_url, DEFAULT_API_URL);
        assert_eq!(config.resolve_url(), format!("{DEFAULT_API_URL}/resolve"));
        assert_eq!(config.query_url(), format!("{DEFAULT_API_URL}/search"));
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert!(config.user_agent.starts_with("scriptsearch/"));
    }

    #[test]
    fn test_api_config_builder() {
        let config = ApiConfig::new()
            .with_base_url("http://localhost:8080/")
            .with_timeout(2.5)
            .with_user_agent("test-agent");

        assert_eq!(config.query_url(), "http://localhost:8080/search");
        assert_eq!(config.timeout(), Duration::from_millis(2500));
        assert_eq!(config.user_agent, "test-agent");
    }

    #[test]
    fn test_invalid_timeout_falls_back() {
        assert_eq!(ApiConfig::new().with_timeout(-1.0).timeout(), Duration::from_secs(30));
        assert_eq!(ApiConfig::new().with_timeout(0.0).timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_api_config_partial_json() {
        let config: ApiConfig =
            serde_json::from_str(r#"{"base_url": "http://example.test", "query_path": "/q"}"#).unwrap();
        assert_eq!(config.query_url(), "http://example.test/q");
        assert_eq!(config.resolve_path, "/resolve");
    }

    #[test]
    fn test_trailing_slash_in_json_base_url() {
        let config: ApiConfig = serde_json::from_str(r#"{"base_url": "http://example.test/"}"#).unwrap();
        assert_eq!(config.query_url(), "http://example.test/search");
        assert_eq!(config.resolve_url(), "http://example.test/resolve");
    }
}
