//! `reqwest` implementation of [`TranscriptApi`].

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use super::config::ApiConfig;
use super::protocols::{QueryRequest, QueryResponse, ResolveRequest, ResolveResponse, TranscriptApi};
use crate::errors::ApiError;

/// Talks to the transcript API over HTTPS, posting JSON bodies.
#[derive(Debug, Clone)]
pub struct HttpTranscriptApi {
    client: reqwest::Client,
    config: ApiConfig,
}

impl HttpTranscriptApi {
    /// Builds a client from configuration.
    pub fn new(config: ApiConfig) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        Ok(Self { client, config })
    }

    /// The configuration in use.
    #[must_use]
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    async fn post<B, R>(&self, url: &str, body: &B) -> Result<R, ApiError>
    where
        B: Serialize + Sync + ?Sized,
        R: DeserializeOwned,
    {
        debug!(url = %url, "POST");
        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(ApiError::status(status.as_u16(), text));
        }

        response
            .json::<R>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }
}

#[async_trait]
impl TranscriptApi for HttpTranscriptApi {
    async fn resolve(&self, request: &ResolveRequest) -> Result<ResolveResponse, ApiError> {
        self.post(&self.config.resolve_url(), request).await
    }

    async fn query(&self, request: &QueryRequest) -> Result<QueryResponse, ApiError> {
        self.post(&self.config.query_url(), request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_client_builds_from_config() {
        let api = HttpTranscriptApi::new(ApiConfig::new().with_base_url("http://127.0.0.1:9")).unwrap();
        assert_eq!(api.config().resolve_url(), "http://127.0.0.1:9/resolve");
    }

    #[tokio::test]
    async fn test_unreachable_host_is_transport_error() {
        let api = HttpTranscriptApi::new(
            ApiConfig::new()
                .with_base_url("http://127.0.0.1:9")
                .with_timeout(1.0),
        )
        .unwrap();

        let err = api.resolve(&ResolveRequest::new("https://youtube.com/@x")).await.unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)));
    }
}
