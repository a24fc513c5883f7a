//! Test doubles for the transcript API.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::time::Duration;

use crate::client::{QueryRequest, QueryResponse, ResolveRequest, ResolveResponse, TranscriptApi};
use crate::core::{ResolvedSource, SearchResult};
use crate::errors::ApiError;

/// One call made against a [`ScriptedTranscriptApi`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiCall {
    /// A resolve call for the given URL.
    Resolve(String),
    /// A query call with the given payload.
    Query(QueryRequest),
}

/// A [`TranscriptApi`] that answers from a script and records every call.
///
/// Unknown URLs fail to resolve with a 404. Queries return the configured
/// result, an empty hit list by default.
#[derive(Debug)]
pub struct ScriptedTranscriptApi {
    resolutions: Mutex<HashMap<String, Result<ResolveResponse, ApiError>>>,
    query_result: Mutex<Result<QueryResponse, ApiError>>,
    latency: Mutex<Option<Duration>>,
    calls: Mutex<Vec<ApiCall>>,
}

impl Default for ScriptedTranscriptApi {
    fn default() -> Self {
        Self {
            resolutions: Mutex::new(HashMap::new()),
            query_result: Mutex::new(Ok(QueryResponse::default())),
            latency: Mutex::new(None),
            calls: Mutex::new(Vec::new()),
        }
    }
}

impl ScriptedTranscriptApi {
    /// Creates an API with no known sources and no hits.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes `url` resolve to `source`.
    #[must_use]
    pub fn with_source(self, url: impl Into<String>, source: ResolvedSource) -> Self {
        let response = ResolveResponse {
            channel_id: source.channel_id,
            video_ids: (!source.video_ids.is_empty()).then_some(source.video_ids),
        };
        self.resolutions.lock().insert(url.into(), Ok(response));
        self
    }

    /// Makes resolving `url` fail with `error`.
    #[must_use]
    pub fn with_resolve_error(self, url: impl Into<String>, error: ApiError) -> Self {
        self.resolutions.lock().insert(url.into(), Err(error));
        self
    }

    /// Makes `url` resolve successfully but with no identifiers.
    #[must_use]
    pub fn with_empty_resolution(self, url: impl Into<String>) -> Self {
        self.resolutions
            .lock()
            .insert(url.into(), Ok(ResolveResponse::default()));
        self
    }

    /// Sets the hits every query returns.
    #[must_use]
    pub fn with_hits(self, hits: Vec<SearchResult>) -> Self {
        self.set_hits(hits);
        self
    }

    /// Makes every query fail with `error`.
    #[must_use]
    pub fn with_query_error(self, error: ApiError) -> Self {
        *self.query_result.lock() = Err(error);
        self
    }

    /// Delays every call by `latency`.
    #[must_use]
    pub fn with_latency(self, latency: Duration) -> Self {
        *self.latency.lock() = Some(latency);
        self
    }

    /// Replaces the hits for subsequent queries.
    pub fn set_hits(&self, hits: Vec<SearchResult>) {
        *self.query_result.lock() = Ok(QueryResponse::new(hits));
    }

    /// Every call so far, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<ApiCall> {
        self.calls.lock().clone()
    }

    /// URLs passed to `resolve`, in order.
    #[must_use]
    pub fn resolve_calls(&self) -> Vec<String> {
        self.calls
            .lock()
            .iter()
            .filter_map(|call| match call {
                ApiCall::Resolve(url) => Some(url.clone()),
                ApiCall::Query(_) => None,
            })
            .collect()
    }

    /// Payloads passed to `query`, in order.
    #[must_use]
    pub fn query_calls(&self) -> Vec<QueryRequest> {
        self.calls
            .lock()
            .iter()
            .filter_map(|call| match call {
                ApiCall::Query(request) => Some(request.clone()),
                ApiCall::Resolve(_) => None,
            })
            .collect()
    }

    /// Forgets recorded calls.
    pub fn reset(&self) {
        self.calls.lock().clear();
    }

    async fn simulate_latency(&self) {
        let latency = *self.latency.lock();
        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }
    }
}

#[async_trait]
impl TranscriptApi for ScriptedTranscriptApi {
    async fn resolve(&self, request: &ResolveRequest) -> Result<ResolveResponse, ApiError> {
        self.calls.lock().push(ApiCall::Resolve(request.url.clone()));
        self.simulate_latency().await;

        self.resolutions
            .lock()
            .get(&request.url)
            .cloned()
            .unwrap_or_else(|| Err(ApiError::status(404, "unknown source")))
    }

    async fn query(&self, request: &QueryRequest) -> Result<QueryResponse, ApiError> {
        self.calls.lock().push(ApiCall::Query(request.clone()));
        self.simulate_latency().await;

        self.query_result.lock().clone()
    }
}
