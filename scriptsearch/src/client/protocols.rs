//! Network boundary of the orchestrator.
//!
//! The orchestrator only sees [`TranscriptApi`]. The HTTP adapter, the
//! scripted test double and any future transport all implement it.

use async_trait::async_trait;
use serde::{Deserialize, Deserializer, Serialize};

use crate::core::{ResolvedSource, SearchResult};
use crate::errors::ApiError;

/// Request to resolve a source URL into backend identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolveRequest {
    /// Channel, playlist or video URL.
    pub url: String,
}

impl ResolveRequest {
    /// Creates a resolve request.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

/// Backend answer to a resolve request.
///
/// Responses may carry more fields than these; only the identifiers needed to
/// scope a later query are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolveResponse {
    /// Resolved channel identifier.
    #[serde(default)]
    pub channel_id: Option<String>,
    /// Resolved video identifiers.
    #[serde(default)]
    pub video_ids: Option<Vec<String>>,
}

impl ResolveResponse {
    /// Extracts the cacheable identifiers, or `None` if nothing was resolved.
    #[must_use]
    pub fn into_source(self) -> Option<ResolvedSource> {
        let source = ResolvedSource {
            channel_id: self.channel_id.filter(|id| !id.is_empty()),
            video_ids: self
                .video_ids
                .unwrap_or_default()
                .into_iter()
                .filter(|id| !id.is_empty())
                .collect(),
        };
        (!source.is_empty()).then_some(source)
    }
}

/// Query payload. Either searches the whole corpus or is scoped to a
/// previously resolved source.
///
/// On the wire a scoped request is the source identifiers plus `query`; a
/// request with no identifiers decodes as [`QueryRequest::FullCorpus`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum QueryRequest {
    /// Scoped to a resolved channel or set of videos.
    Scoped {
        /// Identifiers of the source.
        #[serde(flatten)]
        source: ResolvedSource,
        /// Normalized query text.
        query: String,
    },
    /// Searches every indexed transcript.
    FullCorpus {
        /// Normalized query text.
        query: String,
    },
}

impl QueryRequest {
    /// Whole-corpus query.
    #[must_use]
    pub fn full_corpus(query: impl Into<String>) -> Self {
        Self::FullCorpus {
            query: query.into(),
        }
    }

    /// Query scoped to `source`.
    #[must_use]
    pub fn scoped(source: ResolvedSource, query: impl Into<String>) -> Self {
        Self::Scoped {
            source,
            query: query.into(),
        }
    }

    /// The query text.
    #[must_use]
    pub fn query(&self) -> &str {
        match self {
            Self::Scoped { query, .. } | Self::FullCorpus { query } => query,
        }
    }

    /// The source scope, if any.
    #[must_use]
    pub fn source(&self) -> Option<&ResolvedSource> {
        match self {
            Self::Scoped { source, .. } => Some(source),
            Self::FullCorpus { .. } => None,
        }
    }
}

#[derive(Deserialize)]
struct RawQueryRequest {
    #[serde(flatten)]
    source: ResolvedSource,
    query: String,
}

impl<'de> Deserialize<'de> for QueryRequest {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawQueryRequest::deserialize(deserializer)?;
        Ok(if raw.source.is_empty() {
            Self::FullCorpus { query: raw.query }
        } else {
            Self::Scoped {
                source: raw.source,
                query: raw.query,
            }
        })
    }
}

/// Backend answer to a query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryResponse {
    /// Matching videos. An empty list is a valid answer.
    #[serde(default)]
    pub hits: Vec<SearchResult>,
}

impl QueryResponse {
    /// Wraps a list of hits.
    #[must_use]
    pub fn new(hits: Vec<SearchResult>) -> Self {
        Self { hits }
    }
}

/// The remote transcript search service.
#[async_trait]
pub trait TranscriptApi: Send + Sync {
    /// Resolves a source URL, triggering ingestion on the backend.
    async fn resolve(&self, request: &ResolveRequest) -> Result<ResolveResponse, ApiError>;

    /// Runs a query.
    async fn query(&self, request: &QueryRequest) -> Result<QueryResponse, ApiError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_full_corpus_wire_shape() {
        let json = serde_json::to_value(QueryRequest::full_corpus("rust async")).unwrap();
        assert_eq!(json, serde_json::json!({"query": "rust async"}));
    }

    #[test]
    fn test_scoped_wire_shape() {
        let channel = QueryRequest::scoped(ResolvedSource::channel("UC1"), "borrow checker");
        assert_eq!(
            serde_json::to_value(&channel).unwrap(),
            serde_json::json!({"channel_id": "UC1", "query": "borrow checker"})
        );

        let videos = QueryRequest::scoped(ResolvedSource::videos(["v1", "v2"]), "lifetimes");
        assert_eq!(
            serde_json::to_value(&videos).unwrap(),
            serde_json::json!({"video_ids": ["v1", "v2"], "query": "lifetimes"})
        );
    }

    #[test]
    fn test_query_request_decodes_both_shapes() {
        let scoped: QueryRequest =
            serde_json::from_value(serde_json::json!({"channel_id": "UC1", "query": "q"})).unwrap();
        assert_eq!(scoped.source(), Some(&ResolvedSource::channel("UC1")));

        let full: QueryRequest = serde_json::from_value(serde_json::json!({"query": "q"})).unwrap();
        assert_eq!(full, QueryRequest::full_corpus("q"));
        assert_eq!(full.query(), "q");
    }

    #[test]
    fn test_resolve_response_into_source() {
        let response: ResolveResponse = serde_json::from_value(serde_json::json!({
            "channel_id": "UC1",
            "title": "ignored"
        }))
        .unwrap();
        assert_eq!(response.into_source(), Some(ResolvedSource::channel("UC1")));

        let playlist = ResolveResponse {
            channel_id: None,
            video_ids: Some(vec!["v1".to_string()]),
        };
        assert_eq!(playlist.into_source(), Some(ResolvedSource::videos(["v1"])));
    }

    #[test]
    fn test_empty_resolve_response_has_no_source() {
        assert_eq!(ResolveResponse::default().into_source(), None);

        let blank = ResolveResponse {
            channel_id: Some(String::new()),
            video_ids: Some(vec![]),
        };
        assert_eq!(blank.into_source(), None);
    }

    #[test]
    fn test_query_response_defaults_to_no_hits() {
        let response: QueryResponse = serde_json::from_str("{}").unwrap();
        assert!(response.hits.is_empty());
    }
}
