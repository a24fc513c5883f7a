//! # ScriptSearch
//!
//! Client-side orchestration for searching remotely indexed video transcripts.
//!
//! A search names a transcript source (a channel, a playlist or a single video
//! URL), a free-text query, or both. The crate provides:
//!
//! - **Query validation**: normalization plus stop-word, word-count and length limits
//! - **Source caching**: a bounded most-recently-used cache of resolved sources
//! - **Result handling**: stable multi-key sorting and fixed-size pagination
//! - **Orchestration**: a single async search call driving a small state machine
//! - **Observability**: structured events and `tracing` spans for each search
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use scriptsearch::prelude::*;
//!
//! let config = SearchConfig::from_env()?;
//! let api = Arc::new(HttpTranscriptApi::new(config.api.clone())?);
//! let orchestrator = SearchOrchestrator::from_config(api, &config)?;
//!
//! let outcome = orchestrator
//!     .search(Some("https://www.youtube.com/@channel"), Some("rust traits"))
//!     .await?;
//!
//! for result in orchestrator.view().results {
//!     println!("{}", result.title);
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    missing_docs,
    rust_2018_idioms
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

pub mod cache;
pub mod client;
pub mod config;
pub mod core;
pub mod errors;
pub mod events;
pub mod observability;
pub mod orchestrator;
pub mod results;
pub mod testing;
pub mod validation;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::cache::{CacheStats, RecencyCache, SourceCache};
    #[cfg(feature = "http")]
    pub use crate::client::HttpTranscriptApi;
    pub use crate::client::{ApiConfig, QueryRequest, ResolveRequest, TranscriptApi};
    pub use crate::config::SearchConfig;
    pub use crate::core::{Match, ResolvedSource, SearchResult, SearchStage};
    pub use crate::errors::{ApiError, SearchError, ValidationError};
    pub use crate::events::{EventSink, LoggingEventSink, NoOpEventSink};
    pub use crate::observability::{init_tracing, LogFormat};
    pub use crate::orchestrator::{SearchOrchestrator, SearchOutcome, SearchView};
    pub use crate::results::{sort_results, Paginator, SortField, SortSpec};
    pub use crate::validation::{QueryValidator, ValidatorConfig};
    pub use std::sync::Arc;
}
