//! What a search call returns and what the presentation layer reads.

use serde::Serialize;

use crate::core::{SearchResult, SearchStage};
use crate::results::SortSpec;

/// Message shown after a query that matched nothing.
pub const NO_RESULTS_MESSAGE: &str = "No results found.";

/// Message shown after a URL-only call finished ingesting the source.
pub const INGESTION_COMPLETE_MESSAGE: &str = "Ingestion complete.";

/// Message shown when a search was dropped before it finished.
pub const CANCELLED_MESSAGE: &str = "Search cancelled.";

/// Successful end of a search call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SearchOutcome {
    /// The query matched at least one video.
    Results {
        /// Number of hits.
        total: usize,
        /// First page, sorted.
        page: Vec<SearchResult>,
    },
    /// The query ran and matched nothing.
    NoResults,
    /// A source URL was given without a query; it is now resolved.
    IngestionComplete {
        /// The source URL.
        url: String,
        /// True if the source was already cached and nothing was fetched.
        cached: bool,
    },
}

impl SearchOutcome {
    /// Number of hits, zero for non-query outcomes.
    #[must_use]
    pub fn total(&self) -> usize {
        match self {
            Self::Results { total, .. } => *total,
            Self::NoResults | Self::IngestionComplete { .. } => 0,
        }
    }
}

/// Snapshot of everything a results page renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchView {
    /// Current stage.
    pub stage: SearchStage,
    /// Spinner label while a network phase is pending.
    pub loading_label: Option<&'static str>,
    /// Status or error message.
    pub message: Option<String>,
    /// Results on the current page, in sort order.
    pub results: Vec<SearchResult>,
    /// Zero-based index of the current page.
    pub page_index: usize,
    /// Number of pages.
    pub page_count: usize,
    /// Number of results across all pages.
    pub total: usize,
    /// Ordering in effect.
    pub sort: SortSpec,
}

impl SearchView {
    /// True while a search is in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading_label.is_some()
    }
}
