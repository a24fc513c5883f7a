//! Search lifecycle events.
//!
//! The orchestrator reports progress through an [`EventSink`] handed to it at
//! construction. Event names are dotted and grouped by prefix.

mod sink;

pub use sink::{CollectingEventSink, EventSink, LoggingEventSink, NoOpEventSink};

/// A search call was accepted.
pub const SEARCH_STARTED: &str = "search.started";
/// The orchestrator entered a new stage.
pub const SEARCH_STAGE: &str = "search.stage";
/// A search finished with results, no results, or a completed ingestion.
pub const SEARCH_COMPLETED: &str = "search.completed";
/// A search ended in the failed stage.
pub const SEARCH_FAILED: &str = "search.failed";
/// A call was rejected because another search was in flight.
pub const SEARCH_REJECTED: &str = "search.rejected";
/// A source URL was found in the cache.
pub const CACHE_HIT: &str = "cache.hit";
/// A source URL had to be resolved.
pub const CACHE_MISS: &str = "cache.miss";
