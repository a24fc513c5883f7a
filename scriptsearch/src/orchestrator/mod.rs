//! Search orchestration.
//!
//! [`SearchOrchestrator`] ties the validator, the source cache, the
//! transcript API and the result sorter/paginator into one async call plus a
//! handful of synchronous controls for the presentation layer.

mod outcome;
mod search;

pub use outcome::{
    SearchOutcome, SearchView, CANCELLED_MESSAGE, INGESTION_COMPLETE_MESSAGE, NO_RESULTS_MESSAGE,
};
pub use search::SearchOrchestrator;
