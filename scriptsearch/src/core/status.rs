//! Orchestrator stage enum and state record.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The stage a search invocation is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchStage {
    /// No search has run yet this session.
    Idle,
    /// Waiting for the backend to resolve a source URL.
    ResolvingSource,
    /// Waiting for the backend to populate a freshly resolved source.
    Ingesting,
    /// Waiting for the query call.
    Querying,
    /// The last search completed, possibly with zero results.
    Done,
    /// The last search failed.
    Failed,
}

impl Default for SearchStage {
    fn default() -> Self {
        Self::Idle
    }
}

impl fmt::Display for SearchStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::ResolvingSource => write!(f, "resolving_source"),
            Self::Ingesting => write!(f, "ingesting"),
            Self::Querying => write!(f, "querying"),
            Self::Done => write!(f, "done"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

impl SearchStage {
    /// Returns true for `Done` and `Failed`.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::Failed)
    }

    /// Returns true while a network call or the ingestion wait is pending.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        matches!(self, Self::ResolvingSource | Self::Ingesting | Self::Querying)
    }

    /// Loading label for the presentation layer, `None` when nothing is loading.
    #[must_use]
    pub fn loading_label(&self) -> Option<&'static str> {
        match self {
            Self::ResolvingSource => Some("Finding source..."),
            Self::Ingesting => Some("Fetching transcripts..."),
            Self::Querying => Some("Searching..."),
            Self::Idle | Self::Done | Self::Failed => None,
        }
    }
}

/// Mutable state of the orchestrator, one per session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrchestratorState {
    /// Current stage.
    pub stage: SearchStage,
    /// User-facing message of the last failure.
    pub last_error: Option<String>,
}

impl OrchestratorState {
    /// Creates an idle state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves to a non-failed stage, clearing the last error.
    pub fn transition(&mut self, stage: SearchStage) {
        self.stage = stage;
        self.last_error = None;
    }

    /// Moves to `Failed` recording the message.
    pub fn fail(&mut self, message: impl Into<String>) {
        self.stage = SearchStage::Failed;
        self.last_error = Some(message.into());
    }
}
