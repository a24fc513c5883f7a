//! Core domain model types.
//!
//! This module contains the fundamental types used throughout the crate:
//! - Orchestrator stage enum and state record
//! - Search result records and the resolved-source payload

mod models;
mod status;

pub use models::{compact_date, Match, ResolvedSource, SearchResult};
pub use status::{OrchestratorState, SearchStage};
