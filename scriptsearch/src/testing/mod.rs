//! Testing utilities for search sessions.
//!
//! This module provides:
//! - A scripted transcript API that records calls
//! - Search result fixtures
//! - Assertions on search views

mod assertions;
mod fixtures;
mod mocks;

pub use assertions::{assert_page_ids, assert_view_failed, assert_view_stage, assert_view_total};
pub use fixtures::{sample_results, ResultBuilder};
pub use mocks::{ApiCall, ScriptedTranscriptApi};
