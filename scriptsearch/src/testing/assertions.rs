//! Assertions on search views.

use crate::core::SearchStage;
use crate::orchestrator::SearchView;

/// Asserts that the view is in the expected stage.
pub fn assert_view_stage(view: &SearchView, expected: SearchStage) {
    assert_eq!(
        view.stage, expected,
        "Expected stage {:?}, got {:?} (message: {:?})",
        expected, view.stage, view.message
    );
}

/// Asserts that the last search failed with `message`.
pub fn assert_view_failed(view: &SearchView, message: &str) {
    assert_view_stage(view, SearchStage::Failed);
    assert_eq!(
        view.message.as_deref(),
        Some(message),
        "Expected failure message {:?}, got {:?}",
        message,
        view.message
    );
    assert!(
        view.results.is_empty() && view.total == 0,
        "Expected results to be cleared after a failure, found {}",
        view.total
    );
}

/// Asserts that the view shows `expected` results in total.
pub fn assert_view_total(view: &SearchView, expected: usize) {
    assert_eq!(
        view.total, expected,
        "Expected {} results, got {}",
        expected, view.total
    );
}

/// Asserts the current page shows these video ids, in order.
pub fn assert_page_ids(view: &SearchView, expected: &[&str]) {
    let actual: Vec<&str> = view.results.iter().map(|r| r.source_id.as_str()).collect();
    assert_eq!(
        actual, expected,
        "Unexpected page {} contents",
        view.page_index
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::results::SortSpec;
    use crate::testing::ResultBuilder;

    fn view(stage: SearchStage, message: Option<&str>, ids: &[&str]) -> SearchView {
        SearchView {
            stage,
            loading_label: stage.loading_label(),
            message: message.map(ToString::to_string),
            results: ids.iter().map(|id| ResultBuilder::new(*id).build()).collect(),
            page_index: 0,
            page_count: usize::from(!ids.is_empty()),
            total: ids.len(),
            sort: SortSpec::default(),
        }
    }

    #[test]
    fn test_assert_view_failed() {
        assert_view_failed(
            &view(SearchStage::Failed, Some("Search failed."), &[]),
            "Search failed.",
        );
    }

    #[test]
    #[should_panic(expected = "Expected stage")]
    fn test_assert_view_failed_panics_when_done() {
        assert_view_failed(&view(SearchStage::Done, None, &["v1"]), "Search failed.");
    }

    #[test]
    #[should_panic(expected = "Expected results to be cleared")]
    fn test_assert_view_failed_panics_with_results() {
        assert_view_failed(
            &view(SearchStage::Failed, Some("Search failed."), &["v1"]),
            "Search failed.",
        );
    }

    #[test]
    fn test_assert_page_ids_and_total() {
        let done = view(SearchStage::Done, None, &["a", "b"]);
        assert_view_stage(&done, SearchStage::Done);
        assert_view_total(&done, 2);
        assert_page_ids(&done, &["a", "b"]);
    }
}
