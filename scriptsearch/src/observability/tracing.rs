//! Span attributes and timing for search runs.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Instant;
use tracing::Span;

use crate::core::SearchStage;

/// Attributes describing one search run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchSpanAttributes {
    /// Run id, unique per `search` call.
    pub run_id: Option<String>,
    /// Source URL, if one was given.
    pub source_url: Option<String>,
    /// Whether a query was given. The query text itself is not recorded.
    pub has_query: bool,
    /// Whether the source came from the cache.
    pub cache_hit: Option<bool>,
    /// Stage the run ended in.
    pub final_stage: Option<SearchStage>,
    /// Number of hits returned.
    pub total_results: Option<usize>,
    /// Wall time in milliseconds.
    pub duration_ms: Option<f64>,
    /// Failure detail, if the run failed.
    pub error: Option<String>,
}

impl SearchSpanAttributes {
    /// Creates attributes for a run.
    #[must_use]
    pub fn new(run_id: impl Into<String>) -> Self {
        Self {
            run_id: Some(run_id.into()),
            ..Default::default()
        }
    }

    /// Sets the source URL.
    #[must_use]
    pub fn with_source_url(mut self, url: Option<&str>) -> Self {
        self.source_url = url.map(ToString::to_string);
        self
    }

    /// Records whether a query was given.
    #[must_use]
    pub fn with_query(mut self, has_query: bool) -> Self {
        self.has_query = has_query;
        self
    }

    /// Records whether the cache served the source.
    #[must_use]
    pub fn with_cache_hit(mut self, hit: bool) -> Self {
        self.cache_hit = Some(hit);
        self
    }

    /// Records the final stage and elapsed time.
    #[must_use]
    pub fn finished(mut self, stage: SearchStage, duration_ms: f64) -> Self {
        self.final_stage = Some(stage);
        self.duration_ms = Some(duration_ms);
        self
    }

    /// Records the hit count.
    #[must_use]
    pub fn with_total_results(mut self, total: usize) -> Self {
        self.total_results = Some(total);
        self
    }

    /// Records a failure.
    #[must_use]
    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }

    /// Flattens to `search.*` keys.
    #[must_use]
    pub fn to_attributes(&self) -> HashMap<String, String> {
        let mut attrs = HashMap::new();

        if let Some(ref v) = self.run_id {
            attrs.insert("search.run_id".to_string(), v.clone());
        }
        if let Some(ref v) = self.source_url {
            attrs.insert("search.source_url".to_string(), v.clone());
        }
        attrs.insert("search.has_query".to_string(), self.has_query.to_string());
        if let Some(v) = self.cache_hit {
            attrs.insert("search.cache_hit".to_string(), v.to_string());
        }
        if let Some(v) = self.final_stage {
            attrs.insert("search.stage".to_string(), v.to_string());
        }
        if let Some(v) = self.total_results {
            attrs.insert("search.total_results".to_string(), v.to_string());
        }
        if let Some(v) = self.duration_ms {
            attrs.insert("search.duration_ms".to_string(), format!("{v:.1}"));
        }
        if let Some(ref v) = self.error {
            attrs.insert("search.error".to_string(), v.clone());
        }

        attrs
    }

    /// Records the flattened attributes on `span`.
    ///
    /// Only fields the span declared (as `field::Empty` or with a value) are
    /// kept; `tracing` drops the rest.
    pub fn record_on(&self, span: &Span) {
        for (key, value) in self.to_attributes() {
            span.record(key.as_str(), value.as_str());
        }
    }

    /// Payload form used for `search.completed` and `search.failed` events.
    #[must_use]
    pub fn to_event_data(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

/// Wall-clock timer for a span.
#[derive(Debug, Clone, Copy)]
pub struct SpanTimer {
    start: Instant,
}

impl SpanTimer {
    /// Starts timing.
    #[must_use]
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Elapsed milliseconds.
    #[must_use]
    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::io;
    use std::sync::Arc;
    use tracing_subscriber::fmt::format::FmtSpan;

    #[test]
    fn test_search_span_attributes() {
        let attrs = SearchSpanAttributes::new("run-123")
            .with_source_url(Some("https://youtube.com/@channel"))
            .with_query(true)
            .with_cache_hit(false)
            .with_total_results(4)
            .finished(SearchStage::Done, 12.34);

        let flat = attrs.to_attributes();
        assert_eq!(flat.get("search.run_id"), Some(&"run-123".to_string()));
        assert_eq!(flat.get("search.cache_hit"), Some(&"false".to_string()));
        assert_eq!(flat.get("search.stage"), Some(&"done".to_string()));
        assert_eq!(flat.get("search.total_results"), Some(&"4".to_string()));
        assert_eq!(flat.get("search.duration_ms"), Some(&"12.3".to_string()));
        assert!(!flat.contains_key("search.error"));
    }

    #[test]
    fn test_event_data_uses_snake_case_stage() {
        let data = SearchSpanAttributes::new("run-1")
            .with_error("HTTP 500")
            .finished(SearchStage::Failed, 1.0)
            .to_event_data();

        assert_eq!(data["final_stage"], "failed");
        assert_eq!(data["error"], "HTTP 500");
    }

    #[test]
    fn test_span_timer() {
        let timer = SpanTimer::start();
        std::thread::sleep(std::time::Duration::from_millis(5));
        assert!(timer.elapsed_ms() >= 5.0);
    }

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_record_on_fills_declared_span_fields() {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_span_events(FmtSpan::CLOSE)
            .finish();

        let attrs = SearchSpanAttributes::new("run-7")
            .with_cache_hit(true)
            .with_total_results(3)
            .finished(SearchStage::Done, 2.0);

        tracing::subscriber::with_default(subscriber, || {
            let span = tracing::info_span!(
                "search",
                search.cache_hit = tracing::field::Empty,
                search.total_results = tracing::field::Empty,
            );
            attrs.record_on(&span);
        });

        let output = String::from_utf8(captured.0.lock().clone()).unwrap();
        assert!(output.contains("search.cache_hit="), "{output}");
        assert!(output.contains("true"), "{output}");
        assert!(output.contains("search.total_results="), "{output}");
        assert!(!output.contains("search.run_id"), "{output}");
    }
}
