//! The search state machine.

use parking_lot::RwLock;
use serde_json::json;
use std::fmt;
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, field, info, info_span, warn, Instrument, Span};
use uuid::Uuid;

use super::outcome::{
    SearchOutcome, SearchView, CANCELLED_MESSAGE, INGESTION_COMPLETE_MESSAGE, NO_RESULTS_MESSAGE,
};
use crate::cache::SourceCache;
use crate::client::{QueryRequest, ResolveRequest, TranscriptApi};
use crate::config::{SearchConfig, DEFAULT_INGESTION_DELAY_MS};
use crate::core::{OrchestratorState, ResolvedSource, SearchResult, SearchStage};
use crate::errors::SearchError;
use crate::events::{
    EventSink, NoOpEventSink, CACHE_HIT, CACHE_MISS, SEARCH_COMPLETED, SEARCH_FAILED,
    SEARCH_REJECTED, SEARCH_STAGE, SEARCH_STARTED,
};
use crate::observability::{SearchSpanAttributes, SpanTimer};
use crate::results::{sort_results, Paginator, SortSpec, DEFAULT_PAGE_SIZE};
use crate::validation::QueryValidator;

/// Results and presentation state of the session.
#[derive(Debug)]
struct Session {
    state: OrchestratorState,
    results: Vec<SearchResult>,
    sort: SortSpec,
    paginator: Paginator,
    message: Option<String>,
}

/// Held for the lifetime of one search.
///
/// On drop it clears the in-flight flag. A search dropped mid-stage (its
/// future cancelled, e.g. by a timeout) is moved to `Failed` first.
struct InFlightGuard<'a>(&'a SearchOrchestrator);

impl<'a> InFlightGuard<'a> {
    fn acquire(orchestrator: &'a SearchOrchestrator) -> Option<Self> {
        orchestrator
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(orchestrator))
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.abandon_pending();
        self.0.in_flight.store(false, Ordering::Release);
    }
}

/// Drives a search from raw input to a sorted, paginated result set.
///
/// One orchestrator serves one session. It is `Send + Sync` and meant to be
/// shared behind an `Arc`; only one search runs at a time and concurrent calls
/// are rejected with [`SearchError::Busy`].
///
/// Flow of [`search`](Self::search):
///
/// 1. Validate the query, if any.
/// 2. No URL: query the whole corpus.
/// 3. URL: use the cached source, or resolve it and wait out the ingestion
///    delay before caching it. Then query within that source, or stop if
///    there is no query.
/// 4. Sort by the selected [`SortSpec`] and reset to the first page.
pub struct SearchOrchestrator {
    api: Arc<dyn TranscriptApi>,
    cache: SourceCache,
    validator: QueryValidator,
    sink: Arc<dyn EventSink>,
    ingestion_delay: Duration,
    page_size: NonZeroUsize,
    in_flight: AtomicBool,
    session: RwLock<Session>,
}

impl fmt::Debug for SearchOrchestrator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchOrchestrator")
            .field("cache", &self.cache)
            .field("ingestion_delay", &self.ingestion_delay)
            .field("page_size", &self.page_size)
            .field("in_flight", &self.in_flight)
            .finish_non_exhaustive()
    }
}

fn present(input: Option<&str>) -> Option<&str> {
    input.map(str::trim).filter(|s| !s.is_empty())
}

impl SearchOrchestrator {
    /// Creates an orchestrator with default validation, paging and delay.
    #[must_use]
    pub fn new(api: Arc<dyn TranscriptApi>, cache: SourceCache) -> Self {
        let page_size = NonZeroUsize::new(DEFAULT_PAGE_SIZE).unwrap_or(NonZeroUsize::MIN);
        Self {
            api,
            cache,
            validator: QueryValidator::default(),
            sink: Arc::new(NoOpEventSink),
            ingestion_delay: Duration::from_millis(DEFAULT_INGESTION_DELAY_MS),
            page_size,
            in_flight: AtomicBool::new(false),
            session: RwLock::new(Session {
                state: OrchestratorState::new(),
                results: Vec::new(),
                sort: SortSpec::default(),
                paginator: Paginator::new(page_size),
                message: None,
            }),
        }
    }

    /// Creates an orchestrator and a fresh cache from configuration.
    pub fn from_config(api: Arc<dyn TranscriptApi>, config: &SearchConfig) -> Result<Self, SearchError> {
        config.validate()?;
        let cache = SourceCache::new(config.cache_capacity()?);
        Ok(Self::new(api, cache)
            .with_validator(QueryValidator::new(&config.validator))
            .with_ingestion_delay(config.ingestion_delay())
            .with_page_size(config.page_size()?)
            .with_sort(config.default_sort))
    }

    /// Sets the event sink.
    #[must_use]
    pub fn with_event_sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Sets the query validator.
    #[must_use]
    pub fn with_validator(mut self, validator: QueryValidator) -> Self {
        self.validator = validator;
        self
    }

    /// Sets the wait after resolving a new source.
    #[must_use]
    pub fn with_ingestion_delay(mut self, delay: Duration) -> Self {
        self.ingestion_delay = delay;
        self
    }

    /// Sets the page size.
    #[must_use]
    pub fn with_page_size(mut self, page_size: NonZeroUsize) -> Self {
        self.page_size = page_size;
        self.session.get_mut().paginator = Paginator::new(page_size);
        self
    }

    /// Sets the initial ordering.
    #[must_use]
    pub fn with_sort(mut self, sort: SortSpec) -> Self {
        self.session.get_mut().sort = sort;
        self
    }

    /// The source cache.
    #[must_use]
    pub fn cache(&self) -> &SourceCache {
        &self.cache
    }

    /// Runs a search.
    ///
    /// Blank inputs count as absent. On error the session moves to
    /// [`SearchStage::Failed`], its results are cleared and the error's
    /// message becomes the session message; `Busy` is the exception and
    /// leaves the running search untouched. Dropping the returned future
    /// before it completes leaves the session in `Failed` with
    /// [`CANCELLED_MESSAGE`].
    pub async fn search(
        &self,
        url: Option<&str>,
        raw_query: Option<&str>,
    ) -> Result<SearchOutcome, SearchError> {
        let Some(_guard) = InFlightGuard::acquire(self) else {
            warn!("Search rejected, another search is in flight");
            self.sink.try_emit(SEARCH_REJECTED, None);
            return Err(SearchError::Busy);
        };

        let url = present(url);
        let raw_query = present(raw_query);
        let run_id = Uuid::new_v4().to_string();
        let span = info_span!(
            "search",
            search.run_id = %run_id,
            search.source_url = url.unwrap_or(""),
            search.has_query = raw_query.is_some(),
            search.cache_hit = field::Empty,
            search.stage = field::Empty,
            search.total_results = field::Empty,
            search.duration_ms = field::Empty,
            search.error = field::Empty,
        );

        self.run(&run_id, url, raw_query).instrument(span).await
    }

    async fn run(
        &self,
        run_id: &str,
        url: Option<&str>,
        raw_query: Option<&str>,
    ) -> Result<SearchOutcome, SearchError> {
        let timer = SpanTimer::start();
        let attrs = SearchSpanAttributes::new(run_id)
            .with_source_url(url)
            .with_query(raw_query.is_some());

        self.session.write().message = None;
        self.sink.try_emit(
            SEARCH_STARTED,
            Some(json!({
                "run_id": run_id,
                "source_url": url,
                "has_query": raw_query.is_some(),
            })),
        );
        info!("Search started");

        match self.execute(run_id, url, raw_query).await {
            Ok((outcome, cache_hit)) => {
                let mut attrs = attrs.with_total_results(outcome.total());
                if let Some(hit) = cache_hit {
                    attrs = attrs.with_cache_hit(hit);
                }
                let attrs = attrs.finished(SearchStage::Done, timer.elapsed_ms());
                attrs.record_on(&Span::current());
                info!(total = outcome.total(), duration_ms = ?attrs.duration_ms, "Search completed");
                self.sink.try_emit(SEARCH_COMPLETED, Some(attrs.to_event_data()));
                Ok(outcome)
            }
            Err(error) => {
                self.fail(&error);
                let detail = error.detail().unwrap_or_default().to_string();
                warn!(kind = error.kind(), detail = %detail, "Search failed: {}", error);
                let attrs = attrs
                    .with_error(error.to_string())
                    .finished(SearchStage::Failed, timer.elapsed_ms());
                attrs.record_on(&Span::current());
                let mut data = attrs.to_event_data();
                if let Some(map) = data.as_object_mut() {
                    map.insert("kind".to_string(), json!(error.kind()));
                }
                self.sink.try_emit(SEARCH_FAILED, Some(data));
                Err(error)
            }
        }
    }

    /// Returns the outcome and, when a URL was given, whether the cache served it.
    async fn execute(
        &self,
        run_id: &str,
        url: Option<&str>,
        raw_query: Option<&str>,
    ) -> Result<(SearchOutcome, Option<bool>), SearchError> {
        let query = raw_query.map(|raw| self.validator.validate(raw)).transpose()?;

        match (url, query) {
            (None, None) => Err(SearchError::MissingInput),
            (None, Some(query)) => {
                let outcome = self.run_query(run_id, QueryRequest::full_corpus(query)).await?;
                Ok((outcome, None))
            }
            (Some(url), Some(query)) => {
                let (source, cached) = self.acquire_source(run_id, url).await?;
                let outcome = self.run_query(run_id, QueryRequest::scoped(source, query)).await?;
                Ok((outcome, Some(cached)))
            }
            (Some(url), None) => {
                let (_, cached) = self.acquire_source(run_id, url).await?;
                self.finish_ingestion(run_id);
                let outcome = SearchOutcome::IngestionComplete {
                    url: url.to_string(),
                    cached,
                };
                Ok((outcome, Some(cached)))
            }
        }
    }

    /// Cached identifiers for `url`, or resolves and caches them.
    async fn acquire_source(&self, run_id: &str, url: &str) -> Result<(ResolvedSource, bool), SearchError> {
        if let Some(source) = self.cache.lookup(url) {
            debug!(url = %url, "Source cache hit");
            self.sink.try_emit(CACHE_HIT, Some(json!({"run_id": run_id, "url": url})));
            return Ok((source, true));
        }

        debug!(url = %url, "Source cache miss");
        self.sink.try_emit(CACHE_MISS, Some(json!({"run_id": run_id, "url": url})));

        self.enter(run_id, SearchStage::ResolvingSource);
        let response = self
            .api
            .resolve(&ResolveRequest::new(url))
            .await
            .map_err(|e| SearchError::resolution(e.to_string()))?;
        let source = response
            .into_source()
            .ok_or_else(|| SearchError::resolution("resolve response carried no identifiers"))?;

        self.enter(run_id, SearchStage::Ingesting);
        if !self.ingestion_delay.is_zero() {
            tokio::time::sleep(self.ingestion_delay).await;
        }

        // Only a source that finished ingesting may skip the wait next time.
        self.cache.put(url, source.clone());

        Ok((source, false))
    }

    async fn run_query(&self, run_id: &str, request: QueryRequest) -> Result<SearchOutcome, SearchError> {
        self.enter(run_id, SearchStage::Querying);
        let response = self
            .api
            .query(&request)
            .await
            .map_err(|e| SearchError::query(e.to_string()))?;

        Ok(self.finish_query(run_id, response.hits))
    }

    fn enter(&self, run_id: &str, stage: SearchStage) {
        self.session.write().state.transition(stage);
        info!(stage = %stage, "Search stage");
        self.sink
            .try_emit(SEARCH_STAGE, Some(json!({"run_id": run_id, "stage": stage})));
    }

    fn finish_query(&self, run_id: &str, mut hits: Vec<SearchResult>) -> SearchOutcome {
        let total = hits.len();
        let outcome = {
            let mut session = self.session.write();
            sort_results(&mut hits, &session.sort);
            session.paginator.reset(total, self.page_size);
            let page = session.paginator.slice(&hits).to_vec();
            session.results = hits;
            if total == 0 {
                session.message = Some(NO_RESULTS_MESSAGE.to_string());
                SearchOutcome::NoResults
            } else {
                SearchOutcome::Results { total, page }
            }
        };
        self.enter(run_id, SearchStage::Done);
        outcome
    }

    fn finish_ingestion(&self, run_id: &str) {
        {
            let mut session = self.session.write();
            session.results.clear();
            session.paginator.reset(0, self.page_size);
            session.message = Some(INGESTION_COMPLETE_MESSAGE.to_string());
        }
        self.enter(run_id, SearchStage::Done);
    }

    /// Moves a search that stopped mid-stage to `Failed`.
    fn abandon_pending(&self) {
        let stage = {
            let mut session = self.session.write();
            let stage = session.state.stage;
            if !stage.is_busy() {
                return;
            }
            session.results.clear();
            session.paginator.reset(0, self.page_size);
            session.state.fail(CANCELLED_MESSAGE);
            session.message = Some(CANCELLED_MESSAGE.to_string());
            stage
        };
        warn!(stage = %stage, "Search dropped before completion");
        self.sink.try_emit(
            SEARCH_FAILED,
            Some(json!({"kind": "cancelled", "stage": stage})),
        );
    }

    fn fail(&self, error: &SearchError) {
        let mut session = self.session.write();
        session.results.clear();
        session.paginator.reset(0, self.page_size);
        session.state.fail(error.to_string());
        session.message = Some(error.to_string());
    }

    /// Current stage and last error.
    #[must_use]
    pub fn state(&self) -> OrchestratorState {
        self.session.read().state.clone()
    }

    /// True while a search is running.
    #[must_use]
    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Snapshot for rendering the current page.
    #[must_use]
    pub fn view(&self) -> SearchView {
        let session = self.session.read();
        SearchView {
            stage: session.state.stage,
            loading_label: session.state.stage.loading_label(),
            message: session.message.clone(),
            results: session.paginator.slice(&session.results).to_vec(),
            page_index: session.paginator.current_page(),
            page_count: session.paginator.page_count(),
            total: session.results.len(),
            sort: session.sort,
        }
    }

    /// Every result of the last search, in sort order.
    #[must_use]
    pub fn results(&self) -> Vec<SearchResult> {
        self.session.read().results.clone()
    }

    /// Ordering in effect.
    #[must_use]
    pub fn sort(&self) -> SortSpec {
        self.session.read().sort
    }

    /// Re-sorts the current results and returns to the first page.
    ///
    /// The ordering also applies to later searches.
    pub fn set_sort(&self, spec: SortSpec) {
        let mut session = self.session.write();
        let session = &mut *session;
        session.sort = spec;
        sort_results(&mut session.results, &spec);
        session.paginator.reset(session.results.len(), self.page_size);
        debug!(sort = %spec, "Sort changed");
    }

    /// Jumps to a page, wrapping past the last one. Returns the new index.
    pub fn go_to_page(&self, index: usize) -> usize {
        let mut session = self.session.write();
        session.paginator.go_to(index).current_page()
    }

    /// Advances one page, wrapping. Returns the new index.
    pub fn next_page(&self) -> usize {
        let mut session = self.session.write();
        session.paginator.next().current_page()
    }

    /// Goes back one page, wrapping. Returns the new index.
    pub fn previous_page(&self) -> usize {
        let mut session = self.session.write();
        session.paginator.previous().current_page()
    }
}
