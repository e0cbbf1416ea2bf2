//! Search pipeline
//!
//! Debounces free-text query changes, issues paginated catalog searches,
//! accumulates pages for the current query and publishes display-ready
//! snapshots. All state lives on one driver task; query events, the
//! debounce timer and fetch completions are serialized through a single
//! `select!` loop, so no two completions ever race on the state.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{sleep, Sleep};
use tracing::{debug, warn};

use crate::api::{FetchError, MediaCatalog};
use crate::models::{MediaRef, Section};
use crate::sections;

/// Quiescence window applied to query-text changes.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Header label for the search-results section.
pub const RESULTS_HEADER: &str = "Movies & Series";

// =============================================================================
// Output Model
// =============================================================================

/// Search pipeline phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchPhase {
    /// No query entered.
    Idle,
    /// Waiting out the quiescence window after a query change.
    Debouncing,
    /// A page fetch is in flight.
    Fetching,
    /// At least one page of results is displayed.
    Loaded,
    /// Page 1 came back empty.
    Empty,
    /// The most recent page fetch failed.
    Failed,
}

/// Display-ready state published after every transition.
#[derive(Debug, Clone)]
pub struct SearchSnapshot {
    pub phase: SearchPhase,
    pub sections: Vec<Section>,
    /// Derived: the query is non-empty.
    pub is_searching: bool,
    /// Derived: page 1 of the current query came back empty.
    pub has_no_results: bool,
    /// Set while in [`SearchPhase::Failed`].
    pub error: Option<FetchError>,
}

impl SearchSnapshot {
    fn idle() -> Self {
        Self {
            phase: SearchPhase::Idle,
            sections: Vec::new(),
            is_searching: false,
            has_no_results: false,
            error: None,
        }
    }

    /// All plain media items across sections, in display order.
    pub fn media_items(&self) -> Vec<MediaRef> {
        self.sections
            .iter()
            .flat_map(|s| s.items.iter())
            .filter_map(|item| item.as_media())
            .cloned()
            .collect()
    }

    /// The media item at a flat display index, if it exists.
    pub fn media_at(&self, index: usize) -> Option<MediaRef> {
        self.sections
            .iter()
            .flat_map(|s| s.items.iter())
            .filter_map(|item| item.as_media())
            .nth(index)
            .cloned()
    }
}

// =============================================================================
// Pipeline Handle
// =============================================================================

enum SearchEvent {
    Query(String),
    LoadMore,
}

/// Handle to the search driver task.
///
/// Dropping the pipeline aborts the driver and cancels any in-flight fetch.
pub struct SearchPipeline {
    events: mpsc::UnboundedSender<SearchEvent>,
    snapshots: watch::Receiver<SearchSnapshot>,
    driver: JoinHandle<()>,
}

impl SearchPipeline {
    /// Spawn a pipeline with the default debounce window.
    pub fn new(catalog: Arc<dyn MediaCatalog>) -> Self {
        Self::with_debounce(catalog, DEFAULT_DEBOUNCE)
    }

    /// Spawn a pipeline with a custom debounce window.
    /// Must be called within a Tokio runtime.
    pub fn with_debounce(catalog: Arc<dyn MediaCatalog>, window: Duration) -> Self {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let (snapshot_tx, snapshot_rx) = watch::channel(SearchSnapshot::idle());
        let driver = tokio::spawn(drive(catalog, window, event_rx, snapshot_tx));
        Self {
            events: event_tx,
            snapshots: snapshot_rx,
            driver,
        }
    }

    /// Feed the current query text. An empty string returns to idle and
    /// cancels any in-flight fetch.
    pub fn set_query(&self, text: impl Into<String>) {
        let _ = self.events.send(SearchEvent::Query(text.into()));
    }

    /// Request the next page for the current query (e.g. from a prefetch
    /// signal near the end of the list). Ignored unless results are loaded
    /// or the previous page attempt failed.
    pub fn load_more(&self) {
        let _ = self.events.send(SearchEvent::LoadMore);
    }

    /// Subscribe to snapshots; the latest one is replayed on subscribe.
    pub fn snapshots(&self) -> watch::Receiver<SearchSnapshot> {
        self.snapshots.clone()
    }
}

impl Drop for SearchPipeline {
    fn drop(&mut self) {
        self.driver.abort();
    }
}

// =============================================================================
// Driver
// =============================================================================

/// Mutable search state, owned exclusively by the driver task.
struct SearchState {
    query: String,
    page: u32,
    accumulated: Vec<MediaRef>,
    phase: SearchPhase,
    error: Option<FetchError>,
}

impl SearchState {
    fn new() -> Self {
        Self {
            query: String::new(),
            page: 1,
            accumulated: Vec::new(),
            phase: SearchPhase::Idle,
            error: None,
        }
    }

    fn reset_to_idle(&mut self) {
        self.query.clear();
        self.page = 1;
        self.accumulated.clear();
        self.phase = SearchPhase::Idle;
        self.error = None;
    }

    fn snapshot(&self) -> SearchSnapshot {
        SearchSnapshot {
            phase: self.phase,
            sections: sections::search_sections(RESULTS_HEADER, &self.accumulated),
            is_searching: !self.query.is_empty(),
            has_no_results: self.phase == SearchPhase::Empty,
            error: self.error.clone(),
        }
    }
}

/// Identifies which request an in-flight fetch belongs to, so completions
/// for a superseded query or page are discarded.
#[derive(Debug, Clone, PartialEq, Eq)]
struct FetchTag {
    query: String,
    page: u32,
}

type PageFuture = Pin<Box<dyn Future<Output = Result<Vec<MediaRef>, FetchError>> + Send>>;

fn page_fetch(catalog: &Arc<dyn MediaCatalog>, query: &str, page: u32) -> (FetchTag, PageFuture) {
    let tag = FetchTag {
        query: query.to_string(),
        page,
    };
    debug!(query = %tag.query, page, "issuing search fetch");
    let catalog = Arc::clone(catalog);
    let query = query.to_string();
    let future = Box::pin(async move { catalog.search(&query, page).await });
    (tag, future)
}

async fn drive(
    catalog: Arc<dyn MediaCatalog>,
    window: Duration,
    mut events: mpsc::UnboundedReceiver<SearchEvent>,
    snapshots: watch::Sender<SearchSnapshot>,
) {
    let mut state = SearchState::new();
    let mut debounce: Option<Pin<Box<Sleep>>> = None;
    let mut in_flight: Option<(FetchTag, PageFuture)> = None;

    loop {
        tokio::select! {
            event = events.recv() => {
                let Some(event) = event else { break };
                match event {
                    SearchEvent::Query(text) => {
                        if text == state.query {
                            continue;
                        }
                        // The previous query's work is superseded.
                        if in_flight.take().is_some() {
                            debug!(query = %state.query, "cancelling in-flight search fetch");
                        }
                        if text.is_empty() {
                            debounce = None;
                            state.reset_to_idle();
                        } else {
                            state.query = text;
                            state.page = 1;
                            state.accumulated.clear();
                            state.phase = SearchPhase::Debouncing;
                            state.error = None;
                            debounce = Some(Box::pin(sleep(window)));
                        }
                        let _ = snapshots.send(state.snapshot());
                    }
                    SearchEvent::LoadMore => {
                        match state.phase {
                            SearchPhase::Loaded => {
                                state.page += 1;
                                state.phase = SearchPhase::Fetching;
                                state.error = None;
                                in_flight = Some(page_fetch(&catalog, &state.query, state.page));
                                let _ = snapshots.send(state.snapshot());
                            }
                            SearchPhase::Failed => {
                                // Re-attempt the page that failed; earlier
                                // pages stay accumulated.
                                state.phase = SearchPhase::Fetching;
                                state.error = None;
                                in_flight = Some(page_fetch(&catalog, &state.query, state.page));
                                let _ = snapshots.send(state.snapshot());
                            }
                            _ => {}
                        }
                    }
                }
            }

            () = async {
                match debounce.as_mut() {
                    Some(timer) => timer.as_mut().await,
                    None => std::future::pending().await,
                }
            }, if debounce.is_some() => {
                debounce = None;
                state.page = 1;
                state.accumulated.clear();
                state.phase = SearchPhase::Fetching;
                state.error = None;
                in_flight = Some(page_fetch(&catalog, &state.query, 1));
                let _ = snapshots.send(state.snapshot());
            }

            result = async {
                match in_flight.as_mut() {
                    Some((_, future)) => future.as_mut().await,
                    None => std::future::pending().await,
                }
            }, if in_flight.is_some() => {
                let Some((tag, _)) = in_flight.take() else { continue };
                if tag.query != state.query || tag.page != state.page {
                    debug!(query = %tag.query, page = tag.page, "discarding stale search result");
                    continue;
                }
                match result {
                    Ok(results) => {
                        if results.is_empty() && tag.page == 1 {
                            state.phase = SearchPhase::Empty;
                        } else {
                            state.accumulated.extend(results);
                            state.phase = SearchPhase::Loaded;
                        }
                    }
                    Err(err) => {
                        warn!(query = %tag.query, page = tag.page, error = %err, "search fetch failed");
                        state.error = Some(err);
                        state.phase = SearchPhase::Failed;
                    }
                }
                let _ = snapshots.send(state.snapshot());
            }
        }
    }
}
