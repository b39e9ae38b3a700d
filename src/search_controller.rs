//! Search controller
//!
//! Owns the query text, validation, fetch lifecycle and result state of the
//! search widget. Typed text goes through a [`SearchDebouncer`]; once it
//! settles the query is validated and, if acceptable, sent to the
//! [`CommentSource`]. Fetches run as tasks on a [`JoinSet`] owned by the
//! controller and report back through a channel, tagged with a request id.
//! Only the completion of the most recently issued request is applied.

use crate::pagination::Pagination;
use crate::search_debouncer::SearchDebouncer;
use crate::services::{CommentSource, FetchError};
use crate::types::{Comment, ITEMS_PER_PAGE, MIN_QUERY_CHARS};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tokio::time::Instant;

/// Error shown next to the search input
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    #[error("Please enter at least 4 characters!")]
    QueryTooShort,

    #[error(transparent)]
    Fetch(#[from] FetchError),
}

/// Where the current query cycle stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchPhase {
    Idle,
    /// Validation refused the query; nothing was fetched
    Rejected,
    Fetching,
    Succeeded,
    Failed,
}

/// Query and result state of one widget instance
#[derive(Debug, Clone)]
pub struct QueryState {
    pub raw_query: String,
    pub stabilized_query: String,
    pub error: Option<SearchError>,
    pub loading: bool,
    pub results: Vec<Comment>,
    pub current_page: usize,
    pub items_per_page: usize,
    pub total_count: usize,
    pub phase: SearchPhase,
}

impl Default for QueryState {
    fn default() -> Self {
        Self {
            raw_query: String::new(),
            stabilized_query: String::new(),
            error: None,
            loading: false,
            results: Vec::new(),
            current_page: 1,
            items_per_page: ITEMS_PER_PAGE,
            total_count: 0,
            phase: SearchPhase::Idle,
        }
    }
}

/// Contiguous slice of the result set shown for one page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow<'a> {
    /// 1-based position of the first comment in the full result set
    pub first_serial: usize,
    pub comments: &'a [Comment],
}

impl QueryState {
    pub fn page_window(&self) -> PageWindow<'_> {
        let start = (self.current_page.saturating_sub(1) * self.items_per_page)
            .min(self.results.len());
        let end = (start + self.items_per_page).min(self.results.len());

        PageWindow {
            first_serial: start + 1,
            comments: &self.results[start..end],
        }
    }

    pub fn pagination(&self) -> Pagination {
        Pagination::new(self.total_count, self.items_per_page, self.current_page)
    }

    /// Input and submit accept interaction only while nothing is loading
    pub fn input_enabled(&self) -> bool {
        !self.loading
    }
}

/// Outcome of one fetch, delivered back to the controller
#[derive(Debug)]
pub struct FetchCompletion {
    pub request_id: u64,
    pub query: String,
    pub outcome: Result<Vec<Comment>, FetchError>,
}

/// Search controller for one mounted widget
pub struct SearchController {
    state: QueryState,
    debouncer: SearchDebouncer<String>,
    source: Arc<dyn CommentSource>,
    latest_request: u64,
    completion_tx: mpsc::UnboundedSender<FetchCompletion>,
    in_flight: JoinSet<()>,
}

impl SearchController {
    /// Create a controller and the receiver its fetch completions arrive on.
    ///
    /// The owner feeds every received completion back through
    /// [`SearchController::apply_completion`].
    pub fn new(
        source: Arc<dyn CommentSource>,
        debounce_delay: Duration,
    ) -> (Self, mpsc::UnboundedReceiver<FetchCompletion>) {
        let (completion_tx, completion_rx) = mpsc::unbounded_channel();
        let state = QueryState::default();
        let mut debouncer = SearchDebouncer::new(debounce_delay);
        debouncer.debounce(state.raw_query.clone());

        let controller = Self {
            state,
            debouncer,
            source,
            latest_request: 0,
            completion_tx,
            in_flight: JoinSet::new(),
        };
        (controller, completion_rx)
    }

    pub fn state(&self) -> &QueryState {
        &self.state
    }

    /// Run the initial cycle for the value the input starts with
    pub fn mount(&mut self) {
        let initial = self.debouncer.debounce(self.state.raw_query.clone());
        self.on_stabilized_query_change(initial);
    }

    /// Record a keystroke. The query is searched once typing pauses.
    pub fn on_query_change(&mut self, text: impl Into<String>) {
        self.state.raw_query = text.into();
        log::trace!("Query changed: '{}'", self.state.raw_query);

        if self.state.phase != SearchPhase::Fetching {
            self.state.phase = SearchPhase::Idle;
        }
        self.debouncer.debounce(self.state.raw_query.clone());
    }

    /// Deadline of the pending debounced query, for the event loop to sleep on
    pub fn debounce_deadline(&self) -> Option<Instant> {
        self.debouncer.deadline()
    }

    /// Deliver the debounced query if it is due. Returns whether it was.
    pub fn poll_debounce(&mut self) -> bool {
        match self.debouncer.poll() {
            Some(query) => {
                self.on_stabilized_query_change(query);
                true
            }
            None => false,
        }
    }

    pub fn on_stabilized_query_change(&mut self, text: String) {
        log::debug!("Stabilized query: '{}'", text);
        self.state.stabilized_query = text.clone();
        self.run_search(text);
    }

    /// Search the current raw query right away, skipping the debounce delay
    pub fn on_submit(&mut self) {
        let query = self.state.raw_query.clone();
        log::debug!("Submitted query: '{}'", query);
        self.debouncer.settle(query.clone());
        self.state.stabilized_query = query.clone();
        self.run_search(query);
    }

    /// Show page `new_page` of the current results, clamped to the pages
    /// that exist. Returns whether the page changed.
    pub fn on_page_change(&mut self, new_page: usize) -> bool {
        let total = self.state.pagination().total_pages();
        if total == 0 {
            return false;
        }

        let page = new_page.clamp(1, total);
        if page == self.state.current_page {
            return false;
        }
        log::debug!("Page {} -> {}", self.state.current_page, page);
        self.state.current_page = page;
        true
    }

    /// Fold a finished fetch into the state.
    ///
    /// Completions of superseded requests are discarded; returns whether
    /// the completion was applied.
    pub fn apply_completion(&mut self, completion: FetchCompletion) -> bool {
        while self.in_flight.try_join_next().is_some() {}

        let FetchCompletion {
            request_id,
            query,
            outcome,
        } = completion;

        if request_id != self.latest_request {
            log::debug!(
                "Discarding response for '{}' (request {}, latest {})",
                query,
                request_id,
                self.latest_request
            );
            return false;
        }

        self.state.loading = false;
        self.state.current_page = 1;

        match outcome {
            Ok(comments) => {
                log::info!("Search '{}' returned {} comments", query, comments.len());
                self.state.total_count = comments.len();
                self.state.results = comments;
                self.state.error = None;
                self.state.phase = SearchPhase::Succeeded;
            }
            Err(error) => {
                log::warn!("Search '{}' failed: {}", query, error);
                self.state.results.clear();
                self.state.total_count = 0;
                self.state.error = Some(error.into());
                self.state.phase = SearchPhase::Failed;
            }
        }
        true
    }

    fn run_search(&mut self, query: String) {
        let length = query.chars().count();
        if (1..MIN_QUERY_CHARS).contains(&length) {
            log::debug!("Rejecting short query '{}'", query);
            self.supersede_in_flight();
            self.state.error = Some(SearchError::QueryTooShort);
            self.state.phase = SearchPhase::Rejected;
            return;
        }

        self.state.error = None;
        self.issue_fetch(query);
    }

    /// Drop the outstanding fetch, if any. A rejected query is the latest
    /// cycle, so an older response must not replace its error.
    fn supersede_in_flight(&mut self) {
        if !self.state.loading {
            return;
        }
        log::debug!("Abandoning request {}", self.latest_request);
        self.latest_request += 1;
        self.in_flight.abort_all();
        self.state.loading = false;
    }

    fn issue_fetch(&mut self, query: String) {
        self.latest_request += 1;
        let request_id = self.latest_request;
        self.state.loading = true;
        self.state.phase = SearchPhase::Fetching;

        let source = Arc::clone(&self.source);
        let completion_tx = self.completion_tx.clone();
        log::debug!("Issuing request {} for '{}'", request_id, query);

        self.in_flight.spawn(async move {
            let outcome = source.search(&query).await;
            let completion = FetchCompletion {
                request_id,
                query,
                outcome,
            };
            if completion_tx.send(completion).is_err() {
                log::debug!("Controller gone, dropping response {}", request_id);
            }
        });
    }
}
