//! The job board: paged loading plus client-side filtering.
//!
//! [`JobBoard`] owns every piece of mutable state of a browsing session (the
//! accumulated jobs, the page cursor, the filters and the visible list) behind
//! a single lock. The presentation layer reads it through [`BoardSnapshot`]s
//! and writes back through the mutators.

pub mod filter;
pub mod pagination;
pub mod trigger;
pub mod vocabulary;

pub use filter::{
    filter_jobs, matches_company_search, FilterError, FilterSet, FilterType, Predicate,
};
pub use pagination::{Pagination, PaginationState};
pub use trigger::{ScrollSubscription, VisibilityTrigger};
pub use vocabulary::{FilterOptions, VocabularyScope};

use crate::debounce::Debouncer;
use crate::source::{Job, JobPage, JobSource};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// What a page arrival does to the visible list while no filter is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum UnfilteredPagePolicy {
    /// The visible list becomes the newest page only.
    #[default]
    Replace,
    /// The newest page is appended to the visible list.
    Accumulate,
}

#[derive(Debug, Clone)]
pub struct BoardConfig {
    /// Records requested per page.
    pub page_limit: usize,
    /// Offset step between consecutive pages.
    pub page_stride: usize,
    /// Quiet period before a company search edit takes effect.
    pub search_debounce: Duration,
    pub unfiltered_pages: UnfilteredPagePolicy,
    pub vocabulary: VocabularyScope,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            page_limit: 12,
            page_stride: 10,
            search_debounce: Duration::from_millis(500),
            unfiltered_pages: UnfilteredPagePolicy::default(),
            vocabulary: VocabularyScope::default(),
        }
    }
}

/// Result of one load-more attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// A non-empty page was appended to the accumulated jobs.
    Appended { count: usize },
    /// The source returned no records; no further pages will be requested.
    Exhausted,
    /// The request failed, or none of the returned records decoded; nothing
    /// changed and the same page will be asked for on the next attempt.
    Failed,
    /// Ignored because a request was already in flight or the source was
    /// already exhausted.
    Skipped,
}

/// Read-only copy of the board for rendering.
#[derive(Debug, Clone)]
pub struct BoardSnapshot {
    pub visible: Vec<Job>,
    pub options: FilterOptions,
    pub filters: FilterSet,
    pub pending_search: String,
    pub settled_search: String,
    pub state: PaginationState,
    pub cursor: usize,
    pub accumulated: usize,
    pub no_results: bool,
    pub total_count: Option<u64>,
}

impl BoardSnapshot {
    pub fn is_loading(&self) -> bool {
        self.state == PaginationState::Loading
    }

    pub fn is_exhausted(&self) -> bool {
        self.state == PaginationState::Exhausted
    }

    pub fn has_active_filters(&self) -> bool {
        !self.filters.is_empty() || !self.settled_search.trim().is_empty()
    }
}

struct BoardState {
    pagination: Pagination,
    /// Every job received so far, in arrival order, duplicates included.
    jobs: Vec<Job>,
    visible: Vec<Job>,
    filters: FilterSet,
    /// Company search as typed, before the debounce window elapses.
    pending_search: String,
    /// Company search the visible list is filtered by.
    settled_search: String,
    options: FilterOptions,
    no_results: bool,
    total_count: Option<u64>,
}

impl BoardState {
    fn new(config: &BoardConfig) -> Self {
        Self {
            pagination: Pagination::new(config.page_limit, config.page_stride),
            jobs: Vec::new(),
            visible: Vec::new(),
            filters: FilterSet::new(),
            pending_search: String::new(),
            settled_search: String::new(),
            options: FilterOptions::default(),
            no_results: false,
            total_count: None,
        }
    }

    fn has_active_filters(&self) -> bool {
        !self.filters.is_empty() || !self.settled_search.trim().is_empty()
    }

    fn apply_page(&mut self, page: JobPage, config: &BoardConfig) {
        let new_jobs = page.jobs;
        if page.total_count.is_some() {
            self.total_count = page.total_count;
        }

        self.jobs.extend(new_jobs.iter().cloned());
        self.pagination.advance();

        match config.vocabulary {
            VocabularyScope::LatestPage => self.options = FilterOptions::from_jobs(&new_jobs),
            VocabularyScope::AllPages => self.options.extend(&new_jobs),
        }

        self.reconcile(new_jobs, config.unfiltered_pages);
    }

    /// Fold a freshly fetched page into the visible list.
    ///
    /// With filters active, a new job is kept only when it is identical to a
    /// job already visible; the predicates themselves are not consulted.
    fn reconcile(&mut self, new_page: Vec<Job>, policy: UnfilteredPagePolicy) {
        if !self.has_active_filters() {
            self.no_results = new_page.is_empty();
            match policy {
                UnfilteredPagePolicy::Replace => self.visible = new_page,
                UnfilteredPagePolicy::Accumulate => self.visible.extend(new_page),
            }
            return;
        }

        let matched: Vec<Job> = new_page
            .into_iter()
            .filter(|job| self.visible.iter().any(|visible| visible == job))
            .collect();

        if matched.is_empty() {
            self.no_results = true;
            return;
        }

        self.visible.extend(matched);
        self.no_results = false;
    }

    /// Rebuild the visible list from every accumulated job.
    fn recompute(&mut self) {
        self.visible = filter_jobs(&self.filters, &self.settled_search, &self.jobs);
        debug!(
            "Recomputed visible jobs: {} of {} match {} predicate(s), search {:?}",
            self.visible.len(),
            self.jobs.len(),
            self.filters.len(),
            self.settled_search
        );
    }

    fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            visible: self.visible.clone(),
            options: self.options.clone(),
            filters: self.filters.clone(),
            pending_search: self.pending_search.clone(),
            settled_search: self.settled_search.clone(),
            state: self.pagination.state(),
            cursor: self.pagination.cursor(),
            accumulated: self.jobs.len(),
            no_results: self.no_results,
            total_count: self.total_count,
        }
    }
}

struct BoardInner {
    source: Arc<dyn JobSource>,
    config: BoardConfig,
    state: Mutex<BoardState>,
    search_debouncer: Debouncer,
}

/// A browsing session over a [`JobSource`].
///
/// Cloning is cheap and every clone refers to the same session.
#[derive(Clone)]
pub struct JobBoard {
    inner: Arc<BoardInner>,
}

impl JobBoard {
    pub fn new(source: Arc<dyn JobSource>, config: BoardConfig) -> Self {
        let state = BoardState::new(&config);
        let search_debouncer = Debouncer::new(config.search_debounce);
        Self {
            inner: Arc::new(BoardInner {
                source,
                config,
                state: Mutex::new(state),
                search_debouncer,
            }),
        }
    }

    pub fn config(&self) -> &BoardConfig {
        &self.inner.config
    }

    fn lock_state(&self) -> MutexGuard<'_, BoardState> {
        self.inner.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // =========================================================================
    // Pagination
    // =========================================================================

    /// Request the page under the cursor and fold it into the board.
    ///
    /// Fetch errors are logged and swallowed: nothing changes, so the next
    /// call asks for the same page again.
    pub async fn fetch_next_page(&self) -> FetchOutcome {
        let request = match self.lock_state().pagination.begin() {
            Some(request) => request,
            None => {
                debug!("Ignoring load request, board is loading or exhausted");
                return FetchOutcome::Skipped;
            }
        };
        let loading = LoadingGuard { board: self };

        debug!(
            "Fetching page at offset {} (limit {}) from {}",
            request.offset,
            request.limit,
            self.inner.source.describe()
        );
        let result = self.inner.source.fetch_page(request).await;

        let mut state = self.lock_state();
        loading.disarm();
        match result {
            Ok(page) if page.is_undecodable() => {
                warn!(
                    "Page at offset {} had {} record(s) but none decoded, will retry",
                    request.offset, page.received
                );
                state.pagination.release();
                FetchOutcome::Failed
            }
            Ok(page) if page.is_empty() => {
                if page.total_count.is_some() {
                    state.total_count = page.total_count;
                }
                state.pagination.exhaust();
                info!(
                    "No more jobs to load after {} page(s)",
                    state.pagination.cursor()
                );
                FetchOutcome::Exhausted
            }
            Ok(page) => {
                let count = page.len();
                state.apply_page(page, &self.inner.config);
                info!(
                    "Loaded {} job(s), page {}, {} accumulated, {} visible",
                    count,
                    state.pagination.cursor(),
                    state.jobs.len(),
                    state.visible.len()
                );
                FetchOutcome::Appended { count }
            }
            Err(e) => {
                error!("Error fetching jobs: {}", e);
                state.pagination.release();
                FetchOutcome::Failed
            }
        }
    }

    // =========================================================================
    // Filtering
    // =========================================================================

    /// Parse `raw` for `filter_type` and apply it, see [`Self::set_predicate`].
    pub fn set_filter(&self, filter_type: FilterType, raw: &str) -> Result<(), FilterError> {
        let predicate = Predicate::parse(filter_type, raw)?;
        self.set_predicate(predicate);
        Ok(())
    }

    /// Upsert `predicate` and rebuild the visible list from every
    /// accumulated job.
    pub fn set_predicate(&self, predicate: Predicate) {
        let mut state = self.lock_state();
        debug!("Setting filter {}", predicate);
        state.filters.upsert(predicate);
        state.recompute();
    }

    /// Drop the predicate of `filter_type`. Returns whether one was set.
    pub fn clear_filter(&self, filter_type: FilterType) -> bool {
        let mut state = self.lock_state();
        let removed = state.filters.remove(filter_type).is_some();
        if removed {
            state.recompute();
        }
        removed
    }

    pub fn clear_filters(&self) {
        let mut state = self.lock_state();
        state.filters.clear();
        state.recompute();
    }

    /// Record a company search edit.
    ///
    /// The text takes effect once no further edit arrives within the
    /// debounce window. Must be called from within a tokio runtime.
    pub fn set_company_search(&self, text: impl Into<String>) {
        let text = text.into();
        self.lock_state().pending_search = text.clone();

        let board = self.clone();
        self.inner
            .search_debouncer
            .call(async move { board.commit_company_search(text) });
    }

    fn commit_company_search(&self, text: String) {
        let mut state = self.lock_state();
        debug!("Company search settled on {:?}", text);
        state.settled_search = text;
        state.recompute();
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn snapshot(&self) -> BoardSnapshot {
        self.lock_state().snapshot()
    }

    pub fn visible_jobs(&self) -> Vec<Job> {
        self.lock_state().visible.clone()
    }

    pub fn accumulated_jobs(&self) -> Vec<Job> {
        self.lock_state().jobs.clone()
    }

    pub fn filter_options(&self) -> FilterOptions {
        self.lock_state().options.clone()
    }

    pub fn filters(&self) -> FilterSet {
        self.lock_state().filters.clone()
    }

    pub fn cursor(&self) -> usize {
        self.lock_state().pagination.cursor()
    }

    pub fn pagination_state(&self) -> PaginationState {
        self.lock_state().pagination.state()
    }

    pub fn is_loading(&self) -> bool {
        self.pagination_state() == PaginationState::Loading
    }

    pub fn is_exhausted(&self) -> bool {
        self.pagination_state() == PaginationState::Exhausted
    }

    pub fn no_results(&self) -> bool {
        self.lock_state().no_results
    }
}

/// Leaves `Loading` when the fetch future is dropped before its result is
/// applied.
struct LoadingGuard<'a> {
    board: &'a JobBoard,
}

impl LoadingGuard<'_> {
    /// The caller holds the state lock and settles the state itself.
    fn disarm(self) {
        std::mem::forget(self);
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.board.lock_state().pagination.release();
    }
}
