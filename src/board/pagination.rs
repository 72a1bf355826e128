//! Page cursor and the load-more state machine.

use crate::source::PageRequest;
use std::fmt;

/// Where the board is in the load-more cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaginationState {
    /// Ready to load the next page.
    #[default]
    Idle,
    /// A page request is in flight.
    Loading,
    /// The source returned an empty page. Terminal.
    Exhausted,
}

impl fmt::Display for PaginationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaginationState::Idle => write!(f, "idle"),
            PaginationState::Loading => write!(f, "loading"),
            PaginationState::Exhausted => write!(f, "exhausted"),
        }
    }
}

/// Zero-based page cursor plus the load-more state.
///
/// `begin` checks and enters `Loading` in one step; callers hold the board
/// lock while calling it, so two triggers racing each other cannot both get
/// a request.
#[derive(Debug, Clone)]
pub struct Pagination {
    cursor: usize,
    state: PaginationState,
    page_limit: usize,
    page_stride: usize,
}

impl Pagination {
    /// `page_limit` is the number of records asked for per request,
    /// `page_stride` the offset step between consecutive pages.
    pub fn new(page_limit: usize, page_stride: usize) -> Self {
        Self {
            cursor: 0,
            state: PaginationState::Idle,
            page_limit,
            page_stride,
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn state(&self) -> PaginationState {
        self.state
    }

    /// The request for the page under the cursor.
    pub fn next_request(&self) -> PageRequest {
        PageRequest {
            limit: self.page_limit,
            offset: self.cursor * self.page_stride,
        }
    }

    /// Enter `Loading` and return the request to issue, or `None` when a
    /// request is already in flight or the source is exhausted.
    pub fn begin(&mut self) -> Option<PageRequest> {
        match self.state {
            PaginationState::Idle => {
                self.state = PaginationState::Loading;
                Some(self.next_request())
            }
            PaginationState::Loading | PaginationState::Exhausted => None,
        }
    }

    /// A non-empty page arrived: move the cursor forward by one.
    pub fn advance(&mut self) {
        self.cursor += 1;
        self.state = PaginationState::Idle;
    }

    /// An empty page arrived: no further requests will be issued.
    pub fn exhaust(&mut self) {
        self.state = PaginationState::Exhausted;
    }

    /// Leave `Loading` without moving the cursor. No-op in other states.
    pub fn release(&mut self) {
        if self.state == PaginationState::Loading {
            self.state = PaginationState::Idle;
        }
    }
}
