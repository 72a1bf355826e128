//! Common test infrastructure
//!
//! Spawns a fake job API over HTTP so the board can be exercised through the
//! real client. Tests should only import from this module.
//!
//! # Example
//!
//! ```no_run
//! mod common;
//! use common::{test_board_config, TestServer};
//!
//! #[tokio::test]
//! async fn test_first_page() {
//!     let server = TestServer::spawn().await;
//!     let board = server.board(test_board_config());
//!     board.fetch_next_page().await;
//! }
//! ```

mod constants;
mod fixtures;
mod server;

// Public API - this is what tests import
pub use constants::*;
pub use fixtures::job_uid;
pub use server::{ServeMode, TestServer};

use jobscroll::board::BoardConfig;
use std::time::Duration;

/// Board settings used across the suite: default paging with a short search
/// debounce so real-time waits stay small.
pub fn test_board_config() -> BoardConfig {
    BoardConfig {
        page_limit: PAGE_LIMIT,
        page_stride: PAGE_STRIDE,
        search_debounce: Duration::from_millis(TEST_SEARCH_DEBOUNCE_MS),
        ..BoardConfig::default()
    }
}
