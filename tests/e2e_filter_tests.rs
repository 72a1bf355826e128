//! End-to-end tests for client-side filtering
//!
//! Loads fixture pages over HTTP, then filters and searches what was fetched.

mod common;

use common::{job_uid, test_board_config, TestServer, PAGE_LIMIT, TOTAL_JOBS};
use jobscroll::board::{FetchOutcome, FilterType, JobBoard};
use jobscroll::render::{self, OptionsView};
use std::time::Duration;

fn uids(jobs: &[jobscroll::Job]) -> Vec<String> {
    jobs.iter().map(|j| j.jd_uid.clone()).collect()
}

/// Fixture indices in the order the board accumulates them: pages at offsets
/// 0, 10 and 20 with limit 12 overlap by two records each.
fn accumulated_indices() -> Vec<usize> {
    [0..12, 10..22, 20..TOTAL_JOBS].into_iter().flatten().collect()
}

async fn load_everything(board: &JobBoard) {
    while let FetchOutcome::Appended { .. } = board.fetch_next_page().await {}
    assert!(board.is_exhausted());
}

// =============================================================================
// Structured Filters
// =============================================================================

#[tokio::test]
async fn test_location_filter_covers_all_fetched_pages() {
    let server = TestServer::spawn().await;
    let board = server.board(test_board_config());
    load_everything(&board).await;

    board.set_filter(FilterType::Location, "bangalore").unwrap();

    let expected: Vec<String> = accumulated_indices()
        .into_iter()
        .filter(|i| i % 3 == 1)
        .map(job_uid)
        .collect();
    assert_eq!(uids(&board.visible_jobs()), expected);
}

#[tokio::test]
async fn test_filters_combine_across_types() {
    let server = TestServer::spawn().await;
    let board = server.board(test_board_config());
    load_everything(&board).await;

    board.set_filter(FilterType::Role, "ios").unwrap();
    board.set_filter(FilterType::MinExperience, "3").unwrap();

    assert_eq!(uids(&board.visible_jobs()), vec![job_uid(2), job_uid(22)]);
    assert_eq!(board.filters().len(), 2);
}

#[tokio::test]
async fn test_min_pay_filter_keeps_duplicates() {
    let server = TestServer::spawn().await;
    let board = server.board(test_board_config());
    load_everything(&board).await;

    board.set_filter(FilterType::MinSalary, "40").unwrap();

    // Job 20 sits in two overlapping pages.
    assert_eq!(
        uids(&board.visible_jobs()),
        vec![job_uid(2), job_uid(14), job_uid(20), job_uid(20)]
    );
}

#[tokio::test]
async fn test_filter_values_match_exactly() {
    let server = TestServer::spawn().await;
    let board = server.board(test_board_config());
    board.fetch_next_page().await;

    board.set_filter(FilterType::Location, "Bangalore").unwrap();

    let snapshot = board.snapshot();
    assert!(snapshot.visible.is_empty());
    assert_eq!(
        render::status_line(&snapshot),
        Some("No jobs match the current filters.")
    );
}

#[tokio::test]
async fn test_clearing_filters_restores_accumulated_jobs() {
    let server = TestServer::spawn().await;
    let board = server.board(test_board_config());
    load_everything(&board).await;

    board.set_filter(FilterType::Role, "backend").unwrap();
    assert!(board.clear_filter(FilterType::Role));

    let expected: Vec<String> = accumulated_indices().into_iter().map(job_uid).collect();
    assert_eq!(uids(&board.visible_jobs()), expected);
}

// =============================================================================
// Pages Arriving Under a Filter
// =============================================================================

#[tokio::test]
async fn test_new_pages_only_repeat_visible_jobs() {
    let server = TestServer::spawn().await;
    let board = server.board(test_board_config());
    board.fetch_next_page().await;

    board.set_filter(FilterType::Role, "ios").unwrap();
    assert_eq!(
        uids(&board.visible_jobs()),
        vec![job_uid(2), job_uid(6), job_uid(10)]
    );

    // The second page repeats job 10, which is visible, and brings new ios
    // jobs 14 and 18, which are not added.
    board.fetch_next_page().await;
    assert!(!board.no_results());
    assert_eq!(
        uids(&board.visible_jobs()),
        vec![job_uid(2), job_uid(6), job_uid(10), job_uid(10)]
    );

    // Nothing on the third page is identical to a visible job.
    board.fetch_next_page().await;
    assert!(board.no_results());
    assert_eq!(board.visible_jobs().len(), 4);
    assert_eq!(board.accumulated_jobs().len(), 2 * PAGE_LIMIT + 5);
}

// =============================================================================
// Company Search
// =============================================================================

#[tokio::test]
async fn test_company_search_settles_after_debounce() {
    let server = TestServer::spawn().await;
    let board = server.board(test_board_config());
    load_everything(&board).await;
    let before = board.visible_jobs();

    board.set_company_search("goog");
    assert_eq!(board.visible_jobs(), before);

    tokio::time::sleep(Duration::from_millis(300)).await;

    let expected: Vec<String> = accumulated_indices()
        .into_iter()
        .filter(|i| i % 5 == 0 || i % 5 == 3)
        .map(job_uid)
        .collect();
    let visible = board.visible_jobs();
    assert_eq!(uids(&visible), expected);
    assert!(visible
        .iter()
        .any(|j| j.company_name == "GOOGLE INDIA"));
}

#[tokio::test]
async fn test_company_search_combines_with_filters() {
    let server = TestServer::spawn().await;
    let board = server.board(test_board_config());
    load_everything(&board).await;

    board.set_filter(FilterType::Location, "remote").unwrap();
    board.set_company_search("DROP");
    tokio::time::sleep(Duration::from_millis(300)).await;

    let expected: Vec<String> = accumulated_indices()
        .into_iter()
        .filter(|i| i % 5 == 1 && i % 3 == 2)
        .map(job_uid)
        .collect();
    assert!(!expected.is_empty());
    assert_eq!(uids(&board.visible_jobs()), expected);
}

// =============================================================================
// Filter Options
// =============================================================================

#[tokio::test]
async fn test_options_follow_latest_page() {
    let server = TestServer::spawn().await;
    let board = server.board(test_board_config());

    board.fetch_next_page().await;
    let options = board.filter_options();
    assert_eq!(options.experience_sorted(), vec![1, 2, 3, 4, 5]);
    assert_eq!(options.locations, vec!["delhi ncr", "bangalore", "remote"]);

    load_everything(&board).await;

    let view = OptionsView::new(&board.filter_options());
    assert_eq!(view.locations, vec!["Remote", "Delhi Ncr", "Bangalore"]);
    assert_eq!(view.roles, vec!["Frontend", "Backend", "Ios", "Tech Lead"]);
    assert_eq!(view.min_pay, vec!["40k USD", "50k USD", "60k USD", "70k USD"]);
}
