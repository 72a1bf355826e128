//! Shared constants for end-to-end tests
//!
//! When the fixture job list changes, update only this file and
//! `fixtures.rs`.

// ============================================================================
// Fake Job API
// ============================================================================

/// Path the fake API serves job pages on
pub const JOBS_PATH: &str = "/adhoc/getSampleJdJSON";

/// Number of job records the fake API holds
pub const TOTAL_JOBS: usize = 25;

// ============================================================================
// Board Settings
// ============================================================================

/// Records requested per page
pub const PAGE_LIMIT: usize = 12;

/// Offset step between pages; smaller than the limit, so pages overlap
pub const PAGE_STRIDE: usize = 10;

/// Debounce used by tests that exercise the company search in real time
pub const TEST_SEARCH_DEBOUNCE_MS: u64 = 50;

// ============================================================================
// Fixture Values
// ============================================================================

pub const COMPANIES: [&str; 5] = ["Google", "Dropbox", "Sprinklr", "GOOGLE INDIA", "Acme Labs"];

pub const ROLES: [&str; 4] = ["frontend", "backend", "ios", "tech lead"];

pub const LOCATIONS: [&str; 3] = ["delhi ncr", "bangalore", "remote"];

// ============================================================================
// Timeouts
// ============================================================================

/// Maximum time to wait for the server to become ready
pub const SERVER_READY_TIMEOUT_MS: u64 = 5000;

/// Interval between readiness checks
pub const SERVER_READY_POLL_INTERVAL_MS: u64 = 20;
