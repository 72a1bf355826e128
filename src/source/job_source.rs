//! Remote job source trait definition.

use super::models::{JobPage, PageRequest};
use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur while fetching a page from the remote source.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Request timeout")]
    Timeout,

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Response body is not valid JSON: {0}")]
    Decode(String),
}

/// A paged provider of job records.
///
/// The board only knows this trait; the HTTP transport and the fakes used in
/// tests both implement it.
#[async_trait]
pub trait JobSource: Send + Sync {
    /// Human readable description of where pages come from, for logs.
    fn describe(&self) -> String;

    /// Fetch one page of job records.
    async fn fetch_page(&self, request: PageRequest) -> Result<JobPage, SourceError>;
}
