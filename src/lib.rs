//! Jobscroll Library
//!
//! Paged job-listing browser: fetches job descriptions from a remote endpoint
//! page by page and filters them client-side. The binary wraps this in an
//! interactive terminal front end.

pub mod board;
pub mod config;
pub mod debounce;
pub mod render;
pub mod source;

// Re-export commonly used types for convenience
pub use board::{
    BoardConfig, BoardSnapshot, FetchOutcome, FilterType, JobBoard, VisibilityTrigger,
};
pub use config::{AppConfig, CliConfig, FileConfig};
pub use source::{Job, JobPage, JobSource, JobSourceClient, PageRequest, SourceConfig};
