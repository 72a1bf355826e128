//! Remote job source abstraction.
//!
//! The board pages through a [`JobSource`]; [`JobSourceClient`] is the
//! reqwest-backed implementation talking to the job-description endpoint.

mod client;
mod job_source;
pub mod models;

pub use client::{JobSourceClient, SourceConfig, DEFAULT_ENDPOINT};
pub use job_source::{JobSource, SourceError};
pub use models::{Job, JobPage, PageRequest};
