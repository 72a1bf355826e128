//! HTTP client for the remote job-description endpoint.

use super::job_source::{JobSource, SourceError};
use super::models::{JobPage, PageRequest};
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

/// Default endpoint serving sample job descriptions.
pub const DEFAULT_ENDPOINT: &str = "https://api.weekday.technology/adhoc/getSampleJdJSON";

/// Settings for [`JobSourceClient`].
#[derive(Debug, Clone)]
pub struct SourceConfig {
    pub endpoint: String,
    pub timeout: Duration,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

/// HTTP client posting `{limit, offset}` to the job endpoint.
pub struct JobSourceClient {
    client: reqwest::Client,
    endpoint: String,
}

impl JobSourceClient {
    /// Create a new client.
    ///
    /// # Arguments
    /// * `config` - Endpoint URL and request timeout
    pub fn new(config: SourceConfig) -> Result<Self, SourceError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| SourceError::Connection(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
        })
    }

    /// The endpoint pages are posted to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl JobSource for JobSourceClient {
    fn describe(&self) -> String {
        self.endpoint.clone()
    }

    async fn fetch_page(&self, request: PageRequest) -> Result<JobPage, SourceError> {
        debug!(
            endpoint = %self.endpoint,
            limit = request.limit,
            offset = request.offset,
            "Requesting job page"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SourceError::Timeout
                } else {
                    SourceError::Connection(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(SourceError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: serde_json::Value = response.json().await.map_err(|e| {
            if e.is_timeout() {
                SourceError::Timeout
            } else {
                SourceError::Decode(e.to_string())
            }
        })?;

        Ok(JobPage::from_json(body))
    }
}
