//! Models for the remote job source API.
//!
//! These types match the JSON structure of the sample job-description
//! endpoint (`jdList` with camelCase job records).

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

/// Request body for a page of job records.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub limit: usize,
    pub offset: usize,
}

/// A single job posting as returned by the remote source.
///
/// Records are never mutated after they arrive. Upstream sends `null` for
/// many fields; text fields read that as empty, numeric fields as `None`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub jd_uid: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub jd_link: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub job_details_from_company: String,
    #[serde(default)]
    pub max_jd_salary: Option<f64>,
    #[serde(default)]
    pub min_jd_salary: Option<f64>,
    #[serde(default)]
    pub salary_currency_code: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub location: String,
    #[serde(default, deserialize_with = "whole_years")]
    pub min_exp: Option<u32>,
    #[serde(default, deserialize_with = "whole_years")]
    pub max_exp: Option<u32>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub job_role: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub company_name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub logo_url: String,
    #[serde(default)]
    pub experience: Option<String>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Years of experience, accepting `2` as well as `2.0`.
fn whole_years<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<f64>::deserialize(deserializer)? {
        None => Ok(None),
        Some(years) if years >= 0.0 && years.fract() == 0.0 && years <= f64::from(u32::MAX) => {
            Ok(Some(years as u32))
        }
        Some(years) => Err(de::Error::custom(format!(
            "expected a whole number of years, got {}",
            years
        ))),
    }
}

/// One decoded page of the remote source.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct JobPage {
    pub jobs: Vec<Job>,
    /// Number of `jdList` entries in the response, decodable or not.
    pub received: usize,
    /// Total number of postings upstream, when the source reports it.
    pub total_count: Option<u64>,
}

impl JobPage {
    /// Decode a response body.
    ///
    /// A missing or non-array `jdList` yields an empty page. Entries that do
    /// not decode as a [`Job`] are skipped.
    pub fn from_json(body: Value) -> Self {
        let total_count = body.get("totalCount").and_then(Value::as_u64);

        let entries = match body.get("jdList") {
            Some(Value::Array(entries)) => entries,
            Some(other) => {
                warn!("Ignoring jdList that is not an array: {}", type_name(other));
                return Self {
                    jobs: Vec::new(),
                    received: 0,
                    total_count,
                };
            }
            None => {
                warn!("Response has no jdList field, treating it as an empty page");
                return Self {
                    jobs: Vec::new(),
                    received: 0,
                    total_count,
                };
            }
        };

        let jobs: Vec<Job> = entries
            .iter()
            .enumerate()
            .filter_map(|(index, entry)| match Job::deserialize(entry) {
                Ok(job) => Some(job),
                Err(e) => {
                    warn!("Skipping job record #{} that failed to decode: {}", index, e);
                    None
                }
            })
            .collect();

        if jobs.is_empty() && !entries.is_empty() {
            warn!("None of the {} job records on this page decoded", entries.len());
        }

        Self {
            jobs,
            received: entries.len(),
            total_count,
        }
    }

    /// Build a page from already decoded jobs.
    pub fn from_jobs(jobs: Vec<Job>) -> Self {
        Self {
            received: jobs.len(),
            jobs,
            total_count: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    /// The source sent records, but none of them could be decoded.
    pub fn is_undecodable(&self) -> bool {
        self.jobs.is_empty() && self.received > 0
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
