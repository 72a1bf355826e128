//! Filter-option vocabulary: the values offered in each filter dropdown.

use crate::source::Job;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Which fetched pages the vocabulary is derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum VocabularyScope {
    /// Only the most recently fetched page. Options seen on earlier pages
    /// disappear when a new page arrives.
    #[default]
    LatestPage,
    /// Union over every page fetched so far.
    AllPages,
}

/// Distinct values per filter, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterOptions {
    pub roles: Vec<String>,
    pub locations: Vec<String>,
    pub experience: Vec<u32>,
    pub min_pay: Vec<f64>,
}

impl FilterOptions {
    /// Derive the vocabulary of `jobs`.
    pub fn from_jobs(jobs: &[Job]) -> Self {
        let mut options = Self::default();
        options.extend(jobs);
        options
    }

    /// Add the values of `jobs` not already present.
    ///
    /// Missing numeric values are not offered as options.
    pub fn extend(&mut self, jobs: &[Job]) {
        for job in jobs {
            push_unique(&mut self.roles, &job.job_role);
            push_unique(&mut self.locations, &job.location);
            if let Some(min_exp) = job.min_exp {
                if !self.experience.contains(&min_exp) {
                    self.experience.push(min_exp);
                }
            }
            if let Some(min_pay) = job.min_jd_salary {
                if !self.min_pay.contains(&min_pay) {
                    self.min_pay.push(min_pay);
                }
            }
        }
    }

    /// Experience values in ascending order, as the dropdown lists them.
    pub fn experience_sorted(&self) -> Vec<u32> {
        let mut values = self.experience.clone();
        values.sort_unstable();
        values
    }

    /// Minimum-pay values in ascending order, as the dropdown lists them.
    pub fn min_pay_sorted(&self) -> Vec<f64> {
        let mut values = self.min_pay.clone();
        values.sort_by(f64::total_cmp);
        values
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
            && self.locations.is_empty()
            && self.experience.is_empty()
            && self.min_pay.is_empty()
    }
}

fn push_unique(values: &mut Vec<String>, value: &str) {
    if !values.iter().any(|v| v == value) {
        values.push(value.to_string());
    }
}
