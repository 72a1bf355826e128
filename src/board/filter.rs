//! Client-side job filtering.
//!
//! A [`FilterSet`] holds at most one [`Predicate`] per [`FilterType`]; all
//! predicates are ANDed together with the company-name search.

use crate::source::Job;
use clap::ValueEnum;
use std::fmt;
use thiserror::Error;

/// The structured filters a user can pick from the option dropdowns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum FilterType {
    /// Exact match on the job's minimum experience, in years.
    #[value(name = "min-exp", alias = "minExp")]
    MinExperience,
    /// Exact match on the location string.
    #[value(name = "location")]
    Location,
    /// Exact match on the role label.
    #[value(name = "role", alias = "jobRole")]
    Role,
    /// Exact match on the job's minimum salary.
    #[value(name = "min-pay", alias = "minJdSalary")]
    MinSalary,
}

impl fmt::Display for FilterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterType::MinExperience => write!(f, "min-exp"),
            FilterType::Location => write!(f, "location"),
            FilterType::Role => write!(f, "role"),
            FilterType::MinSalary => write!(f, "min-pay"),
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum FilterError {
    #[error("Invalid value for {filter_type}: {value:?} is not a number")]
    NotANumber {
        filter_type: FilterType,
        value: String,
    },
}

/// A single `(type, value)` constraint.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    MinExperience(u32),
    Location(String),
    Role(String),
    MinSalary(f64),
}

impl Predicate {
    /// Build a predicate from the raw value picked in the UI.
    ///
    /// Numeric filters must parse as numbers, string filters are taken as-is.
    pub fn parse(filter_type: FilterType, raw: &str) -> Result<Self, FilterError> {
        let not_a_number = || FilterError::NotANumber {
            filter_type,
            value: raw.to_string(),
        };
        match filter_type {
            FilterType::MinExperience => raw
                .trim()
                .parse::<u32>()
                .map(Predicate::MinExperience)
                .map_err(|_| not_a_number()),
            FilterType::MinSalary => raw
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .map(Predicate::MinSalary)
                .ok_or_else(not_a_number),
            FilterType::Location => Ok(Predicate::Location(raw.to_string())),
            FilterType::Role => Ok(Predicate::Role(raw.to_string())),
        }
    }

    pub fn filter_type(&self) -> FilterType {
        match self {
            Predicate::MinExperience(_) => FilterType::MinExperience,
            Predicate::Location(_) => FilterType::Location,
            Predicate::Role(_) => FilterType::Role,
            Predicate::MinSalary(_) => FilterType::MinSalary,
        }
    }

    /// Whether `job` satisfies this predicate. Missing job values never match.
    pub fn matches(&self, job: &Job) -> bool {
        match self {
            Predicate::MinExperience(years) => job.min_exp == Some(*years),
            Predicate::Location(location) => job.location == *location,
            Predicate::Role(role) => job.job_role == *role,
            Predicate::MinSalary(salary) => job.min_jd_salary == Some(*salary),
        }
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Predicate::MinExperience(years) => write!(f, "{}={}", self.filter_type(), years),
            Predicate::Location(location) => write!(f, "{}={}", self.filter_type(), location),
            Predicate::Role(role) => write!(f, "{}={}", self.filter_type(), role),
            Predicate::MinSalary(salary) => write!(f, "{}={}", self.filter_type(), salary),
        }
    }
}

/// Ordered predicates, at most one per [`FilterType`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSet {
    predicates: Vec<Predicate>,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `predicate`, overwriting in place any predicate of the same type.
    ///
    /// Returns the replaced predicate, if any.
    pub fn upsert(&mut self, predicate: Predicate) -> Option<Predicate> {
        let filter_type = predicate.filter_type();
        match self
            .predicates
            .iter_mut()
            .find(|p| p.filter_type() == filter_type)
        {
            Some(existing) => Some(std::mem::replace(existing, predicate)),
            None => {
                self.predicates.push(predicate);
                None
            }
        }
    }

    pub fn remove(&mut self, filter_type: FilterType) -> Option<Predicate> {
        let index = self
            .predicates
            .iter()
            .position(|p| p.filter_type() == filter_type)?;
        Some(self.predicates.remove(index))
    }

    pub fn clear(&mut self) {
        self.predicates.clear();
    }

    pub fn get(&self, filter_type: FilterType) -> Option<&Predicate> {
        self.predicates
            .iter()
            .find(|p| p.filter_type() == filter_type)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Predicate> {
        self.predicates.iter()
    }

    pub fn len(&self) -> usize {
        self.predicates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    /// Whether `job` satisfies every predicate. An empty set matches everything.
    pub fn matches(&self, job: &Job) -> bool {
        self.predicates.iter().all(|p| p.matches(job))
    }
}

/// Case-insensitive substring match on the employer name.
///
/// Blank search text matches every job.
pub fn matches_company_search(job: &Job, search: &str) -> bool {
    search.trim().is_empty()
        || job
            .company_name
            .to_lowercase()
            .contains(&search.to_lowercase())
}

/// Jobs from `jobs` passing both the predicates and the company search, in
/// their original order.
pub fn filter_jobs(filters: &FilterSet, company_search: &str, jobs: &[Job]) -> Vec<Job> {
    jobs.iter()
        .filter(|job| filters.matches(job) && matches_company_search(job, company_search))
        .cloned()
        .collect()
}
