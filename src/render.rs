//! Display transforms for job cards and filter options.
//!
//! Everything here produces plain strings; colouring is left to the terminal
//! front end.

use crate::board::{BoardSnapshot, FilterOptions};
use crate::source::Job;
use lazy_static::lazy_static;
use regex::{Captures, Regex};

/// Characters of the company description shown on a collapsed card.
pub const DESCRIPTION_PREVIEW_CHARS: usize = 400;
/// Descriptions longer than this get an ellipsis and can be expanded.
pub const DESCRIPTION_EXPANDABLE_CHARS: usize = 100;

lazy_static! {
    static ref WORD_START: Regex = Regex::new(r"\b\w").expect("word start pattern is valid");
}

/// Lowercase `text`, then uppercase the first letter of every word.
///
/// `"FULL-stack engineer"` becomes `"Full-Stack Engineer"`.
pub fn title_case(text: &str) -> String {
    let lower = text.to_lowercase();
    WORD_START
        .replace_all(&lower, |caps: &Captures| caps[0].to_uppercase())
        .into_owned()
}

fn amount(value: Option<f64>) -> String {
    match value {
        Some(v) if v != 0.0 => v.to_string(),
        _ => "-".to_string(),
    }
}

/// `$min - $max CUR`, with `-` standing in for a missing bound.
pub fn salary_range(job: &Job) -> String {
    format!(
        "${} - ${} {}",
        amount(job.min_jd_salary),
        amount(job.max_jd_salary),
        job.salary_currency_code.as_deref().unwrap_or("USD")
    )
}

pub fn salary_line(job: &Job) -> String {
    format!("Estimated Salary: {}", salary_range(job))
}

/// The company description, cut to the preview length unless `expanded`.
pub fn description(job: &Job, expanded: bool) -> String {
    let text = &job.job_details_from_company;
    if expanded {
        return text.clone();
    }
    let mut preview: String = text.chars().take(DESCRIPTION_PREVIEW_CHARS).collect();
    if text.chars().count() > DESCRIPTION_EXPANDABLE_CHARS {
        preview.push_str("...");
    }
    preview
}

pub fn is_expandable(job: &Job) -> bool {
    job.job_details_from_company.chars().count() > DESCRIPTION_EXPANDABLE_CHARS
}

/// Minimum experience in years; postings without one read as one year.
pub fn min_experience_years(job: &Job) -> u32 {
    match job.min_exp {
        Some(years) if years > 0 => years,
        _ => 1,
    }
}

/// Display-ready fields of one job card.
#[derive(Debug, Clone, PartialEq)]
pub struct JobCardView {
    pub company: String,
    pub role: String,
    pub location: String,
    pub salary: String,
    pub about: String,
    pub expandable: bool,
    pub min_experience: String,
    pub link: String,
}

impl JobCardView {
    pub fn new(job: &Job, expanded: bool) -> Self {
        Self {
            company: job.company_name.clone(),
            role: title_case(&job.job_role),
            location: title_case(&job.location),
            salary: salary_line(job),
            about: description(job, expanded),
            expandable: !expanded && is_expandable(job),
            min_experience: format!("{} years", min_experience_years(job)),
            link: job.jd_link.clone(),
        }
    }
}

/// Dropdown entries for each filter, as the option lists show them.
#[derive(Debug, Clone, PartialEq)]
pub struct OptionsView {
    pub experience: Vec<String>,
    pub locations: Vec<String>,
    pub roles: Vec<String>,
    pub min_pay: Vec<String>,
}

impl OptionsView {
    pub fn new(options: &FilterOptions) -> Self {
        Self {
            experience: options
                .experience_sorted()
                .iter()
                .map(u32::to_string)
                .collect(),
            locations: options.locations.iter().map(|l| title_case(l)).collect(),
            roles: options.roles.iter().map(|r| title_case(r)).collect(),
            min_pay: options
                .min_pay_sorted()
                .iter()
                .map(|pay| format!("{}k USD", pay))
                .collect(),
        }
    }
}

/// Footer line describing the loading / end / empty state, if any applies.
pub fn status_line(snapshot: &BoardSnapshot) -> Option<&'static str> {
    if snapshot.is_loading() {
        Some("Loading...")
    } else if snapshot.is_exhausted() {
        Some("No more jobs to load.")
    } else if snapshot.no_results
        || (snapshot.visible.is_empty() && snapshot.has_active_filters())
    {
        Some("No jobs match the current filters.")
    } else {
        None
    }
}
