//! Job records served by the fake API

use super::constants::*;
use serde_json::{json, Value};

/// Uid of the fixture job at `index`
pub fn job_uid(index: usize) -> String {
    format!("job-{:02}", index)
}

/// Builds the fixture job list.
///
/// Values cycle through [`COMPANIES`], [`ROLES`] and [`LOCATIONS`]. Every
/// 7th job has no minimum experience and every 8th no minimum salary, as
/// happens upstream.
pub fn create_test_jobs() -> Vec<Value> {
    (0..TOTAL_JOBS).map(job_record).collect()
}

fn job_record(index: usize) -> Value {
    let min_exp = if index % 7 == 0 {
        Value::Null
    } else {
        json!(index % 5 + 1)
    };
    let min_salary = if index % 8 == 0 {
        Value::Null
    } else {
        json!(10 * (index % 6) + 20)
    };

    json!({
        "jdUid": job_uid(index),
        "jdLink": format!("https://jobs.example/{}", job_uid(index)),
        "jobDetailsFromCompany": format!(
            "{} is looking for people who enjoy shipping software. ",
            COMPANIES[index % COMPANIES.len()]
        )
        .repeat(index % 4 + 1),
        "maxJdSalary": 10 * (index % 6) + 60,
        "minJdSalary": min_salary,
        "salaryCurrencyCode": "USD",
        "location": LOCATIONS[index % LOCATIONS.len()],
        "minExp": min_exp,
        "maxExp": index % 5 + 6,
        "jobRole": ROLES[index % ROLES.len()],
        "companyName": COMPANIES[index % COMPANIES.len()],
        "logoUrl": "https://logo.clearbit.com/example.com",
    })
}
