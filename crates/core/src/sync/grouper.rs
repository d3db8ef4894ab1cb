//! Activity bucketing
//!
//! Dates are canonicalized to `YYYY-MM-DD` before grouping; values that
//! cannot be parsed keep their original form rather than erroring, which
//! degrades to raw-string bucket keys instead of failing the run.
//! Ordered maps keep bucket iteration deterministic.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use timebridge_domain::Activity;

#[allow(clippy::unwrap_used)] // literal pattern, cannot fail
static CANONICAL_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap());

/// Date parse formats tried after the canonical fast path.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%d.%m.%Y", "%m/%d/%Y"];

/// Activities bucketed as date -> project id -> entries.
pub type GroupedActivities = BTreeMap<String, BTreeMap<i64, Vec<Activity>>>;

/// Canonicalize a date value to `YYYY-MM-DD`.
///
/// Strips a time-of-day component if present, then attempts the generic
/// parse formats. On failure the trimmed input comes back unchanged.
pub fn canonical_date(value: &str) -> String {
    let trimmed = value.trim();
    if CANONICAL_DATE.is_match(trimmed) {
        return trimmed.to_string();
    }

    // Date-time forms: only the date part participates in bucketing.
    let head = trimmed.split(['T', ' ']).next().unwrap_or(trimmed);
    if CANONICAL_DATE.is_match(head) {
        return head.to_string();
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(head, format) {
            return date.format("%Y-%m-%d").to_string();
        }
    }

    trimmed.to_string()
}

/// Bucket activities by canonical date, then project id.
///
/// Each activity's `date` field is rewritten to its canonical form so
/// later comparisons and writes agree with the bucket key.
pub fn group(activities: Vec<Activity>) -> GroupedActivities {
    let mut grouped = GroupedActivities::new();

    for mut activity in activities {
        activity.date = canonical_date(&activity.date);
        grouped
            .entry(activity.date.clone())
            .or_default()
            .entry(activity.project_id)
            .or_default()
            .push(activity);
    }

    grouped
}
