//! Extraction of publication dates embedded in repository paths.
//!
//! Issue files in the upstream repository carry their date as a
//! `YYYY.MM.DD` segment somewhere in the path, e.g.
//! `05_wired/2022.02.02/wired_2022.02.02.pdf`.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use regex::Regex;
use std::sync::OnceLock;

/// Distance assigned to candidates with no recognizable date. Loses every
/// nearest-match comparison against a dated candidate, however distant that
/// candidate's date is from the requested one.
pub const UNDATED_DISTANCE: i64 = i64::MAX;

fn date_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\d{4}\.\d{2}\.\d{2}").expect("date pattern is valid"))
}

/// Find a `YYYY.MM.DD` segment anywhere in `path` and parse it as a date.
///
/// Returns `None` when no such segment exists or its digits do not form a
/// real calendar date. Not an error: callers rank such candidates with
/// [`UNDATED_DISTANCE`].
pub fn extract_issue_date(path: &str) -> Option<NaiveDate> {
    let segment = date_pattern().find(path)?;
    NaiveDate::parse_from_str(&segment.as_str().replace('.', "-"), "%Y-%m-%d").ok()
}

/// Absolute distance, in elapsed seconds, between a candidate's issue date
/// and the requested instant.
pub fn distance_from(requested: DateTime<Utc>, issue_date: Option<NaiveDate>) -> i64 {
    match issue_date {
        Some(date) => {
            let issue_ts = date.and_time(NaiveTime::MIN).and_utc().timestamp();
            (issue_ts - requested.timestamp()).abs()
        }
        None => UNDATED_DISTANCE,
    }
}
