// Day spans between ISO dates.
// Counts whole days between two YYYY-MM-DD strings, reporting malformed input as unknown.

use std::fmt;
use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::{Serialize, Serializer};

static ISO_DATE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap());

/// Number of days between two dates, or `Unknown` when either isn't a YYYY-MM-DD date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DaySpan {
    Days(i64),
    Unknown,
}

impl DaySpan {
    pub fn days(&self) -> Option<i64> {
        match self {
            DaySpan::Days(n) => Some(*n),
            DaySpan::Unknown => None,
        }
    }
}

impl fmt::Display for DaySpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DaySpan::Days(n) => write!(f, "{}", n),
            DaySpan::Unknown => f.write_str("unknown"),
        }
    }
}

impl Serialize for DaySpan {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            DaySpan::Days(n) => serializer.serialize_i64(*n),
            DaySpan::Unknown => serializer.serialize_str("unknown"),
        }
    }
}

fn parse(date: &str) -> Option<NaiveDate> {
    if !ISO_DATE.is_match(date) {
        return None;
    }
    NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()
}

/// Absolute number of days between `d1` and `d2`.
pub fn days_between(d1: &str, d2: &str) -> DaySpan {
    match (parse(d1), parse(d2)) {
        (Some(a), Some(b)) => DaySpan::Days((b - a).num_days().abs()),
        _ => DaySpan::Unknown,
    }
}
