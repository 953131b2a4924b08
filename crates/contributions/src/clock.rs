//! Calendar dates: injected wall-clock access and start-date parsing.
//!
//! The report title embeds today's date. Reading it through [`Clock`] keeps
//! publishing deterministic under test.

use chrono::{DateTime, NaiveDate, Utc};

use crate::ReportError;

/// Source of the current calendar date (UTC).
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// The system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }
}

/// A clock frozen at one date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// Title of the weekly report issue filed on `date`.
pub fn report_title(date: NaiveDate) -> String {
    format!("Weekly GitHub Contributions ({})", date.format("%Y-%m-%d"))
}

/// Parses an ISO-8601 start date.
///
/// Accepts a bare calendar date (`2024-03-15`) or a full RFC 3339 timestamp,
/// in which case the UTC calendar date is used.
pub fn parse_start_date(value: &str) -> Result<NaiveDate, ReportError> {
    let trimmed = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date);
    }
    DateTime::parse_from_rfc3339(trimmed)
        .map(|dt| dt.with_timezone(&Utc).date_naive())
        .map_err(|_| ReportError::InvalidDate {
            value: value.to_string(),
        })
}

/// The start of `date` in UTC, formatted for a GraphQL `DateTime` argument.
pub fn start_of_day_rfc3339(date: NaiveDate) -> String {
    format!("{}T00:00:00Z", date.format("%Y-%m-%d"))
}
