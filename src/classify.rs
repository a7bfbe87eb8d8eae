//! Date-windowed classification of pull requests and issues.
//!
//! Items are first filtered to those created inside `[begin, end)`; each
//! survivor is then counted as closed if it was closed no later than `end`,
//! otherwise as open, and open items at least `threshold` old at `end` are
//! also counted as stale.

use std::fmt;

use chrono::{DateTime, Duration, NaiveDateTime, TimeZone, Utc};
use serde::Serialize;

use crate::error::{AnalyzerError, Result};
use crate::models::WorkItem;

/// Accepted format for window bounds given on the command line.
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Age at which an open pull request counts as stale.
pub const PULL_REQUEST_STALE_DAYS: i64 = 30;

/// Age at which an open issue counts as stale.
pub const ISSUE_STALE_DAYS: i64 = 14;

/// The `[begin, end)` range of creation times considered by an analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AnalysisWindow {
    begin: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl AnalysisWindow {
    /// Build a window, defaulting `begin` to the Unix epoch and `end` to `now`.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyzerError::InvalidDateRange`] unless `begin < end`.
    pub fn new(
        begin: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> Result<Self> {
        let begin = begin.unwrap_or(DateTime::<Utc>::UNIX_EPOCH);
        let end = end.unwrap_or(now);

        if begin >= end {
            return Err(AnalyzerError::InvalidDateRange {
                begin: begin.format(DATE_FORMAT).to_string(),
                end: end.format(DATE_FORMAT).to_string(),
            });
        }

        Ok(Self { begin, end })
    }

    /// Window covering all time up to now.
    pub fn until_now() -> Self {
        Self {
            begin: DateTime::<Utc>::UNIX_EPOCH,
            end: Utc::now(),
        }
    }

    pub fn begin(&self) -> DateTime<Utc> {
        self.begin
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Whether a creation time falls inside the window.
    pub fn contains(&self, created_at: DateTime<Utc>) -> bool {
        self.begin <= created_at && created_at < self.end
    }
}

/// Parse a `YYYY-MM-DD HH:MM:SS` string as a UTC timestamp.
///
/// # Errors
///
/// Returns [`AnalyzerError::InvalidDate`] if the string does not match.
pub fn parse_date(value: &str) -> Result<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(value.trim(), DATE_FORMAT)
        .map(|naive| Utc.from_utc_datetime(&naive))
        .map_err(|_| AnalyzerError::InvalidDate(value.to_string()))
}

/// Open/closed/stale counts for one collection.
///
/// `stale` is a subset of `open`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub open: usize,
    pub closed: usize,
    pub stale: usize,
}

impl Classification {
    /// Number of in-window items.
    pub fn total(&self) -> usize {
        self.open + self.closed
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Open {}, closed {}, old {}",
            self.open, self.closed, self.stale
        )
    }
}

/// Count the open, closed and stale items created inside `window`.
///
/// Closedness is judged as of the window's end: an item closed after `end`
/// is still open for this analysis.
pub fn classify<'a, W, I>(items: I, window: &AnalysisWindow, threshold: Duration) -> Classification
where
    W: WorkItem + 'a,
    I: IntoIterator<Item = &'a W>,
{
    let mut counts = Classification::default();

    for item in items {
        let created_at = item.created_at();
        if !window.contains(created_at) {
            continue;
        }

        let closed = item.closed_at().is_some_and(|closed_at| closed_at <= window.end);
        if closed {
            counts.closed += 1;
            continue;
        }

        counts.open += 1;
        if window.end - created_at >= threshold {
            counts.stale += 1;
        }
    }

    counts
}
