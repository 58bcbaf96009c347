use crate::error::ConfigError;
use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Utc};

/// A validated, half-open-in-spirit `[start, end]` window in UTC.
///
/// Construction enforces `start < end` (strictly), so every calculator can
/// assume a non-degenerate window. Naive inputs are taken to be UTC, matching
/// how upstream data providers timestamp daily bars.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl DateRange {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, ConfigError> {
        if start >= end {
            return Err(ConfigError::ValidationError(
                "start must be strictly before end".to_string(),
            ));
        }
        Ok(Self { start, end })
    }

    /// Builds a range from naive datetimes, assuming UTC.
    pub fn from_naive(start: NaiveDateTime, end: NaiveDateTime) -> Result<Self, ConfigError> {
        Self::new(start.and_utc(), end.and_utc())
    }

    /// Builds a range from calendar dates: midnight UTC on `start` through
    /// end of day UTC on `end`.
    pub fn from_dates(start: NaiveDate, end: NaiveDate) -> Result<Self, ConfigError> {
        let start = start
            .and_hms_opt(0, 0, 0)
            .ok_or_else(|| ConfigError::ValidationError("invalid start date".to_string()))?;
        let end = end
            .and_hms_opt(23, 59, 59)
            .ok_or_else(|| ConfigError::ValidationError("invalid end date".to_string()))?;
        Self::from_naive(start, end)
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// The same window with `start` pulled back by `days`. Widening preserves
    /// the `start < end` invariant, so this cannot fail.
    pub fn with_lookback(&self, days: i64) -> DateRange {
        DateRange {
            start: self.start - Duration::days(days),
            end: self.end,
        }
    }

    /// Whether a business date falls inside the window.
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start.date_naive() && date <= self.end.date_naive()
    }
}
