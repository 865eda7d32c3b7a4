//! Date windows and month bucketing used by the filter and the monthly aggregators

use chrono::{Datelike, Month, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeError {
    /// Start date falls after end date
    InvalidRange { start: NaiveDate, end: NaiveDate },
}

impl std::fmt::Display for RangeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RangeError::InvalidRange { start, end } => {
                write!(f, "Invalid date range: start {} is after end {}", start, end)
            }
        }
    }
}

impl std::error::Error for RangeError {}

/// Inclusive calendar-date window over the approval timestamp
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, RangeError> {
        if start > end {
            return Err(RangeError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Time of day is ignored: a timestamp late on `end` is still inside.
    pub fn contains(&self, ts: NaiveDateTime) -> bool {
        self.contains_date(ts.date())
    }

    pub fn contains_date(&self, day: NaiveDate) -> bool {
        self.start <= day && day <= self.end
    }

    /// Number of calendar days covered, both ends counted
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// Move the start by `delta` days, clamped to `[bounds.start, self.end]`
    pub fn shift_start(&self, delta: i64, bounds: &DateRange) -> Self {
        let moved = self.start + chrono::Duration::days(delta);
        let start = moved.clamp(bounds.start.min(self.end), self.end);
        Self { start, end: self.end }
    }

    /// Move the end by `delta` days, clamped to `[self.start, bounds.end]`
    pub fn shift_end(&self, delta: i64, bounds: &DateRange) -> Self {
        let moved = self.end + chrono::Duration::days(delta);
        let end = moved.clamp(self.start, bounds.end.max(self.start));
        Self { start: self.start, end }
    }

    /// Smallest range covering both `self` and `other`
    pub fn span(&self, other: &DateRange) -> Self {
        Self {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} → {}", self.start, self.end)
    }
}

/// How the monthly aggregators bucket purchase timestamps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MonthGrouping {
    /// Month name only; the same month of different years shares one bucket
    #[default]
    MonthName,
    /// Calendar year and month
    YearMonth,
}

impl MonthGrouping {
    pub fn as_str(&self) -> &'static str {
        match self {
            MonthGrouping::MonthName => "month",
            MonthGrouping::YearMonth => "year_month",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "month" | "month_name" => Some(MonthGrouping::MonthName),
            "year_month" | "year-month" | "yearmonth" => Some(MonthGrouping::YearMonth),
            _ => None,
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            MonthGrouping::MonthName => MonthGrouping::YearMonth,
            MonthGrouping::YearMonth => MonthGrouping::MonthName,
        }
    }

    /// Bucket key for a timestamp; sorts in display order
    pub fn bucket(&self, ts: NaiveDateTime) -> MonthBucket {
        match self {
            MonthGrouping::MonthName => MonthBucket { year: None, month: ts.month() },
            MonthGrouping::YearMonth => MonthBucket {
                year: Some(ts.year()),
                month: ts.month(),
            },
        }
    }
}

/// Ordered month key; `year` is `None` under month-name grouping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MonthBucket {
    pub year: Option<i32>,
    pub month: u32,
}

impl MonthBucket {
    /// "January" or "January 2024"
    pub fn label(&self) -> String {
        let name = u8::try_from(self.month)
            .ok()
            .and_then(|m| Month::try_from(m).ok())
            .map(|m| m.name())
            .unwrap_or("Unknown");
        match self.year {
            Some(year) => format!("{} {}", name, year),
            None => name.to_string(),
        }
    }
}
