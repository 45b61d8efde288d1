//! Calendar months and activation windows
//!
//! Budgets are computed per calendar month. Income sources, planned
//! expenses and goals can be limited to a date window.

use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A calendar month (e.g. "2025-01")
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Month {
    year: i32,
    month: u32,
}

impl Month {
    /// Create a month, validating the month number
    pub fn new(year: i32, month: u32) -> Result<Self, PeriodParseError> {
        if !(1..=12).contains(&month) {
            return Err(PeriodParseError::InvalidMonth(month));
        }
        Ok(Self { year, month })
    }

    /// The month containing a date
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// The current month in local time
    pub fn current() -> Self {
        Self::of(Local::now().date_naive())
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// First day of the month
    pub fn start_date(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    /// First day of the following month (exclusive end)
    pub fn end_date(&self) -> NaiveDate {
        self.next().start_date()
    }

    /// Check if a date falls within this month
    pub fn contains(&self, date: NaiveDate) -> bool {
        Self::of(date) == *self
    }

    /// Get the next month
    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// Get the previous month
    pub fn prev(&self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    /// January of this month's year
    pub fn first_of_year(&self) -> Self {
        Self {
            year: self.year,
            month: 1,
        }
    }

    /// Parse "YYYY-MM"
    pub fn parse(s: &str) -> Result<Self, PeriodParseError> {
        let s = s.trim();
        let (year, month) = s
            .split_once('-')
            .ok_or_else(|| PeriodParseError::InvalidFormat(s.to_string()))?;

        let year: i32 = year
            .parse()
            .map_err(|_| PeriodParseError::InvalidFormat(s.to_string()))?;
        let month: u32 = month
            .parse()
            .map_err(|_| PeriodParseError::InvalidFormat(s.to_string()))?;

        Self::new(year, month)
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Error type for month parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PeriodParseError {
    InvalidFormat(String),
    InvalidMonth(u32),
}

impl fmt::Display for PeriodParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeriodParseError::InvalidFormat(s) => write!(f, "Invalid month format: {}", s),
            PeriodParseError::InvalidMonth(m) => write!(f, "Invalid month: {}", m),
        }
    }
}

impl std::error::Error for PeriodParseError {}

/// Items limited to an optional `[from_date, to_date]` window
pub trait ActiveWindow {
    fn from_date(&self) -> Option<NaiveDate>;
    fn to_date(&self) -> Option<NaiveDate>;

    /// Whether the item applies to the budget window `[start, end)`
    ///
    /// An item ending on `start` itself is inactive; any later `to_date`
    /// keeps it for the whole month (`to > start || to > end`).
    fn is_active(&self, start: NaiveDate, end: NaiveDate) -> bool {
        let started = self.from_date().map_or(true, |from| from <= start);
        let not_ended = self.to_date().map_or(true, |to| to > start || to > end);
        started && not_ended
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    struct Window(Option<NaiveDate>, Option<NaiveDate>);

    impl ActiveWindow for Window {
        fn from_date(&self) -> Option<NaiveDate> {
            self.0
        }
        fn to_date(&self) -> Option<NaiveDate> {
            self.1
        }
    }

    #[test]
    fn test_month_bounds() {
        let jan = Month::new(2025, 1).unwrap();
        assert_eq!(jan.start_date(), date(2025, 1, 1));
        assert_eq!(jan.end_date(), date(2025, 2, 1));
        assert!(jan.contains(date(2025, 1, 31)));
        assert!(!jan.contains(date(2025, 2, 1)));
    }

    #[test]
    fn test_month_navigation() {
        let dec = Month::new(2024, 12).unwrap();
        assert_eq!(dec.next(), Month::new(2025, 1).unwrap());
        assert_eq!(dec.next().prev(), dec);
        assert_eq!(dec.first_of_year(), Month::new(2024, 1).unwrap());
        assert!(dec < dec.next());
    }

    #[test]
    fn test_parse() {
        assert_eq!(Month::parse("2025-03").unwrap(), Month::new(2025, 3).unwrap());
        assert_eq!(
            Month::parse("2025-13"),
            Err(PeriodParseError::InvalidMonth(13))
        );
        assert!(Month::parse("march").is_err());
        assert_eq!(Month::new(2025, 3).unwrap().to_string(), "2025-03");
    }

    #[test]
    fn test_window_without_bounds_is_always_active() {
        let w = Window(None, None);
        assert!(w.is_active(date(2025, 1, 1), date(2025, 2, 1)));
    }

    #[test]
    fn test_window_from_date() {
        let w = Window(Some(date(2025, 1, 1)), None);
        assert!(w.is_active(date(2025, 1, 1), date(2025, 2, 1)));
        assert!(!w.is_active(date(2024, 12, 1), date(2025, 1, 1)));

        // A source starting mid-month only applies from the next month
        let mid = Window(Some(date(2025, 1, 15)), None);
        assert!(!mid.is_active(date(2025, 1, 1), date(2025, 2, 1)));
    }

    #[test]
    fn test_window_to_date_boundaries() {
        let start = date(2025, 3, 1);
        let end = date(2025, 4, 1);

        // Ending on the first day of the month: neither disjunct holds
        assert!(!Window(None, Some(start)).is_active(start, end));
        // Ending the day after the month starts keeps it for the whole month
        assert!(Window(None, Some(date(2025, 3, 2))).is_active(start, end));
        // Ending exactly on the exclusive end is still active
        assert!(Window(None, Some(end)).is_active(start, end));
        // Ended in a previous month
        assert!(!Window(None, Some(date(2025, 2, 28))).is_active(start, end));
    }
}
