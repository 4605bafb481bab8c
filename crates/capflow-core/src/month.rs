//! Calendar month arithmetic for forecast horizons
//!
//! Forecasts are indexed by whole calendar months. `Month` is the unit of
//! that index: it orders chronologically, renders a `YYYY-MM` key and a
//! human-readable label, and supports the month arithmetic the forecaster
//! and budget bucketing need.

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A calendar month (year + month number)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Month {
    pub year: i32,
    /// Month number in `1..=12`
    pub month: u8,
}

impl Month {
    const NAMES: [&'static str; 12] = [
        "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
    ];

    /// Create a month; out-of-range month numbers are normalized
    /// (`Month::new(2024, 13)` is January 2025)
    pub fn new(year: i32, month: i32) -> Self {
        let total = year * 12 + (month - 1);
        Self {
            year: total.div_euclid(12),
            month: (total.rem_euclid(12) + 1) as u8,
        }
    }

    /// The month containing the given date
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month() as u8,
        }
    }

    /// Add (or with a negative count, subtract) whole months
    pub fn add_months(self, months: i32) -> Self {
        Self::new(self.year, self.month as i32 + months)
    }

    /// First day of this month
    pub fn first_day(self) -> NaiveDate {
        // month is normalized to 1..=12, so day 1 always exists
        NaiveDate::from_ymd_opt(self.year, self.month as u32, 1).unwrap()
    }

    /// The `YYYY-MM` key used to join forecast rows across runs
    pub fn key(self) -> String {
        self.to_string()
    }

    /// Display label, e.g. `Jan 2024`
    pub fn label(self) -> String {
        format!("{} {}", Self::NAMES[(self.month - 1) as usize], self.year)
    }

    /// Fiscal year this month belongs to, labeled by ending calendar year.
    /// Fiscal years run July through June: Jul 2024 - Jun 2025 is FY 2025.
    pub fn fiscal_year(self) -> i32 {
        if self.month >= 7 {
            self.year + 1
        } else {
            self.year
        }
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Parse a `YYYY-MM-DD` date string; anything unparsable yields `None`
///
/// `None` is the engine's stand-in for an invalid date: every window test
/// against it evaluates false, so a record with bad dates contributes zero
/// demand without being excluded from iteration.
pub fn parse_date(raw: Option<&str>) -> Option<NaiveDate> {
    raw.and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())
}

/// Add whole months to a date, clamping the day into the target month
/// (Jan 31 + 1 month = Feb 28/29)
pub fn add_months_to_date(date: NaiveDate, months: u32) -> Option<NaiveDate> {
    date.checked_add_months(Months::new(months))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_and_label() {
        let m = Month::new(2024, 1);
        assert_eq!(m.key(), "2024-01");
        assert_eq!(m.label(), "Jan 2024");
        assert_eq!(Month::new(2025, 12).label(), "Dec 2025");
    }

    #[test]
    fn test_add_months_wraps_years() {
        let m = Month::new(2024, 11);
        assert_eq!(m.add_months(1), Month::new(2024, 12));
        assert_eq!(m.add_months(2), Month::new(2025, 1));
        assert_eq!(m.add_months(-11), Month::new(2023, 12));
    }

    #[test]
    fn test_normalization() {
        assert_eq!(Month::new(2024, 13), Month::new(2025, 1));
        assert_eq!(Month::new(2024, 0), Month::new(2023, 12));
    }

    #[test]
    fn test_ordering_is_chronological() {
        assert!(Month::new(2023, 12) < Month::new(2024, 1));
        assert!(Month::new(2024, 2) < Month::new(2024, 11));
    }

    #[test]
    fn test_fiscal_year_boundary() {
        assert_eq!(Month::new(2024, 6).fiscal_year(), 2024);
        assert_eq!(Month::new(2024, 7).fiscal_year(), 2025);
        assert_eq!(Month::new(2025, 1).fiscal_year(), 2025);
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date(Some("2024-03-15")),
            NaiveDate::from_ymd_opt(2024, 3, 15)
        );
        assert_eq!(parse_date(Some("not-a-date")), None);
        assert_eq!(parse_date(Some("2024-13-01")), None);
        assert_eq!(parse_date(None), None);
    }

    #[test]
    fn test_add_months_to_date_clamps_day() {
        let jan31 = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
        assert_eq!(
            add_months_to_date(jan31, 1),
            NaiveDate::from_ymd_opt(2024, 2, 29)
        );
    }

    #[test]
    fn test_from_date() {
        let d = NaiveDate::from_ymd_opt(2024, 5, 20).unwrap();
        assert_eq!(Month::from_date(d), Month::new(2024, 5));
    }
}
