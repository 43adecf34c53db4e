use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use thiserror::Error;

/// Fixed-date holidays observed every year when no other set is configured.
pub const DEFAULT_FIXED_HOLIDAYS: [&str; 5] = ["12-24", "12-25", "12-26", "01-01", "01-06"];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid month-day value: {0} (expected MM-DD)")]
pub struct MonthDayParseError(pub String);

/// A calendar day without a year, written `MM-DD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthDay {
    pub month: u32,
    pub day: u32,
}

impl MonthDay {
    pub fn new(month: u32, day: u32) -> Option<Self> {
        // 2024 is a leap year, so 02-29 is accepted.
        NaiveDate::from_ymd_opt(2024, month, day).map(|_| Self { month, day })
    }

    pub fn of(date: NaiveDate) -> Self {
        Self {
            month: date.month(),
            day: date.day(),
        }
    }
}

impl FromStr for MonthDay {
    type Err = MonthDayParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let invalid = || MonthDayParseError(value.to_string());
        let (month, day) = value.trim().split_once('-').ok_or_else(invalid)?;
        let month = month.parse::<u32>().map_err(|_| invalid())?;
        let day = day.parse::<u32>().map_err(|_| invalid())?;
        MonthDay::new(month, day).ok_or_else(invalid)
    }
}

impl fmt::Display for MonthDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}-{:02}", self.month, self.day)
    }
}

/// Non-working-day inputs for one analysis run. Supplied by the caller and
/// never mutated by the engine.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CalendarConfig {
    pub fixed_holidays: BTreeSet<MonthDay>,
    pub manual_extra_days: f64,
    pub vacation_matrix_days: f64,
}

impl CalendarConfig {
    /// Vacation-matrix days start at zero; they are only known once the matrix is read.
    pub fn new(fixed_holidays: BTreeSet<MonthDay>, manual_extra_days: f64) -> Self {
        Self {
            fixed_holidays,
            manual_extra_days,
            vacation_matrix_days: 0.0,
        }
    }

    pub fn is_fixed_holiday(&self, date: NaiveDate) -> bool {
        self.fixed_holidays.contains(&MonthDay::of(date))
    }

    pub fn base_extra_days(&self) -> f64 {
        self.manual_extra_days + self.vacation_matrix_days
    }
}

pub fn default_fixed_holidays() -> BTreeSet<MonthDay> {
    DEFAULT_FIXED_HOLIDAYS
        .iter()
        .filter_map(|value| value.parse().ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_day_parses_and_formats_with_leading_zeros() {
        let value: MonthDay = "1-6".parse().unwrap();
        assert_eq!(value, MonthDay { month: 1, day: 6 });
        assert_eq!(value.to_string(), "01-06");
    }

    #[test]
    fn month_day_accepts_leap_day_and_rejects_impossible_dates() {
        assert!("02-29".parse::<MonthDay>().is_ok());
        assert!("02-30".parse::<MonthDay>().is_err());
        assert!("13-01".parse::<MonthDay>().is_err());
        assert!("christmas".parse::<MonthDay>().is_err());
    }

    #[test]
    fn fixed_holidays_match_regardless_of_year() {
        let config = CalendarConfig::new(default_fixed_holidays(), 0.0);

        let test_cases = vec![
            (NaiveDate::from_ymd_opt(2024, 12, 24).unwrap(), true),
            (NaiveDate::from_ymd_opt(2031, 12, 25).unwrap(), true),
            (NaiveDate::from_ymd_opt(2025, 1, 6).unwrap(), true),
            (NaiveDate::from_ymd_opt(2025, 1, 7).unwrap(), false),
            (NaiveDate::from_ymd_opt(2025, 6, 6).unwrap(), false),
        ];

        for (date, expected) in test_cases {
            assert_eq!(
                config.is_fixed_holiday(date),
                expected,
                "Expected holiday={} on {}",
                expected,
                date
            );
        }
    }

    #[test]
    fn base_extra_days_sums_manual_and_vacation_days() {
        let config = CalendarConfig {
            fixed_holidays: BTreeSet::new(),
            manual_extra_days: 1.5,
            vacation_matrix_days: 4.0,
        };
        assert_eq!(config.base_extra_days(), 5.5);
    }
}
