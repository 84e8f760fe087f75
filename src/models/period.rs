//! Period representation
//!
//! A period is a closed date range. Recurring obligations describe their
//! periods with a [`Recurrence`]; dashboards pick a granularity with a
//! [`ReportingPeriod`].

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::EngineError;

/// A closed date range `[start, end]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Create a range, rejecting one whose end precedes its start
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, EngineError> {
        if end < start {
            return Err(EngineError::InvalidPeriod(format!(
                "end {} is before start {}",
                end, start
            )));
        }
        Ok(Self { start, end })
    }

    /// A single-day range
    pub fn single_day(date: NaiveDate) -> Self {
        Self {
            start: date,
            end: date,
        }
    }

    /// Check if a date falls within this range (inclusive)
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Check if two ranges share at least one day
    pub fn overlaps(&self, other: &DateRange) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    /// Number of days covered, counting both ends
    pub fn num_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// Iterate every date in the range
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end;
        self.start.iter_days().take_while(move |d| *d <= end)
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}..{}",
            self.start.format("%Y-%m-%d"),
            self.end.format("%Y-%m-%d")
        )
    }
}

impl Ord for DateRange {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.start
            .cmp(&other.start)
            .then_with(|| self.end.cmp(&other.end))
    }
}

impl PartialOrd for DateRange {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// How often a recurring budget resets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Recurrence {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl Recurrence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
        }
    }
}

impl fmt::Display for Recurrence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Recurrence {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            "yearly" => Ok(Self::Yearly),
            _ => Err(EngineError::InvalidPeriod(format!(
                "unrecognized recurrence '{}'",
                s
            ))),
        }
    }
}

/// Reporting granularity selected by a dashboard request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum ReportingPeriod {
    Daily,
    Weekly,
    #[default]
    Monthly,
    Yearly,
}

impl ReportingPeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
        }
    }

    /// Human-readable label for dashboard headings
    pub fn label(&self) -> &'static str {
        match self {
            Self::Daily => "Today",
            Self::Weekly => "This Week",
            Self::Monthly => "This Month",
            Self::Yearly => "This Year",
        }
    }

    /// The recurrence used to resolve this reporting window
    pub fn recurrence(&self) -> Recurrence {
        match self {
            Self::Daily => Recurrence::Daily,
            Self::Weekly => Recurrence::Weekly,
            Self::Monthly => Recurrence::Monthly,
            Self::Yearly => Recurrence::Yearly,
        }
    }
}

impl fmt::Display for ReportingPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportingPeriod {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            "yearly" => Ok(Self::Yearly),
            _ => Err(EngineError::UnknownPeriod(s.to_string())),
        }
    }
}

impl TryFrom<String> for ReportingPeriod {
    type Error = EngineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Number of days in the given month
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first| first.pred_opt())
        .map(|last| last.day())
        .unwrap_or(28)
}

/// Build a date, clamping `day` to the length of the month.
///
/// `day = 31` in February yields the 28th (or 29th in leap years).
pub fn clamped_date(year: i32, month: u32, day: u32) -> NaiveDate {
    let day = day.clamp(1, days_in_month(year, month));
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(NaiveDate::MIN)
}

/// Shift a (year, month) pair by a signed number of months
pub fn shift_month(year: i32, month: u32, months: i32) -> (i32, u32) {
    let index = year * 12 + month as i32 - 1 + months;
    (index.div_euclid(12), index.rem_euclid(12) as u32 + 1)
}

/// The day before `date`
pub(crate) fn day_before(date: NaiveDate) -> NaiveDate {
    date - Duration::days(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_range_rejects_inverted_bounds() {
        let err = DateRange::new(date(2024, 3, 10), date(2024, 3, 1)).unwrap_err();
        assert!(matches!(err, EngineError::InvalidPeriod(_)));
        assert!(DateRange::new(date(2024, 3, 1), date(2024, 3, 1)).is_ok());
    }

    #[test]
    fn test_contains_and_overlaps() {
        let march = DateRange::new(date(2024, 3, 1), date(2024, 3, 31)).unwrap();
        assert!(march.contains(date(2024, 3, 1)));
        assert!(march.contains(date(2024, 3, 31)));
        assert!(!march.contains(date(2024, 4, 1)));

        let straddle = DateRange::new(date(2024, 2, 15), date(2024, 3, 14)).unwrap();
        let april = DateRange::new(date(2024, 4, 1), date(2024, 4, 30)).unwrap();
        assert!(march.overlaps(&straddle));
        assert!(!march.overlaps(&april));
    }

    #[test]
    fn test_num_days_and_iteration() {
        let range = DateRange::new(date(2024, 2, 27), date(2024, 3, 1)).unwrap();
        assert_eq!(range.num_days(), 4);
        assert_eq!(range.days().count(), 4);
        assert_eq!(range.to_string(), "2024-02-27..2024-03-01");
    }

    #[test]
    fn test_clamped_date() {
        assert_eq!(clamped_date(2023, 2, 31), date(2023, 2, 28));
        assert_eq!(clamped_date(2024, 2, 31), date(2024, 2, 29));
        assert_eq!(clamped_date(2024, 4, 31), date(2024, 4, 30));
        assert_eq!(clamped_date(2024, 1, 15), date(2024, 1, 15));
    }

    #[test]
    fn test_shift_month() {
        assert_eq!(shift_month(2024, 1, -1), (2023, 12));
        assert_eq!(shift_month(2024, 12, 1), (2025, 1));
        assert_eq!(shift_month(2024, 3, 14), (2025, 5));
    }

    #[test]
    fn test_reporting_period_parse() {
        assert_eq!("Weekly".parse::<ReportingPeriod>().unwrap(), ReportingPeriod::Weekly);
        assert_eq!(" yearly ".parse::<ReportingPeriod>().unwrap(), ReportingPeriod::Yearly);
        let err = "hourly".parse::<ReportingPeriod>().unwrap_err();
        assert!(matches!(err, EngineError::UnknownPeriod(_)));
    }

    #[test]
    fn test_reporting_period_serde() {
        let period: ReportingPeriod = serde_json::from_str("\"daily\"").unwrap();
        assert_eq!(period, ReportingPeriod::Daily);
        assert_eq!(serde_json::to_string(&period).unwrap(), "\"daily\"");
        assert!(serde_json::from_str::<ReportingPeriod>("\"total\"").is_err());
    }

    #[test]
    fn test_recurrence_parse() {
        assert_eq!("MONTHLY".parse::<Recurrence>().unwrap(), Recurrence::Monthly);
        assert!(matches!(
            "biweekly".parse::<Recurrence>(),
            Err(EngineError::InvalidPeriod(_))
        ));
    }
}
