//! Income model
//!
//! An income deposit together with the span of time it is meant to cover,
//! which may differ from the date it was received.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::ids::{IncomeId, UserId};
use super::money::Money;
use super::period::DateRange;

/// Validation errors for income records
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IncomeValidationError {
    NegativeAmount,
    InvertedPeriod,
}

impl std::fmt::Display for IncomeValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NegativeAmount => write!(f, "Income amount cannot be negative"),
            Self::InvertedPeriod => write!(f, "End date must be after start date"),
        }
    }
}

impl std::error::Error for IncomeValidationError {}

/// An income deposit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Income {
    pub id: IncomeId,
    pub user_id: UserId,
    pub amount: Money,
    #[serde(default)]
    pub source: String,
    pub date_received: NaiveDate,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
}

impl Income {
    /// Create a new income record covering `period`
    pub fn new(
        user_id: UserId,
        amount: Money,
        source: impl Into<String>,
        date_received: NaiveDate,
        period: DateRange,
    ) -> Self {
        Self {
            id: IncomeId::new(),
            user_id,
            amount,
            source: source.into(),
            date_received,
            period_start: period.start,
            period_end: period.end,
        }
    }

    /// The span this income covers
    pub fn period(&self) -> DateRange {
        DateRange {
            start: self.period_start,
            end: self.period_end,
        }
    }

    /// Check if the covered span overlaps a window
    pub fn overlaps(&self, window: &DateRange) -> bool {
        self.period().overlaps(window)
    }

    /// Validate the income record
    pub fn validate(&self) -> Result<(), IncomeValidationError> {
        if self.amount.is_negative() {
            return Err(IncomeValidationError::NegativeAmount);
        }
        if self.period_end < self.period_start {
            return Err(IncomeValidationError::InvertedPeriod);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_overlap_is_not_containment() {
        let span = DateRange::new(date(2024, 2, 15), date(2024, 3, 14)).unwrap();
        let income = Income::new(UserId::new(), Money::from_units(2000), "Salary", date(2024, 2, 15), span);

        let february = DateRange::new(date(2024, 2, 1), date(2024, 2, 29)).unwrap();
        let march = DateRange::new(date(2024, 3, 1), date(2024, 3, 31)).unwrap();
        let april = DateRange::new(date(2024, 4, 1), date(2024, 4, 30)).unwrap();

        assert!(income.overlaps(&february));
        assert!(income.overlaps(&march));
        assert!(!income.overlaps(&april));
    }

    #[test]
    fn test_validation() {
        let span = DateRange::single_day(date(2024, 3, 1));
        let mut income = Income::new(UserId::new(), Money::from_cents(-1), "Refund", date(2024, 3, 1), span);
        assert_eq!(income.validate(), Err(IncomeValidationError::NegativeAmount));

        income.amount = Money::from_units(10);
        income.period_end = date(2024, 2, 1);
        assert_eq!(income.validate(), Err(IncomeValidationError::InvertedPeriod));
    }
}
