//! Budget model
//!
//! A spending cap for one category, either over an explicit date range or
//! over a period that resets on a recurrence rule.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::CategoryKey;
use super::ids::{BudgetId, UserId};
use super::money::Money;
use super::period::{DateRange, Recurrence};

/// Validation errors for budgets
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BudgetValidationError {
    NonPositiveAmount,
    InvertedPeriod,
    InvalidResetDay(u32),
}

impl fmt::Display for BudgetValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveAmount => write!(f, "Budget amount must be greater than zero"),
            Self::InvertedPeriod => write!(f, "Budget period ends before it starts"),
            Self::InvalidResetDay(day) => {
                write!(f, "Reset day must be between 1 and 31, got {}", day)
            }
        }
    }
}

impl std::error::Error for BudgetValidationError {}

/// The policy for computing a recurring budget's active period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurrenceRule {
    pub recurrence: Recurrence,

    /// Day of month a monthly period starts on (1-31, clamped to month length)
    #[serde(default)]
    pub reset_day: Option<u32>,

    /// Original start date; yearly periods reset on its month/day
    pub anchor: NaiveDate,

    /// Last date the rule is in force
    #[serde(default)]
    pub expires_at: Option<NaiveDate>,
}

impl RecurrenceRule {
    pub fn new(recurrence: Recurrence, anchor: NaiveDate) -> Self {
        Self {
            recurrence,
            reset_day: None,
            anchor,
            expires_at: None,
        }
    }

    /// Monthly rule resetting on `reset_day`
    pub fn monthly(reset_day: u32, anchor: NaiveDate) -> Self {
        Self {
            reset_day: Some(reset_day),
            ..Self::new(Recurrence::Monthly, anchor)
        }
    }

    pub fn with_expiry(mut self, expires_at: NaiveDate) -> Self {
        self.expires_at = Some(expires_at);
        self
    }

    /// Effective reset day, falling back to the anchor's day of month
    pub fn effective_reset_day(&self) -> u32 {
        self.reset_day.unwrap_or_else(|| self.anchor.day())
    }
}

/// How a budget's period is determined
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum BudgetSchedule {
    /// Explicit stored dates
    Fixed(DateRange),
    /// Resets on a recurrence rule
    Recurring(RecurrenceRule),
}

impl BudgetSchedule {
    pub fn is_recurring(&self) -> bool {
        matches!(self, Self::Recurring(_))
    }
}

/// A category spending cap
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Budget {
    /// Unique identifier
    pub id: BudgetId,

    /// Owning user
    pub user_id: UserId,

    /// Category label matched against transactions
    pub category: String,

    /// The cap for one period
    pub amount: Money,

    pub schedule: BudgetSchedule,
}

impl Budget {
    /// Create a budget over explicit dates
    pub fn fixed(
        user_id: UserId,
        category: impl Into<String>,
        amount: Money,
        period: DateRange,
    ) -> Self {
        Self {
            id: BudgetId::new(),
            user_id,
            category: category.into(),
            amount,
            schedule: BudgetSchedule::Fixed(period),
        }
    }

    /// Create a recurring budget
    pub fn recurring(
        user_id: UserId,
        category: impl Into<String>,
        amount: Money,
        rule: RecurrenceRule,
    ) -> Self {
        Self {
            id: BudgetId::new(),
            user_id,
            category: category.into(),
            amount,
            schedule: BudgetSchedule::Recurring(rule),
        }
    }

    /// Normalized category key
    pub fn category_key(&self) -> CategoryKey {
        CategoryKey::from_label(&self.category)
    }

    /// Validate the budget
    pub fn validate(&self) -> Result<(), BudgetValidationError> {
        if !self.amount.is_positive() {
            return Err(BudgetValidationError::NonPositiveAmount);
        }

        match &self.schedule {
            BudgetSchedule::Fixed(range) if range.end < range.start => {
                Err(BudgetValidationError::InvertedPeriod)
            }
            BudgetSchedule::Recurring(RecurrenceRule {
                reset_day: Some(day),
                ..
            }) if !(1..=31).contains(day) => Err(BudgetValidationError::InvalidResetDay(*day)),
            _ => Ok(()),
        }
    }
}

impl fmt::Display for Budget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.schedule {
            BudgetSchedule::Fixed(range) => write!(f, "{} {} ({})", self.category, self.amount, range),
            BudgetSchedule::Recurring(rule) => {
                write!(f, "{} {} ({})", self.category, self.amount, rule.recurrence)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_validation_amount() {
        let rule = RecurrenceRule::monthly(1, date(2024, 1, 1));
        let budget = Budget::recurring(UserId::new(), "Food", Money::zero(), rule);
        assert_eq!(budget.validate(), Err(BudgetValidationError::NonPositiveAmount));
    }

    #[test]
    fn test_validation_reset_day() {
        let rule = RecurrenceRule::monthly(32, date(2024, 1, 1));
        let budget = Budget::recurring(UserId::new(), "Food", Money::from_units(10), rule);
        assert_eq!(budget.validate(), Err(BudgetValidationError::InvalidResetDay(32)));
    }

    #[test]
    fn test_validation_inverted_period() {
        let range = DateRange {
            start: date(2024, 3, 31),
            end: date(2024, 3, 1),
        };
        let budget = Budget::fixed(UserId::new(), "Food", Money::from_units(10), range);
        assert_eq!(budget.validate(), Err(BudgetValidationError::InvertedPeriod));
    }

    #[test]
    fn test_effective_reset_day_defaults_to_anchor() {
        let rule = RecurrenceRule::new(Recurrence::Monthly, date(2024, 1, 15));
        assert_eq!(rule.effective_reset_day(), 15);
        assert_eq!(RecurrenceRule::monthly(31, date(2024, 1, 15)).effective_reset_day(), 31);
    }

    #[test]
    fn test_schedule_serialization_shape() {
        let json = r#"{"type":"recurring","recurrence":"monthly","reset_day":1,"anchor":"2024-01-01"}"#;
        let schedule: BudgetSchedule = serde_json::from_str(json).unwrap();
        assert!(schedule.is_recurring());

        let json = r#"{"type":"fixed","start":"2024-03-01","end":"2024-03-31"}"#;
        let schedule: BudgetSchedule = serde_json::from_str(json).unwrap();
        assert_eq!(
            schedule,
            BudgetSchedule::Fixed(DateRange {
                start: date(2024, 3, 1),
                end: date(2024, 3, 31)
            })
        );
    }
}
