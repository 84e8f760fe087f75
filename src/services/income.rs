//! Income net calculation
//!
//! Matches income records to a window by overlap of their covered span and
//! nets them against spending in the same window.

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::error::EngineResult;
use crate::models::{DateRange, Income, IncomeId, Money, Transaction};

/// Label for income recorded without a source
pub const UNSPECIFIED_SOURCE: &str = "Other";

/// Income against spending over one window
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IncomeStatus {
    pub total_income: Money,
    pub total_spent: Money,
    pub remaining: Money,
    pub percent_remaining: f64,
    pub is_negative: bool,
}

impl IncomeStatus {
    /// Status with every figure at zero
    pub fn zeroed() -> Self {
        Self::from_totals(Money::zero(), Money::zero())
    }

    fn from_totals(total_income: Money, total_spent: Money) -> Self {
        let remaining = total_income - total_spent;
        Self {
            total_income,
            total_spent,
            remaining,
            percent_remaining: remaining.percent_of(total_income),
            is_negative: remaining.is_negative(),
        }
    }
}

/// Income received from one source
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceTotal {
    pub source: String,
    pub total: Money,
    pub count: usize,
}

/// Breakdown of a single income record over the span it covers
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IncomeDetail {
    pub income_id: IncomeId,
    pub source: String,
    pub amount: Money,
    pub period: DateRange,
    pub period_days: i64,
    /// Amount spread evenly over the covered days
    pub daily_rate: Money,
    pub spent_in_period: Money,
    pub remaining_in_period: Money,
}

/// Computes income against spending
pub struct IncomeNetCalculator;

impl IncomeNetCalculator {
    /// Net the incomes overlapping `[start, end]` against every transaction
    /// dated inside it
    pub fn compute_income_status(
        incomes: &[Income],
        transactions: &[Transaction],
        start: NaiveDate,
        end: NaiveDate,
    ) -> EngineResult<IncomeStatus> {
        let window = DateRange::new(start, end)?;
        Ok(Self::status_for_window(incomes, transactions, &window))
    }

    /// Same as [`Self::compute_income_status`] over an already validated
    /// window
    pub fn status_for_window(
        incomes: &[Income],
        transactions: &[Transaction],
        window: &DateRange,
    ) -> IncomeStatus {
        let total_income = Self::total_income(incomes, window);
        let total_spent = spent_within(transactions, window);
        IncomeStatus::from_totals(total_income, total_spent)
    }

    /// Sum of incomes whose covered span overlaps `window`
    pub fn total_income(incomes: &[Income], window: &DateRange) -> Money {
        incomes
            .iter()
            .filter(|income| income.overlaps(window))
            .map(|income| income.amount)
            .sum()
    }

    /// Overlapping income grouped by source, largest first
    pub fn income_by_source(incomes: &[Income], window: &DateRange) -> Vec<SourceTotal> {
        let mut by_source: BTreeMap<String, SourceTotal> = BTreeMap::new();

        for income in incomes.iter().filter(|income| income.overlaps(window)) {
            let source = match income.source.trim() {
                "" => UNSPECIFIED_SOURCE.to_string(),
                trimmed => trimmed.to_string(),
            };
            let entry = by_source.entry(source.clone()).or_insert(SourceTotal {
                source,
                total: Money::zero(),
                count: 0,
            });
            entry.total += income.amount;
            entry.count += 1;
        }

        let mut totals: Vec<SourceTotal> = by_source.into_values().collect();
        totals.sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.source.cmp(&b.source)));
        totals
    }

    /// Detail for one income record over its own covered span
    pub fn income_detail(income: &Income, transactions: &[Transaction]) -> IncomeDetail {
        let period = income.period();
        let period_days = period.num_days();
        let spent_in_period = spent_within(transactions, &period);

        IncomeDetail {
            income_id: income.id,
            source: income.source.clone(),
            amount: income.amount,
            period,
            period_days,
            daily_rate: income.amount.divide_rounded(period_days),
            spent_in_period,
            remaining_in_period: income.amount - spent_in_period,
        }
    }
}

fn spent_within(transactions: &[Transaction], window: &DateRange) -> Money {
    transactions
        .iter()
        .filter(|txn| txn.is_within(window))
        .map(Transaction::spend)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use crate::models::UserId;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn range(start: NaiveDate, end: NaiveDate) -> DateRange {
        DateRange::new(start, end).unwrap()
    }

    fn salary(user: UserId, units: i64, start: NaiveDate, end: NaiveDate) -> Income {
        Income::new(user, Money::from_units(units), "Salary", start, range(start, end))
    }

    #[test]
    fn test_overspent_income() {
        let user = UserId::new();
        let incomes = vec![salary(user, 2000, date(2024, 3, 1), date(2024, 3, 31))];
        let transactions = vec![
            Transaction::new(user, Money::from_units(1500), "Rent", date(2024, 3, 1)),
            Transaction::new(user, Money::from_units(700), "Food", date(2024, 3, 18)),
            Transaction::new(user, Money::from_units(900), "Food", date(2024, 4, 1)),
        ];

        let status = IncomeNetCalculator::compute_income_status(
            &incomes,
            &transactions,
            date(2024, 3, 1),
            date(2024, 3, 31),
        )
        .unwrap();

        assert_eq!(status.total_income, Money::from_units(2000));
        assert_eq!(status.total_spent, Money::from_units(2200));
        assert_eq!(status.remaining, Money::from_units(-200));
        assert!(status.is_negative);
        assert_eq!(status.percent_remaining, -10.0);
    }

    #[test]
    fn test_overlapping_income_counts_in_both_windows() {
        let user = UserId::new();
        let incomes = vec![salary(user, 3000, date(2024, 3, 15), date(2024, 4, 14))];

        let march = IncomeNetCalculator::compute_income_status(
            &incomes,
            &[],
            date(2024, 3, 1),
            date(2024, 3, 31),
        )
        .unwrap();
        let april = IncomeNetCalculator::compute_income_status(
            &incomes,
            &[],
            date(2024, 4, 1),
            date(2024, 4, 30),
        )
        .unwrap();
        let may = IncomeNetCalculator::compute_income_status(
            &incomes,
            &[],
            date(2024, 5, 1),
            date(2024, 5, 31),
        )
        .unwrap();

        assert_eq!(march.total_income, Money::from_units(3000));
        assert_eq!(april.total_income, Money::from_units(3000));
        assert_eq!(may.total_income, Money::zero());
        assert_eq!(march.percent_remaining, 100.0);
    }

    #[test]
    fn test_no_income_means_zero_percent() {
        let user = UserId::new();
        let transactions = vec![Transaction::new(
            user,
            Money::from_units(10),
            "Food",
            date(2024, 3, 3),
        )];
        let status = IncomeNetCalculator::compute_income_status(
            &[],
            &transactions,
            date(2024, 3, 1),
            date(2024, 3, 31),
        )
        .unwrap();
        assert_eq!(status.percent_remaining, 0.0);
        assert!(status.is_negative);
    }

    #[test]
    fn test_inverted_window_rejected() {
        let err = IncomeNetCalculator::compute_income_status(
            &[],
            &[],
            date(2024, 3, 31),
            date(2024, 3, 1),
        )
        .unwrap_err();
        assert!(matches!(err, EngineError::InvalidPeriod(_)));
    }

    #[test]
    fn test_income_by_source() {
        let user = UserId::new();
        let march = range(date(2024, 3, 1), date(2024, 3, 31));
        let incomes = vec![
            salary(user, 2000, date(2024, 3, 1), date(2024, 3, 31)),
            Income::new(user, Money::from_units(300), " Freelance", date(2024, 3, 9), march),
            Income::new(user, Money::from_units(200), "Freelance", date(2024, 3, 20), march),
            Income::new(user, Money::from_units(50), "", date(2024, 3, 2), march),
        ];

        let sources = IncomeNetCalculator::income_by_source(&incomes, &march);
        assert_eq!(sources.len(), 3);
        assert_eq!(sources[0].source, "Salary");
        assert_eq!(sources[1].source, "Freelance");
        assert_eq!(sources[1].total, Money::from_units(500));
        assert_eq!(sources[1].count, 2);
        assert_eq!(sources[2].source, UNSPECIFIED_SOURCE);
    }

    #[test]
    fn test_income_detail() {
        let user = UserId::new();
        let income = salary(user, 3000, date(2024, 4, 1), date(2024, 4, 30));
        let transactions = vec![
            Transaction::new(user, Money::from_units(1000), "Rent", date(2024, 4, 2)),
            Transaction::new(user, Money::from_units(99), "Food", date(2024, 5, 2)),
        ];

        let detail = IncomeNetCalculator::income_detail(&income, &transactions);
        assert_eq!(detail.period_days, 30);
        assert_eq!(detail.daily_rate, Money::from_units(100));
        assert_eq!(detail.spent_in_period, Money::from_units(1000));
        assert_eq!(detail.remaining_in_period, Money::from_units(2000));
    }
}
