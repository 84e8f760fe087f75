//! Spending aggregation
//!
//! Computes how much of a budget has been spent in its active period.

use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use super::category::CategoryMatcher;
use super::period::PeriodResolver;
use crate::error::EngineResult;
use crate::models::{Budget, BudgetId, DateRange, Money, Transaction};

/// Spending against one budget in its resolved period
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetStatus {
    pub budget_id: BudgetId,
    pub category: String,
    pub amount: Money,
    /// Period the figures were aggregated over
    pub period: DateRange,
    pub spent: Money,
    /// `amount - spent`, negative when overspent
    pub remaining: Money,
    pub percent_used: f64,
    pub is_over: bool,
    /// The budget's recurrence ended before the reference date
    pub is_expired: bool,
}

/// Totals across several budget statuses
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BudgetTotals {
    pub total_budgeted: Money,
    pub total_spent: Money,
    pub total_remaining: Money,
    pub over_budget_count: usize,
}

impl BudgetTotals {
    pub fn from_statuses(statuses: &[BudgetStatus]) -> Self {
        let mut totals = Self::default();
        for status in statuses {
            totals.total_budgeted += status.amount;
            totals.total_spent += status.spent;
            totals.total_remaining += status.remaining;
            if status.is_over {
                totals.over_budget_count += 1;
            }
        }
        totals
    }
}

/// Aggregates transactions against budgets
#[derive(Debug, Clone, Copy, Default)]
pub struct SpendingAggregator {
    resolver: PeriodResolver,
}

impl SpendingAggregator {
    /// Create an aggregator resolving periods with `resolver`
    pub fn new(resolver: PeriodResolver) -> Self {
        Self { resolver }
    }

    pub fn resolver(&self) -> &PeriodResolver {
        &self.resolver
    }

    /// Compute the status of `budget` at `reference`.
    ///
    /// An expired recurring budget reports the spending of its last valid
    /// period and is never flagged as over.
    pub fn compute_budget_status(
        &self,
        budget: &Budget,
        transactions: &[Transaction],
        reference: NaiveDate,
    ) -> EngineResult<BudgetStatus> {
        let resolution = self.resolver.resolve(&budget.schedule, reference)?;
        let period = resolution.range();
        let key = budget.category_key();

        let spent: Money = CategoryMatcher::matching(transactions, &key)
            .filter(|txn| txn.is_within(&period))
            .map(Transaction::spend)
            .sum();

        let is_expired = resolution.is_expired();
        let status = BudgetStatus {
            budget_id: budget.id,
            category: budget.category.trim().to_string(),
            amount: budget.amount,
            period,
            spent,
            remaining: budget.amount - spent,
            percent_used: spent.percent_of(budget.amount),
            is_over: !is_expired && spent > budget.amount,
            is_expired,
        };

        debug!(
            budget = %budget.id,
            period = %period,
            spent = %spent,
            expired = is_expired,
            "computed budget status"
        );

        Ok(status)
    }

    /// Statuses for every budget, in input order
    pub fn compute_all(
        &self,
        budgets: &[Budget],
        transactions: &[Transaction],
        reference: NaiveDate,
    ) -> EngineResult<Vec<BudgetStatus>> {
        budgets
            .iter()
            .map(|budget| self.compute_budget_status(budget, transactions, reference))
            .collect()
    }

    /// Statuses of budgets still in force at `reference`
    pub fn active_statuses(
        &self,
        budgets: &[Budget],
        transactions: &[Transaction],
        reference: NaiveDate,
    ) -> EngineResult<Vec<BudgetStatus>> {
        let mut statuses = self.compute_all(budgets, transactions, reference)?;
        statuses.retain(|status| !status.is_expired);
        Ok(statuses)
    }
}
