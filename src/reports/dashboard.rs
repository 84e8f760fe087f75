//! Dashboard Summary
//!
//! Combines budget statuses, subscription totals, the category rollup and
//! income status for one reporting window.

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, info_span};

use crate::config::settings::Settings;
use crate::error::EngineResult;
use crate::models::{DateRange, LedgerSnapshot, Money, ReportingPeriod};
use crate::services::{
    BudgetStatus, BudgetTotals, CategoryBreakdown, CategoryMatcher, IncomeNetCalculator,
    IncomeStatus, PeriodResolver, SpendingAggregator, SubscriptionScheduler, SubscriptionTotals,
    SubscriptionWindow,
};

/// Spending within the window split by origin
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SpendingSplit {
    pub transactions: Money,
    pub subscriptions: Money,
    pub total: Money,
}

/// Everything the dashboard shows for one window
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub period: ReportingPeriod,
    /// Human label for the period ("This Month")
    pub label: String,
    pub reference_date: NaiveDate,
    pub window: DateRange,
    /// Statuses of budgets still in force
    pub budgets: Vec<BudgetStatus>,
    pub budget_totals: BudgetTotals,
    pub subscriptions: SubscriptionTotals,
    pub subscription_charges: SubscriptionWindow,
    pub categories: Vec<CategoryBreakdown>,
    pub income: IncomeStatus,
    pub spending: SpendingSplit,
    /// Income left after transaction and subscription spending
    pub remaining: Money,
}

impl DashboardSummary {
    /// Check if any budget in the summary is overspent
    pub fn has_overspending(&self) -> bool {
        self.budget_totals.over_budget_count > 0
    }

    /// Format the summary as plain text for terminal display
    pub fn format_terminal(&self, currency_symbol: &str) -> String {
        let money = |amount: Money| amount.format_with_symbol(currency_symbol);
        let mut output = String::new();

        output.push_str(&format!("{} ({})\n", self.label, self.window));
        output.push_str(&"=".repeat(60));
        output.push('\n');
        output.push_str(&format!("Income:        {:>14}\n", money(self.income.total_income)));
        output.push_str(&format!("Transactions:  {:>14}\n", money(self.spending.transactions)));
        output.push_str(&format!("Subscriptions: {:>14}\n", money(self.spending.subscriptions)));
        output.push_str(&format!("Remaining:     {:>14}\n", money(self.remaining)));

        if !self.budgets.is_empty() {
            output.push_str(&format!(
                "\nBudgets: {} budgeted, {} spent, {} over\n",
                money(self.budget_totals.total_budgeted),
                money(self.budget_totals.total_spent),
                self.budget_totals.over_budget_count
            ));
        }

        if !self.categories.is_empty() {
            output.push_str("\nTop categories:\n");
            for row in self.categories.iter().take(5) {
                output.push_str(&format!(
                    "  {:<24} {:>12} {:>6.1}%\n",
                    row.category,
                    money(row.total),
                    row.percentage
                ));
            }
        }

        output
    }
}

/// Builds dashboard summaries
#[derive(Debug, Clone, Copy, Default)]
pub struct DashboardAggregator {
    resolver: PeriodResolver,
}

impl DashboardAggregator {
    pub fn new(resolver: PeriodResolver) -> Self {
        Self { resolver }
    }

    /// Create an aggregator using the configured week start
    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(PeriodResolver::from_settings(settings))
    }

    /// Build the summary for a period given by name.
    ///
    /// Fails with `UnknownPeriod` if the name is not a reporting period.
    pub fn build_summary_for(
        &self,
        period: &str,
        reference: NaiveDate,
        snapshot: &LedgerSnapshot,
    ) -> EngineResult<DashboardSummary> {
        self.build_summary(period.parse()?, reference, snapshot)
    }

    /// Build the summary for the `period` window containing `reference`.
    ///
    /// Empty collections produce zeroed figures.
    pub fn build_summary(
        &self,
        period: ReportingPeriod,
        reference: NaiveDate,
        snapshot: &LedgerSnapshot,
    ) -> EngineResult<DashboardSummary> {
        let span = info_span!("build_summary", period = %period, reference = %reference);
        let _enter = span.enter();

        let window = self.resolver.reporting_window(period, reference);

        let budgets = SpendingAggregator::new(self.resolver).active_statuses(
            &snapshot.budgets,
            &snapshot.transactions,
            reference,
        )?;
        let budget_totals = BudgetTotals::from_statuses(&budgets);

        let subscriptions = SubscriptionScheduler::totals_for_window(
            &snapshot.subscriptions,
            &snapshot.payments,
            &window,
        );
        let subscription_charges = SubscriptionScheduler::window_summary(
            &snapshot.subscriptions,
            &snapshot.payments,
            &window,
        );

        let window_transactions: Vec<_> = snapshot
            .transactions
            .iter()
            .filter(|txn| txn.is_within(&window))
            .cloned()
            .collect();
        let rollup =
            CategoryMatcher::group_by_category(&window_transactions, &subscription_charges.charges);

        let income = IncomeNetCalculator::status_for_window(
            &snapshot.incomes,
            &snapshot.transactions,
            &window,
        );

        let spending = SpendingSplit {
            transactions: income.total_spent,
            subscriptions: subscription_charges.due_total,
            total: income.total_spent + subscription_charges.due_total,
        };
        let remaining = income.total_income - spending.total;

        debug!(
            window = %window,
            budgets = budgets.len(),
            categories = rollup.len(),
            charges = subscription_charges.due_count,
            "built dashboard summary"
        );

        Ok(DashboardSummary {
            period,
            label: period.label().to_string(),
            reference_date: reference,
            window,
            budgets,
            budget_totals,
            subscriptions,
            subscription_charges,
            categories: rollup.breakdown(),
            income,
            spending,
            remaining,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use crate::models::{
        BillingCycle, Budget, Income, Payment, RecurrenceRule, Subscription, SubscriptionStatus,
        Transaction, UserId,
    };

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_snapshot() -> LedgerSnapshot {
        let user = UserId::new();
        let mut snapshot = LedgerSnapshot::new(user);

        snapshot.transactions = vec![
            Transaction::new(user, Money::from_units(120), "Groceries", date(2024, 3, 4)),
            Transaction::new(user, Money::from_units(80), "Dining", date(2024, 3, 9)),
            Transaction::new(user, Money::from_units(500), "Groceries", date(2024, 2, 9)),
        ];
        snapshot.budgets = vec![
            Budget::recurring(
                user,
                "Groceries",
                Money::from_units(300),
                RecurrenceRule::monthly(1, date(2024, 1, 1)),
            ),
            Budget::recurring(
                user,
                "Dining",
                Money::from_units(50),
                RecurrenceRule::monthly(1, date(2023, 1, 1)).with_expiry(date(2023, 12, 31)),
            ),
        ];

        let music = Subscription::new(
            user,
            "Music",
            Money::from_units(10),
            BillingCycle::Monthly,
            date(2024, 1, 15),
        )
        .with_category("Entertainment");
        let gym = Subscription::new(
            user,
            "Gym",
            Money::from_units(40),
            BillingCycle::Monthly,
            date(2023, 6, 1),
        )
        .ended(SubscriptionStatus::Cancelled, date(2024, 2, 20));
        snapshot.payments = vec![Payment::new(music.id, date(2024, 3, 15), music.amount).paid()];
        snapshot.subscriptions = vec![music, gym];

        let march = DateRange::new(date(2024, 3, 1), date(2024, 3, 31)).unwrap();
        snapshot.incomes = vec![Income::new(
            user,
            Money::from_units(1000),
            "Salary",
            date(2024, 3, 1),
            march,
        )];

        snapshot
    }

    #[test]
    fn test_monthly_summary() {
        let snapshot = sample_snapshot();
        let summary = DashboardAggregator::default()
            .build_summary(ReportingPeriod::Monthly, date(2024, 3, 20), &snapshot)
            .unwrap();

        assert_eq!(summary.label, "This Month");
        assert_eq!(summary.window.start, date(2024, 3, 1));
        assert_eq!(summary.window.end, date(2024, 3, 31));

        assert_eq!(summary.budgets.len(), 1);
        assert_eq!(summary.budgets[0].spent, Money::from_units(120));
        assert_eq!(summary.budget_totals.total_remaining, Money::from_units(180));

        assert_eq!(summary.subscriptions.active_total, Money::from_units(10));
        assert_eq!(summary.subscriptions.inactive_total, Money::from_units(40));
        assert_eq!(summary.subscriptions.total_paid, Money::from_units(10));
        assert_eq!(summary.subscription_charges.due_count, 1);

        assert_eq!(summary.spending.transactions, Money::from_units(200));
        assert_eq!(summary.spending.subscriptions, Money::from_units(10));
        assert_eq!(summary.spending.total, Money::from_units(210));
        assert_eq!(summary.income.total_income, Money::from_units(1000));
        assert_eq!(summary.remaining, Money::from_units(790));
        assert!(!summary.has_overspending());
    }

    #[test]
    fn test_category_percentages_sum_to_hundred() {
        let snapshot = sample_snapshot();
        let summary = DashboardAggregator::default()
            .build_summary(ReportingPeriod::Monthly, date(2024, 3, 20), &snapshot)
            .unwrap();

        let names: Vec<&str> = summary.categories.iter().map(|c| c.category.as_str()).collect();
        assert_eq!(names, vec!["Groceries", "Dining", "Entertainment"]);

        let sum: f64 = summary.categories.iter().map(|c| c.percentage).sum();
        assert!((sum - 100.0).abs() < 1e-9);
        assert_eq!(summary.categories[2].subscriptions, Money::from_units(10));
    }

    #[test]
    fn test_empty_snapshot_is_zeroed() {
        let snapshot = LedgerSnapshot::new(UserId::new());
        let summary = DashboardAggregator::default()
            .build_summary(ReportingPeriod::Yearly, date(2024, 3, 20), &snapshot)
            .unwrap();

        assert!(summary.budgets.is_empty());
        assert!(summary.categories.is_empty());
        assert_eq!(summary.subscriptions, SubscriptionTotals::default());
        assert_eq!(summary.income, IncomeStatus::zeroed());
        assert_eq!(summary.remaining, Money::zero());
    }

    #[test]
    fn test_unknown_period_rejected() {
        let snapshot = LedgerSnapshot::new(UserId::new());
        let err = DashboardAggregator::default()
            .build_summary_for("fortnightly", date(2024, 3, 20), &snapshot)
            .unwrap_err();
        assert!(matches!(err, EngineError::UnknownPeriod(_)));

        let summary = DashboardAggregator::default()
            .build_summary_for("Weekly", date(2024, 3, 20), &snapshot)
            .unwrap();
        assert_eq!(summary.period, ReportingPeriod::Weekly);
    }

    #[test]
    fn test_format_terminal() {
        let snapshot = sample_snapshot();
        let summary = DashboardAggregator::default()
            .build_summary(ReportingPeriod::Monthly, date(2024, 3, 20), &snapshot)
            .unwrap();

        let text = summary.format_terminal("$");
        assert!(text.starts_with("This Month (2024-03-01..2024-03-31)"));
        assert!(text.contains("$790.00"));
        assert!(text.contains("Groceries"));
    }
}
