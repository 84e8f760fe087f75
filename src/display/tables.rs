//! Table views
//!
//! Renders engine output as terminal tables.

use chrono::NaiveDate;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::report::{format_bar, format_percentage, truncate};
use crate::models::Money;
use crate::reports::{DashboardSummary, SpendingTrend};
use crate::services::{BudgetStatus, CategoryBreakdown, IncomeStatus, SourceTotal, SubscriptionCharge};

const NAME_WIDTH: usize = 24;

#[derive(Tabled)]
struct BudgetRow {
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Period")]
    period: String,
    #[tabled(rename = "Budgeted")]
    budgeted: String,
    #[tabled(rename = "Spent")]
    spent: String,
    #[tabled(rename = "Remaining")]
    remaining: String,
    #[tabled(rename = "Used")]
    used: String,
    #[tabled(rename = "")]
    bar: String,
}

#[derive(Tabled)]
struct CategoryRow {
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Transactions")]
    transactions: String,
    #[tabled(rename = "Subscriptions")]
    subscriptions: String,
    #[tabled(rename = "Total")]
    total: String,
    #[tabled(rename = "Share")]
    share: String,
}

#[derive(Tabled)]
struct ChargeRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Subscription")]
    name: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Paid")]
    paid: String,
}

#[derive(Tabled)]
struct LineRow {
    #[tabled(rename = "")]
    name: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

fn render<R: Tabled>(rows: Vec<R>) -> String {
    Table::new(rows).with(Style::rounded()).to_string()
}

/// Budget statuses with a progress bar per row
pub fn format_budget_table(statuses: &[BudgetStatus], symbol: &str, date_format: &str) -> String {
    if statuses.is_empty() {
        return "No active budgets.".to_string();
    }

    let rows = statuses
        .iter()
        .map(|status| BudgetRow {
            category: truncate(&status.category, NAME_WIDTH),
            period: format!(
                "{} - {}",
                status.period.start.format(date_format),
                status.period.end.format(date_format)
            ),
            budgeted: status.amount.format_with_symbol(symbol),
            spent: status.spent.format_with_symbol(symbol),
            remaining: status.remaining.format_with_symbol(symbol),
            used: if status.is_over {
                format!("{} over", format_percentage(status.percent_used))
            } else {
                format_percentage(status.percent_used)
            },
            bar: format_bar(status.percent_used, 100.0, 10),
        })
        .collect();

    render::<BudgetRow>(rows)
}

/// Category breakdown, largest first
pub fn format_category_table(rows: &[CategoryBreakdown], symbol: &str) -> String {
    if rows.is_empty() {
        return "No spending in this period.".to_string();
    }

    let rows = rows
        .iter()
        .map(|row| CategoryRow {
            category: truncate(&row.category, NAME_WIDTH),
            transactions: row.transactions.format_with_symbol(symbol),
            subscriptions: row.subscriptions.format_with_symbol(symbol),
            total: row.total.format_with_symbol(symbol),
            share: format_percentage(row.percentage),
        })
        .collect();

    render::<CategoryRow>(rows)
}

/// Subscription charges due in a window
pub fn format_charge_table(charges: &[SubscriptionCharge], symbol: &str, date_format: &str) -> String {
    if charges.is_empty() {
        return "No subscription charges due.".to_string();
    }

    let rows = charges
        .iter()
        .map(|charge| ChargeRow {
            date: charge.date.format(date_format).to_string(),
            name: truncate(&charge.name, NAME_WIDTH),
            status: charge.status.to_string(),
            amount: charge.amount.format_with_symbol(symbol),
            paid: if charge.is_paid { "yes" } else { "no" }.to_string(),
        })
        .collect();

    render::<ChargeRow>(rows)
}

/// Income, spending and the remainder
pub fn format_income_table(status: &IncomeStatus, sources: &[SourceTotal], symbol: &str) -> String {
    let mut rows: Vec<LineRow> = sources
        .iter()
        .map(|source| LineRow {
            name: truncate(&source.source, NAME_WIDTH),
            amount: source.total.format_with_symbol(symbol),
        })
        .collect();

    let line = |name: &str, amount: Money| LineRow {
        name: name.to_string(),
        amount: amount.format_with_symbol(symbol),
    };
    rows.push(line("Total income", status.total_income));
    rows.push(line("Spent", status.total_spent));
    rows.push(line("Remaining", status.remaining));
    rows.push(LineRow {
        name: "Remaining share".to_string(),
        amount: format_percentage(status.percent_remaining),
    });

    render(rows)
}

/// Full dashboard: headline figures followed by the budget and category
/// tables
pub fn format_dashboard(summary: &DashboardSummary, symbol: &str, date_format: &str) -> String {
    let headline = vec![
        LineRow {
            name: "Income".to_string(),
            amount: summary.income.total_income.format_with_symbol(symbol),
        },
        LineRow {
            name: "Transactions".to_string(),
            amount: summary.spending.transactions.format_with_symbol(symbol),
        },
        LineRow {
            name: "Subscriptions".to_string(),
            amount: summary.spending.subscriptions.format_with_symbol(symbol),
        },
        LineRow {
            name: "Remaining".to_string(),
            amount: summary.remaining.format_with_symbol(symbol),
        },
    ];

    format!(
        "{} ({} - {})\n{}\n\nBudgets\n{}\n\nCategories\n{}\n",
        summary.label,
        summary.window.start.format(date_format),
        summary.window.end.format(date_format),
        render(headline),
        format_budget_table(&summary.budgets, symbol, date_format),
        format_category_table(&summary.categories, symbol)
    )
}

#[derive(Tabled)]
struct DueRow {
    #[tabled(rename = "Subscription")]
    name: String,
    #[tabled(rename = "Next due")]
    next_due: String,
}

/// Next due date per subscription; `None` renders as a dash
pub fn format_next_due_table(entries: &[(String, Option<NaiveDate>)], date_format: &str) -> String {
    let rows: Vec<DueRow> = entries
        .iter()
        .map(|(name, next)| DueRow {
            name: truncate(name, NAME_WIDTH),
            next_due: next
                .map(|date| date.format(date_format).to_string())
                .unwrap_or_else(|| "-".to_string()),
        })
        .collect();

    render(rows)
}

/// Trend series as a table with a bar per bucket
pub fn format_trend_table(trend: &SpendingTrend, symbol: &str) -> String {
    let peak = trend
        .buckets
        .iter()
        .map(|bucket| bucket.total.cents())
        .max()
        .unwrap_or(0) as f64;

    let rows: Vec<LineRow> = trend
        .buckets
        .iter()
        .map(|bucket| LineRow {
            name: bucket.label.clone(),
            amount: format!(
                "{:>12} {}",
                bucket.total.format_with_symbol(symbol),
                format_bar(bucket.total.cents() as f64, peak, 20)
            ),
        })
        .collect();

    render(rows)
}
