//! CSV Export functionality
//!
//! Exports the category breakdown and budget statuses of a summary.

use std::io::Write;

use crate::error::EngineResult;
use crate::reports::DashboardSummary;

/// Export the category breakdown to CSV
pub fn export_categories_csv<W: Write>(summary: &DashboardSummary, writer: W) -> EngineResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record([
        "Start Date",
        "End Date",
        "Category",
        "Transactions",
        "Subscriptions",
        "Total",
        "Percentage",
    ])?;

    for row in &summary.categories {
        csv_writer.write_record([
            summary.window.start.to_string(),
            summary.window.end.to_string(),
            row.category.clone(),
            row.transactions.to_decimal_string(),
            row.subscriptions.to_decimal_string(),
            row.total.to_decimal_string(),
            format!("{:.2}", row.percentage),
        ])?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Export budget statuses to CSV
pub fn export_budgets_csv<W: Write>(summary: &DashboardSummary, writer: W) -> EngineResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record([
        "Category",
        "Period Start",
        "Period End",
        "Budgeted",
        "Spent",
        "Remaining",
        "Percent Used",
        "Over",
    ])?;

    for status in &summary.budgets {
        csv_writer.write_record([
            status.category.clone(),
            status.period.start.to_string(),
            status.period.end.to_string(),
            status.amount.to_decimal_string(),
            status.spent.to_decimal_string(),
            status.remaining.to_decimal_string(),
            format!("{:.2}", status.percent_used),
            status.is_over.to_string(),
        ])?;
    }

    csv_writer.flush()?;
    Ok(())
}
