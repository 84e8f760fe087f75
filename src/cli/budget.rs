//! CLI commands for budget statuses

use clap::Args;
use std::path::PathBuf;

use super::{create_output, id_matches, CommandContext};
use crate::display::format_budget_table;
use crate::error::{EngineError, EngineResult};
use crate::reports::DashboardAggregator;
use crate::services::{BudgetTotals, SpendingAggregator};

/// Arguments for `budgets`
#[derive(Args, Debug)]
pub struct BudgetArgs {
    /// Show a single budget by ID
    #[arg(long)]
    pub id: Option<String>,

    /// Include expired budgets
    #[arg(short, long)]
    pub all: bool,

    /// Export statuses to a CSV file
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Handle the budgets command
pub fn handle_budget_command(ctx: &CommandContext, args: BudgetArgs) -> EngineResult<()> {
    let aggregator = SpendingAggregator::new(ctx.resolver());
    let budgets = &ctx.snapshot.budgets;
    let transactions = &ctx.snapshot.transactions;

    if let Some(output) = args.output {
        let summary = DashboardAggregator::new(ctx.resolver()).build_summary(
            ctx.period,
            ctx.reference,
            &ctx.snapshot,
        )?;
        let mut writer = create_output(&output)?;
        crate::export::export_budgets_csv(&summary, &mut writer)?;
        println!("Budgets exported to: {}", output.display());
        return Ok(());
    }

    let statuses = match &args.id {
        Some(query) => {
            let budget = budgets
                .iter()
                .find(|b| id_matches(query, b.id.as_uuid(), &b.id.to_string()))
                .ok_or_else(|| EngineError::budget_not_found(query.clone()))?;
            vec![aggregator.compute_budget_status(budget, transactions, ctx.reference)?]
        }
        None if args.all => aggregator.compute_all(budgets, transactions, ctx.reference)?,
        None => aggregator.active_statuses(budgets, transactions, ctx.reference)?,
    };

    println!(
        "{}",
        format_budget_table(&statuses, ctx.symbol(), ctx.date_format())
    );

    if statuses.iter().any(|s| s.is_expired) {
        println!("Expired budgets show their last period.");
    }

    let totals = BudgetTotals::from_statuses(&statuses);
    if !statuses.is_empty() {
        println!(
            "Budgeted {}, spent {}, remaining {} ({} over budget)",
            totals.total_budgeted.format_with_symbol(ctx.symbol()),
            totals.total_spent.format_with_symbol(ctx.symbol()),
            totals.total_remaining.format_with_symbol(ctx.symbol()),
            totals.over_budget_count
        );
    }

    Ok(())
}
