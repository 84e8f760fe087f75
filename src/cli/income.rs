//! CLI commands for income

use clap::Args;

use super::{id_matches, CommandContext};
use crate::display::format_income_table;
use crate::error::{EngineError, EngineResult};
use crate::services::IncomeNetCalculator;

/// Arguments for `income`
#[derive(Args, Debug)]
pub struct IncomeArgs {
    /// Show the detail of one income record by ID
    #[arg(long)]
    pub detail: Option<String>,
}

/// Handle the income command
pub fn handle_income_command(ctx: &CommandContext, args: IncomeArgs) -> EngineResult<()> {
    let incomes = &ctx.snapshot.incomes;
    let transactions = &ctx.snapshot.transactions;
    let symbol = ctx.symbol();

    if let Some(query) = args.detail {
        let income = incomes
            .iter()
            .find(|i| id_matches(&query, i.id.as_uuid(), &i.id.to_string()))
            .ok_or_else(|| EngineError::income_not_found(query.clone()))?;
        let detail = IncomeNetCalculator::income_detail(income, transactions);

        println!("Income {} ({})", detail.income_id, detail.source);
        println!("  Covers:    {} ({} days)", detail.period, detail.period_days);
        println!("  Amount:    {}", detail.amount.format_with_symbol(symbol));
        println!("  Per day:   {}", detail.daily_rate.format_with_symbol(symbol));
        println!("  Spent:     {}", detail.spent_in_period.format_with_symbol(symbol));
        println!("  Remaining: {}", detail.remaining_in_period.format_with_symbol(symbol));
        return Ok(());
    }

    let window = ctx.resolver().reporting_window(ctx.period, ctx.reference);
    let status = IncomeNetCalculator::status_for_window(incomes, transactions, &window);
    let sources = IncomeNetCalculator::income_by_source(incomes, &window);

    println!("Income: {} ({})", ctx.period.label(), window);
    println!("{}", format_income_table(&status, &sources, symbol));
    if status.is_negative {
        println!("Spending exceeds income for this period.");
    }

    Ok(())
}
