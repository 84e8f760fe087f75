//! CLI commands for the dashboard summary and spending trend

use clap::{Args, ValueEnum};
use std::io::Write;
use std::path::PathBuf;

use super::{create_output, CommandContext};
use crate::display::{format_dashboard, format_trend_table};
use crate::error::EngineResult;
use crate::export::{export_categories_csv, export_summary_json, export_summary_yaml};
use crate::reports::{DashboardAggregator, SpendingTrend};

/// Output format for the summary
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SummaryFormat {
    /// Terminal tables
    #[default]
    Table,
    /// Plain text
    Text,
    Json,
    Yaml,
    /// Category breakdown as CSV
    Csv,
}

/// Arguments for `summary`
#[derive(Args, Debug)]
pub struct SummaryArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value_t = SummaryFormat::Table)]
    pub format: SummaryFormat,

    /// Write to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for `trend`
#[derive(Args, Debug)]
pub struct TrendArgs {
    /// Export the series to a CSV file
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Handle the summary command
pub fn handle_summary_command(ctx: &CommandContext, args: SummaryArgs) -> EngineResult<()> {
    let summary = DashboardAggregator::new(ctx.resolver()).build_summary(
        ctx.period,
        ctx.reference,
        &ctx.snapshot,
    )?;

    let mut buffer = Vec::new();
    match args.format {
        SummaryFormat::Table => {
            writeln!(buffer, "{}", format_dashboard(&summary, ctx.symbol(), ctx.date_format()))?
        }
        SummaryFormat::Text => write!(buffer, "{}", summary.format_terminal(ctx.symbol()))?,
        SummaryFormat::Json => export_summary_json(&summary, &mut buffer)?,
        SummaryFormat::Yaml => export_summary_yaml(&summary, &mut buffer)?,
        SummaryFormat::Csv => export_categories_csv(&summary, &mut buffer)?,
    }

    match args.output {
        Some(path) => {
            let mut writer = create_output(&path)?;
            writer.write_all(&buffer)?;
            writer.flush()?;
            println!("Summary exported to: {}", path.display());
        }
        None => std::io::stdout().write_all(&buffer)?,
    }

    if summary.has_overspending() {
        tracing::info!(
            over = summary.budget_totals.over_budget_count,
            "budgets over their limit"
        );
    }

    Ok(())
}

/// Handle the trend command
pub fn handle_trend_command(ctx: &CommandContext, args: TrendArgs) -> EngineResult<()> {
    let trend = SpendingTrend::generate(
        &ctx.resolver(),
        ctx.period,
        ctx.reference,
        &ctx.snapshot.transactions,
    );

    match args.output {
        Some(path) => {
            let mut writer = create_output(&path)?;
            trend.export_csv(&mut writer)?;
            println!("Trend exported to: {}", path.display());
        }
        None => {
            println!("Spending Trend: {} ({})", trend.period.label(), trend.window);
            println!("{}", format_trend_table(&trend, ctx.symbol()));
            println!("Total: {}", trend.total.format_with_symbol(ctx.symbol()));
        }
    }

    Ok(())
}
