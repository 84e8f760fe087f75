//! CLI commands for subscriptions

use clap::Args;

use super::{id_matches, CommandContext};
use crate::display::{format_charge_table, format_next_due_table};
use crate::error::{EngineError, EngineResult};
use crate::services::SubscriptionScheduler;

/// Arguments for `subscriptions`
#[derive(Args, Debug)]
pub struct SubscriptionArgs {
    /// Limit output to one subscription by ID
    #[arg(long)]
    pub id: Option<String>,

    /// List the next due date of each subscription instead of the window's
    /// charges
    #[arg(long)]
    pub next: bool,
}

/// Handle the subscriptions command
pub fn handle_subscription_command(ctx: &CommandContext, args: SubscriptionArgs) -> EngineResult<()> {
    let all = &ctx.snapshot.subscriptions;
    let selected = match &args.id {
        Some(query) => {
            let sub = all
                .iter()
                .find(|s| id_matches(query, s.id.as_uuid(), &s.id.to_string()))
                .ok_or_else(|| EngineError::subscription_not_found(query.clone()))?;
            vec![sub.clone()]
        }
        None => all.clone(),
    };

    if args.next {
        let entries: Vec<_> = selected
            .iter()
            .map(|sub| (sub.name.clone(), SubscriptionScheduler::next_due(sub, ctx.reference)))
            .collect();
        println!("{}", format_next_due_table(&entries, ctx.date_format()));
        return Ok(());
    }

    let window = ctx.resolver().reporting_window(ctx.period, ctx.reference);
    let summary = SubscriptionScheduler::window_summary(&selected, &ctx.snapshot.payments, &window);
    let totals =
        SubscriptionScheduler::totals_for_window(&selected, &ctx.snapshot.payments, &window);
    let symbol = ctx.symbol();

    println!("Subscriptions: {} ({})", ctx.period.label(), window);
    println!(
        "{}",
        format_charge_table(&summary.charges, symbol, ctx.date_format())
    );
    println!(
        "Due {} ({} charges), paid {}, unpaid {}",
        summary.due_total.format_with_symbol(symbol),
        summary.due_count,
        summary.paid_total.format_with_symbol(symbol),
        summary.unpaid_total.format_with_symbol(symbol)
    );
    println!(
        "Active: {} ({}), inactive: {} ({}), monthly cost {}, total paid {}",
        totals.active_total.format_with_symbol(symbol),
        totals.active_count,
        totals.inactive_total.format_with_symbol(symbol),
        totals.inactive_count,
        totals.active_monthly_cost.format_with_symbol(symbol),
        totals.total_paid.format_with_symbol(symbol)
    );

    Ok(())
}
