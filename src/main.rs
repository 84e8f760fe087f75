use anyhow::Result;
use clap::{Parser, Subcommand};

use ledgerpulse::cli::{
    handle_budget_command, handle_config_command, handle_income_command,
    handle_subscription_command, handle_summary_command, handle_trend_command, BudgetArgs,
    CommandContext, ConfigCommands, IncomeArgs, LedgerArgs, SubscriptionArgs, SummaryArgs,
    TrendArgs,
};
use ledgerpulse::config::{LedgerPaths, Settings};

#[derive(Parser)]
#[command(
    name = "ledgerpulse",
    version,
    about = "Budget, subscription and income figures for a personal ledger",
    long_about = "LedgerPulse reads a snapshot of one user's transactions, budgets, \
                  subscriptions and income, resolves the current period of every \
                  recurring item, and reports spent, remaining and due amounts."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Dashboard summary for the reporting period
    Summary {
        #[command(flatten)]
        ledger: LedgerArgs,
        #[command(flatten)]
        args: SummaryArgs,
    },

    /// Budget statuses in their active periods
    Budgets {
        #[command(flatten)]
        ledger: LedgerArgs,
        #[command(flatten)]
        args: BudgetArgs,
    },

    /// Subscription charges due in the reporting period
    #[command(alias = "subs")]
    Subscriptions {
        #[command(flatten)]
        ledger: LedgerArgs,
        #[command(flatten)]
        args: SubscriptionArgs,
    },

    /// Income against spending
    Income {
        #[command(flatten)]
        ledger: LedgerArgs,
        #[command(flatten)]
        args: IncomeArgs,
    },

    /// Spending series across the reporting period
    Trend {
        #[command(flatten)]
        ledger: LedgerArgs,
        #[command(flatten)]
        args: TrendArgs,
    },

    /// Show or change settings
    #[command(subcommand)]
    Config(ConfigCommands),
}

fn main() -> Result<()> {
    ledgerpulse::logging::init_tracing("warn");

    let cli = Cli::parse();

    let paths = LedgerPaths::new()?;
    let mut settings = Settings::load_or_create(&paths)?;

    match cli.command {
        Commands::Summary { ledger, args } => {
            let ctx = CommandContext::load(&paths, &settings, &ledger)?;
            handle_summary_command(&ctx, args)?;
        }
        Commands::Budgets { ledger, args } => {
            let ctx = CommandContext::load(&paths, &settings, &ledger)?;
            handle_budget_command(&ctx, args)?;
        }
        Commands::Subscriptions { ledger, args } => {
            let ctx = CommandContext::load(&paths, &settings, &ledger)?;
            handle_subscription_command(&ctx, args)?;
        }
        Commands::Income { ledger, args } => {
            let ctx = CommandContext::load(&paths, &settings, &ledger)?;
            handle_income_command(&ctx, args)?;
        }
        Commands::Trend { ledger, args } => {
            let ctx = CommandContext::load(&paths, &settings, &ledger)?;
            handle_trend_command(&ctx, args)?;
        }
        Commands::Config(cmd) => {
            handle_config_command(&paths, &mut settings, cmd)?;
        }
    }

    Ok(())
}
