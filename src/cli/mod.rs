//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the engine.

pub mod budget;
pub mod config;
pub mod income;
pub mod subscription;
pub mod summary;

pub use budget::{handle_budget_command, BudgetArgs};
pub use config::{handle_config_command, ConfigCommands};
pub use income::{handle_income_command, IncomeArgs};
pub use subscription::{handle_subscription_command, SubscriptionArgs};
pub use summary::{handle_summary_command, handle_trend_command, SummaryArgs, TrendArgs};

use chrono::NaiveDate;
use clap::Args;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use crate::config::{LedgerPaths, Settings};
use crate::error::{EngineError, EngineResult};
use crate::models::{LedgerSnapshot, ReportingPeriod};
use crate::services::PeriodResolver;
use crate::storage::load_snapshot;

/// Arguments shared by every reporting command
#[derive(Args, Debug, Clone)]
pub struct LedgerArgs {
    /// Snapshot file (JSON or YAML); defaults to data/ledger.json in the
    /// LedgerPulse home
    #[arg(long, env = "LEDGERPULSE_DATA")]
    pub data: Option<PathBuf>,

    /// Reference date (YYYY-MM-DD); defaults to today
    #[arg(long)]
    pub date: Option<String>,

    /// Reporting period: daily, weekly, monthly or yearly
    #[arg(short, long)]
    pub period: Option<String>,
}

/// Everything a handler needs after the shared arguments are resolved
pub struct CommandContext {
    pub settings: Settings,
    pub snapshot: LedgerSnapshot,
    pub reference: NaiveDate,
    pub period: ReportingPeriod,
}

impl CommandContext {
    /// Load the snapshot and resolve the reference date and period
    pub fn load(paths: &LedgerPaths, settings: &Settings, args: &LedgerArgs) -> EngineResult<Self> {
        let reference = match &args.date {
            Some(text) => parse_date(text)?,
            None => chrono::Local::now().date_naive(),
        };

        let period = match &args.period {
            Some(text) => text.parse()?,
            None => settings.default_period,
        };

        let data_path = args
            .data
            .clone()
            .unwrap_or_else(|| paths.default_snapshot());
        let snapshot = load_snapshot(&data_path)?;

        Ok(Self {
            settings: settings.clone(),
            snapshot,
            reference,
            period,
        })
    }

    pub fn resolver(&self) -> PeriodResolver {
        PeriodResolver::from_settings(&self.settings)
    }

    pub fn symbol(&self) -> &str {
        &self.settings.currency_symbol
    }

    pub fn date_format(&self) -> &str {
        &self.settings.date_format
    }
}

/// Parse a `YYYY-MM-DD` date argument
pub fn parse_date(text: &str) -> EngineResult<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d").map_err(|_| {
        EngineError::Validation(format!("Invalid date format: {}. Use YYYY-MM-DD", text))
    })
}

/// Open a buffered writer for an export file
pub(crate) fn create_output(path: &Path) -> EngineResult<BufWriter<File>> {
    let file = File::create(path).map_err(|e| {
        EngineError::Export(format!("Failed to create file {}: {}", path.display(), e))
    })?;
    Ok(BufWriter::new(file))
}

/// Check whether a user-supplied identifier names an entity, by full UUID or
/// by its short display form
pub(crate) fn id_matches(query: &str, uuid: &uuid::Uuid, display: &str) -> bool {
    let query = query.trim();
    query.eq_ignore_ascii_case(display) || uuid::Uuid::parse_str(query).is_ok_and(|q| &q == uuid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2024-03-15").unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
        );
        assert!(matches!(parse_date("15/03/2024"), Err(EngineError::Validation(_))));
    }

    #[test]
    fn test_id_matches() {
        let uuid = uuid::Uuid::new_v4();
        let display = format!("bud-{}", &uuid.to_string()[..8]);
        assert!(id_matches(&uuid.to_string(), &uuid, &display));
        assert!(id_matches(&display.to_uppercase(), &uuid, &display));
        assert!(!id_matches("bud-00000000", &uuid, &display));
    }
}
