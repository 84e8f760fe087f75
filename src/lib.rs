//! LedgerPulse - recurring period and aggregation engine
//!
//! This library computes the derived figures of a personal finance
//! dashboard from one user's raw records: which period a recurring budget
//! is in, how much of it has been spent, which subscription charges fall
//! due, how spending splits across categories, and what is left of the
//! period's income.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `models`: Records and value types (money, ids, periods, budgets, ...)
//! - `services`: Period resolution, category matching and the aggregators
//! - `reports`: Dashboard summary and spending trend
//! - `config`: Settings and path management
//! - `storage`: Snapshot loading and saving
//! - `display`: Terminal tables
//! - `export`: JSON, YAML and CSV output
//! - `cli`: Command handlers for the `ledgerpulse` binary
//! - `error`: Custom error types
//!
//! # Example
//!
//! ```rust,ignore
//! use ledgerpulse::models::ReportingPeriod;
//! use ledgerpulse::reports::DashboardAggregator;
//! use ledgerpulse::storage::load_snapshot;
//!
//! let snapshot = load_snapshot("ledger.json")?;
//! let today = chrono::Local::now().date_naive();
//! let summary = DashboardAggregator::default()
//!     .build_summary(ReportingPeriod::Monthly, today, &snapshot)?;
//! println!("{}", summary.format_terminal("$"));
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{EngineError, EngineResult};
