//! Reports module for LedgerPulse
//!
//! Provides the dashboard summary and the spending trend series built on top
//! of the services.

pub mod dashboard;
pub mod trend;

pub use dashboard::{DashboardAggregator, DashboardSummary, SpendingSplit};
pub use trend::{SpendingTrend, TrendBucket};
