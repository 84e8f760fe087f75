//! Export module for LedgerPulse
//!
//! Writes dashboard summaries in several formats:
//! - JSON: machine-readable full summary
//! - YAML: human-readable full summary
//! - CSV: category breakdown and budget statuses

pub mod csv;
pub mod json;
pub mod yaml;

pub use self::csv::{export_budgets_csv, export_categories_csv};
pub use json::{export_summary_json, SummaryExport, EXPORT_SCHEMA_VERSION};
pub use yaml::export_summary_yaml;
