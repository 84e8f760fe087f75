//! Display formatting for terminal output
//!
//! Renders summaries, budget statuses, charges and trends as tables.

pub mod report;
pub mod tables;

pub use tables::{
    format_budget_table, format_category_table, format_charge_table, format_dashboard,
    format_income_table, format_next_due_table, format_trend_table,
};
