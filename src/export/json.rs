//! JSON Export functionality
//!
//! Exports a dashboard summary to JSON with schema versioning.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Write;

use crate::error::EngineResult;
use crate::reports::DashboardSummary;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Summary wrapped with export metadata
#[derive(Debug, Clone, Serialize)]
pub struct SummaryExport<'a> {
    /// Schema version for compatibility checking
    pub schema_version: &'static str,

    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: &'static str,

    pub summary: &'a DashboardSummary,
}

impl<'a> SummaryExport<'a> {
    pub fn new(summary: &'a DashboardSummary) -> Self {
        Self {
            schema_version: EXPORT_SCHEMA_VERSION,
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION"),
            summary,
        }
    }
}

/// Export a summary as pretty-printed JSON
pub fn export_summary_json<W: Write>(summary: &DashboardSummary, writer: &mut W) -> EngineResult<()> {
    serde_json::to_writer_pretty(&mut *writer, &SummaryExport::new(summary))?;
    writeln!(writer)?;
    Ok(())
}
