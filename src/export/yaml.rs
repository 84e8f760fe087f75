//! YAML Export functionality
//!
//! Exports a dashboard summary to YAML for human-readable output.

use std::io::Write;

use crate::error::EngineResult;
use crate::export::json::SummaryExport;
use crate::reports::DashboardSummary;

/// Export a summary as YAML with a short header comment
pub fn export_summary_yaml<W: Write>(summary: &DashboardSummary, writer: &mut W) -> EngineResult<()> {
    let export = SummaryExport::new(summary);

    writeln!(writer, "# LedgerPulse {} summary", summary.period)?;
    writeln!(writer, "# Window: {}", summary.window)?;
    writeln!(writer, "# Generated: {}", export.exported_at)?;
    writeln!(writer)?;

    serde_yaml::to_writer(writer, &export)?;
    Ok(())
}
