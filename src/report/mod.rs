// SPDX-License-Identifier: PMPL-1.0-or-later

//! Report rendering and export
//!
//! Everything downstream of the analysis core: terminal output, JSON/YAML
//! serialization, and SARIF 2.1.0 for code-scanning integrations.

pub mod formatter;
pub mod output;
pub mod sarif;

use crate::types::AnalysisReport;
use anyhow::Result;
use std::path::Path;

pub use formatter::ReportFormatter;
pub use output::ReportOutputFormat;

/// Print a report to the terminal.
pub fn print_report(report: &AnalysisReport) {
    ReportFormatter::new().print(report);
}

/// Serialize a report in the requested format and write it to `path`.
pub fn save_report(report: &AnalysisReport, path: &Path, format: ReportOutputFormat) -> Result<()> {
    let serialized = format.serialize(report)?;
    std::fs::write(path, serialized)?;
    Ok(())
}
