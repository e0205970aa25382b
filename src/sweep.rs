// SPDX-License-Identifier: PMPL-1.0-or-later

//! Sweep: batch review across a directory tree
//!
//! Walks a directory, finds every `.py` file, runs the reviewer on each in
//! parallel, and produces a summary report sorted by issue count (worst
//! files first).

use crate::review::CodeReviewer;
use crate::source::read_source;
use crate::types::{AnalysisReport, Severity};
use anyhow::Result;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Configuration for a sweep run
pub struct SweepConfig {
    /// Directory to scan for Python sources
    pub directory: PathBuf,
    /// Output path for JSON report (handled by caller)
    pub output: Option<PathBuf>,
    /// Only show files with findings
    pub findings_only: bool,
    /// Minimum number of findings to include
    pub min_issues: usize,
}

/// Results from reviewing a single file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileResult {
    pub path: PathBuf,
    pub file_name: String,
    pub total_issues: usize,
    pub critical_count: usize,
    pub high_count: usize,
    pub overall_score: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip)]
    pub report: Option<AnalysisReport>,
}

/// Complete sweep report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepReport {
    pub created_at: String,
    pub directory: PathBuf,
    pub files_scanned: usize,
    pub files_with_issues: usize,
    pub total_issues: usize,
    pub total_critical: usize,
    pub results: Vec<FileResult>,
}

/// Find all Python sources under the given directory
fn discover_sources(directory: &Path) -> Result<Vec<PathBuf>> {
    if !directory.is_dir() {
        anyhow::bail!("Not a directory: {}", directory.display());
    }

    let mut sources: Vec<PathBuf> = WalkDir::new(directory)
        .into_iter()
        .filter_entry(|entry| {
            let name = entry.file_name().to_str().unwrap_or("");
            !(entry.depth() > 0 && name.starts_with('.'))
                && name != "__pycache__"
                && name != "venv"
                && name != "node_modules"
        })
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| {
            matches!(
                path.extension().and_then(|e| e.to_str()),
                Some("py") | Some("pyw")
            )
        })
        .collect();

    sources.sort();
    Ok(sources)
}

fn review_file(reviewer: &CodeReviewer, path: &Path) -> FileResult {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string());

    match read_source(path) {
        Ok(source) => {
            let report = reviewer.review(&source, &path.to_string_lossy());
            let critical_count = report
                .severity_breakdown
                .get(&Severity::Critical)
                .copied()
                .unwrap_or(0);
            let high_count = report
                .severity_breakdown
                .get(&Severity::High)
                .copied()
                .unwrap_or(0);

            FileResult {
                path: path.to_path_buf(),
                file_name,
                total_issues: report.total_issues,
                critical_count,
                high_count,
                overall_score: report.overall_score,
                error: None,
                report: Some(report),
            }
        }
        Err(e) => FileResult {
            path: path.to_path_buf(),
            file_name,
            total_issues: 0,
            critical_count: 0,
            high_count: 0,
            overall_score: 0.0,
            error: Some(e.to_string()),
            report: None,
        },
    }
}

/// Run a sweep across all Python sources in a directory
pub fn run(config: &SweepConfig) -> Result<SweepReport> {
    let sources = discover_sources(&config.directory)?;
    let reviewer = CodeReviewer::new();

    let mut results: Vec<FileResult> = sources
        .par_iter()
        .map(|path| review_file(&reviewer, path))
        .collect();

    // Sort by issue count descending (riskiest files first)
    results.sort_by(|a, b| b.total_issues.cmp(&a.total_issues));

    // Apply filters
    if config.findings_only {
        results.retain(|r| r.total_issues > 0);
    }
    if config.min_issues > 0 {
        results.retain(|r| r.total_issues >= config.min_issues);
    }

    let files_with_issues = results.iter().filter(|r| r.total_issues > 0).count();
    let total_issues: usize = results.iter().map(|r| r.total_issues).sum();
    let total_critical: usize = results.iter().map(|r| r.critical_count).sum();

    Ok(SweepReport {
        created_at: chrono::Utc::now().to_rfc3339(),
        directory: config.directory.clone(),
        files_scanned: sources.len(),
        files_with_issues,
        total_issues,
        total_critical,
        results,
    })
}

/// Print a summary table to the terminal
pub fn print_summary(report: &SweepReport, quiet: bool) {
    if quiet {
        return;
    }

    println!("\n=== SWEEP SUMMARY ===");
    println!(
        "Directory: {}  |  Files scanned: {}  |  With findings: {}",
        report.directory.display(),
        report.files_scanned,
        report.files_with_issues
    );
    println!(
        "Total issues: {}  |  Critical: {}",
        report.total_issues, report.total_critical
    );
    println!();

    if report.results.is_empty() {
        println!("  No files with findings.");
        return;
    }

    // Header
    println!(
        "  {:<40} {:>6} {:>6} {:>6} {:>8}",
        "File", "Total", "Crit", "High", "Score"
    );
    println!("  {}", "-".repeat(70));

    // Show top 20 files
    for result in report.results.iter().take(20) {
        if let Some(err) = &result.error {
            println!("  {:<40} ERROR: {}", result.file_name, err);
        } else {
            println!(
                "  {:<40} {:>6} {:>6} {:>6} {:>8.2}",
                result.file_name,
                result.total_issues,
                result.critical_count,
                result.high_count,
                result.overall_score,
            );
        }
    }

    if report.results.len() > 20 {
        println!("  ... and {} more files", report.results.len() - 20);
    }
    println!();
}

/// Write sweep report as JSON
pub fn write_report(report: &SweepReport, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(report)?;
    fs::write(path, json)?;
    Ok(())
}
