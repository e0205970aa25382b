// SPDX-License-Identifier: PMPL-1.0-or-later

//! Terminal report formatting

use crate::types::{AnalysisReport, Category, Issue, Severity};
use colored::*;

pub struct ReportFormatter;

impl ReportFormatter {
    pub fn new() -> Self {
        Self
    }

    pub fn print(&self, report: &AnalysisReport) {
        println!("\n{}", "=== INQUEST CODE REVIEW ===".bold().cyan());
        println!();

        self.print_summary(report);
        println!();

        if report.issues.is_empty() {
            println!("{}", "No issues found".green());
        } else {
            self.print_issues(&report.issues);
        }
        println!();
    }

    fn print_summary(&self, report: &AnalysisReport) {
        println!("{}", "SUMMARY".bold().yellow());
        println!("  File: {}", report.filename);

        let score_color = if report.overall_score >= 80.0 {
            "green"
        } else if report.overall_score >= 50.0 {
            "yellow"
        } else {
            "red"
        };
        println!(
            "  Overall score: {}/100",
            format!("{:.2}", report.overall_score).color(score_color).bold()
        );
        println!("  Total issues: {}", report.total_issues);
        println!();

        println!("  By severity:");
        for severity in Severity::all() {
            let count = report.severity_breakdown.get(&severity).copied().unwrap_or(0);
            println!("    {:<10} {}", severity.as_str(), count);
        }

        println!("  By category:");
        for category in Category::all() {
            let count = report.category_breakdown.get(&category).copied().unwrap_or(0);
            println!("    {:<12} {}", category.as_str(), count);
        }
    }

    fn print_issues(&self, issues: &[Issue]) {
        println!("{}", "ISSUES".bold().yellow());

        for (i, issue) in issues.iter().enumerate() {
            let severity_color = match issue.severity {
                Severity::Critical => "red",
                Severity::High => "yellow",
                Severity::Medium => "blue",
                Severity::Low => "green",
            };
            println!(
                "  {}. [{}] line {} ({}): {}",
                i + 1,
                issue.severity.to_string().color(severity_color).bold(),
                issue.line_number,
                issue.category,
                issue.description
            );
            println!("     Suggestion: {}", issue.suggestion.dimmed());
            println!("     Confidence: {:.2}", issue.confidence);
        }
    }
}

impl Default for ReportFormatter {
    fn default() -> Self {
        Self::new()
    }
}
