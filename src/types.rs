// SPDX-License-Identifier: PMPL-1.0-or-later

//! Core type definitions for inquest
//!
//! Findings are immutable `Issue` records drawn from closed severity and
//! category sets; a finished analysis is summarized by `AnalysisReport`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// How serious a finding is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub fn all() -> Vec<Self> {
        vec![
            Severity::Low,
            Severity::Medium,
            Severity::High,
            Severity::Critical,
        ]
    }

    /// Lowercase name; also the report-sort key (lexical, see `review`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
        }
    }

    /// Penalty weight used by the overall-score formula.
    pub fn penalty_weight(&self) -> u32 {
        match self {
            Severity::Low => 1,
            Severity::Medium => 3,
            Severity::High => 7,
            Severity::Critical => 15,
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Low => write!(f, "LOW"),
            Severity::Medium => write!(f, "MEDIUM"),
            Severity::High => write!(f, "HIGH"),
            Severity::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// What kind of problem a finding describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Security,
    Performance,
    Style,
    Bug,
}

impl Category {
    pub fn all() -> Vec<Self> {
        vec![
            Category::Security,
            Category::Performance,
            Category::Style,
            Category::Bug,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Security => "security",
            Category::Performance => "performance",
            Category::Style => "style",
            Category::Bug => "bug",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single finding. Immutable once created; aggregation only reorders
/// and counts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    pub severity: Severity,
    pub category: Category,
    /// 1-based; line 1 doubles as the sentinel for whole-file findings.
    #[serde(rename = "line")]
    pub line_number: usize,
    pub description: String,
    pub suggestion: String,
    /// Always within [0.0, 1.0].
    pub confidence: f64,
}

/// Finished analysis of one source file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub filename: String,
    pub total_issues: usize,
    /// All four severity keys always present, zero-filled.
    pub severity_breakdown: BTreeMap<Severity, usize>,
    /// All four category keys always present, zero-filled.
    pub category_breakdown: BTreeMap<Category, usize>,
    pub issues: Vec<Issue>,
    /// 0.0 (worst) to 100.0 (clean).
    pub overall_score: f64,
}
