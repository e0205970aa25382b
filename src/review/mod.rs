// SPDX-License-Identifier: PMPL-1.0-or-later

//! Review engine
//!
//! Drives the full pipeline over one source blob: parse once, run the tree
//! passes and the line scanner, consult the semantic scorer, then aggregate
//! into the ordered issue list and the scored report. The engine owns the
//! rule table and the injected scorer and is otherwise stateless, so one
//! `CodeReviewer` can serve any number of concurrent analyses.

use crate::complexity;
use crate::parse;
use crate::rules::RuleTable;
use crate::scan;
use crate::semantic::{self, HeuristicScorer, SemanticScorer};
use crate::structural;
use crate::types::{AnalysisReport, Category, Issue, Severity};
use std::collections::BTreeMap;

pub struct CodeReviewer {
    rules: RuleTable,
    scorer: Box<dyn SemanticScorer + Send + Sync>,
}

impl CodeReviewer {
    /// Reviewer with the built-in deterministic scorer.
    pub fn new() -> Self {
        Self::with_scorer(Box::new(HeuristicScorer::new()))
    }

    /// Reviewer with an injected semantic-complexity collaborator.
    pub fn with_scorer(scorer: Box<dyn SemanticScorer + Send + Sync>) -> Self {
        Self {
            rules: RuleTable::new(),
            scorer,
        }
    }

    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    /// Run every pass over `source` and return the ordered issue list.
    ///
    /// `filename` only feeds parser diagnostics. A syntax error shows up as
    /// a single critical issue while the line scanner and semantic scorer
    /// still run, so the result stays useful for broken sources.
    pub fn analyze(&self, source: &str, filename: &str) -> Vec<Issue> {
        let parsed = parse::parse_module(source, filename);
        let mut issues = Vec::new();

        match &parsed {
            Ok(suite) => issues.extend(structural::analyze(suite, source)),
            Err(failure) => issues.push(structural::syntax_error_issue(failure)),
        }

        issues.extend(scan::scan(source, &self.rules));

        if let Ok(suite) = &parsed {
            issues.extend(complexity::analyze(suite, source));
        }

        issues.extend(semantic::analyze(self.scorer.as_ref(), source));

        sort_issues(&mut issues);
        issues
    }

    /// Build the final report from an already-ordered issue list.
    pub fn generate_report(&self, issues: Vec<Issue>, filename: &str) -> AnalysisReport {
        let mut severity_breakdown: BTreeMap<Severity, usize> =
            Severity::all().into_iter().map(|s| (s, 0)).collect();
        let mut category_breakdown: BTreeMap<Category, usize> =
            Category::all().into_iter().map(|c| (c, 0)).collect();

        for issue in &issues {
            *severity_breakdown.entry(issue.severity).or_insert(0) += 1;
            *category_breakdown.entry(issue.category).or_insert(0) += 1;
        }

        AnalysisReport {
            filename: filename.to_string(),
            total_issues: issues.len(),
            severity_breakdown,
            category_breakdown,
            overall_score: calculate_score(&issues),
            issues,
        }
    }

    /// `analyze` and `generate_report` composed.
    pub fn review(&self, source: &str, filename: &str) -> AnalysisReport {
        let issues = self.analyze(source, filename);
        self.generate_report(issues, filename)
    }
}

impl Default for CodeReviewer {
    fn default() -> Self {
        Self::new()
    }
}

/// Stable sort by (severity name, line number).
///
/// Severity compares as its lowercase *string*, so the order is
/// critical < high < low < medium (alphabetical, not risk-ranked). This is
/// a long-standing quirk of the report contract; consumers rely on it.
fn sort_issues(issues: &mut [Issue]) {
    issues.sort_by(|a, b| {
        a.severity
            .as_str()
            .cmp(b.severity.as_str())
            .then(a.line_number.cmp(&b.line_number))
    });
}

/// Overall quality score, 0 to 100.
///
/// Each issue costs twice its severity weight; a clean file scores 100.
fn calculate_score(issues: &[Issue]) -> f64 {
    if issues.is_empty() {
        return 100.0;
    }

    let total_penalty: u32 = issues.iter().map(|i| i.severity.penalty_weight()).sum();
    let score = (100i64 - i64::from(total_penalty) * 2).max(0) as f64;
    (score * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issue(severity: Severity, line_number: usize) -> Issue {
        Issue {
            severity,
            category: Category::Style,
            line_number,
            description: "d".to_string(),
            suggestion: "s".to_string(),
            confidence: 0.5,
        }
    }

    #[test]
    fn test_sort_is_alphabetical_by_severity_name() {
        let mut issues = vec![
            issue(Severity::Medium, 1),
            issue(Severity::Low, 1),
            issue(Severity::High, 1),
            issue(Severity::Critical, 1),
        ];
        sort_issues(&mut issues);
        let order: Vec<_> = issues.iter().map(|i| i.severity).collect();
        assert_eq!(
            order,
            vec![
                Severity::Critical,
                Severity::High,
                Severity::Low,
                Severity::Medium
            ]
        );
    }

    #[test]
    fn test_sort_breaks_ties_by_line() {
        let mut issues = vec![issue(Severity::High, 9), issue(Severity::High, 2)];
        sort_issues(&mut issues);
        assert_eq!(issues[0].line_number, 2);
    }

    #[test]
    fn test_score_of_no_issues() {
        assert_eq!(calculate_score(&[]), 100.0);
    }

    #[test]
    fn test_score_single_weights() {
        assert_eq!(calculate_score(&[issue(Severity::Low, 1)]), 98.0);
        assert_eq!(calculate_score(&[issue(Severity::Critical, 1)]), 70.0);
    }

    #[test]
    fn test_score_floors_at_zero() {
        let issues: Vec<_> = (0..10).map(|_| issue(Severity::Critical, 1)).collect();
        assert_eq!(calculate_score(&issues), 0.0);
    }
}
