// SPDX-License-Identifier: PMPL-1.0-or-later

//! Line-oriented pattern scanning
//!
//! Runs every registry rule over every line of raw source text. Matching is
//! strictly per line: idioms that span lines are out of reach here and stay
//! the parser passes' problem.

use crate::rules::{Rule, RuleTable};
use crate::types::{Category, Issue};

/// Scan raw source against both rule sequences.
///
/// A single line may match several rules and yields one issue per match.
/// Lines are numbered from 1.
pub fn scan(source: &str, rules: &RuleTable) -> Vec<Issue> {
    let mut issues = Vec::new();

    for (index, line) in source.lines().enumerate() {
        let line_number = index + 1;
        scan_line(line, line_number, rules.security(), Category::Security, &mut issues);
        scan_line(line, line_number, rules.performance(), Category::Performance, &mut issues);
    }

    issues
}

fn scan_line(
    line: &str,
    line_number: usize,
    rules: &[Rule],
    category: Category,
    issues: &mut Vec<Issue>,
) {
    for rule in rules {
        if rule.matcher.is_match(line) {
            issues.push(Issue {
                severity: rule.severity,
                category,
                line_number,
                description: rule.description.to_string(),
                suggestion: rule.suggestion.to_string(),
                confidence: rule.confidence,
            });
        }
    }
}
