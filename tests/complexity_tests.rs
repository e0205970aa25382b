// SPDX-License-Identifier: PMPL-1.0-or-later

//! Tests for per-function cyclomatic complexity

use inquest::complexity;
use inquest::parse::parse_module;
use inquest::types::{Category, Issue, Severity};

fn complexity_issues(source: &str) -> Vec<Issue> {
    let suite = parse_module(source, "<test>").expect("fixture must parse");
    complexity::analyze(&suite, source)
}

/// A function whose body is `n` sequential independent branches.
fn function_with_branches(n: usize) -> String {
    let mut source = String::from("def f(x):\n");
    for _ in 0..n {
        source.push_str("    if x:\n        pass\n");
    }
    source
}

#[test]
fn test_ten_branch_points_pass() {
    // Complexity 11 is above the threshold; 10 is not.
    assert!(complexity_issues(&function_with_branches(9)).is_empty());
}

#[test]
fn test_eleven_branch_points_yield_medium() {
    let issues = complexity_issues(&function_with_branches(11));
    assert_eq!(issues.len(), 1);
    let issue = &issues[0];
    assert_eq!(issue.severity, Severity::Medium);
    assert_eq!(issue.category, Category::Style);
    assert_eq!(issue.line_number, 1);
    assert_eq!(
        issue.description,
        "Function f has high cyclomatic complexity (12)"
    );
    assert_eq!(
        issue.suggestion,
        "Consider refactoring into smaller functions to reduce complexity"
    );
    let expected = 0.5 + 12.0 / 50.0;
    assert!((issue.confidence - expected).abs() < 1e-12);
}

#[test]
fn test_sixteen_branch_points_yield_high() {
    let issues = complexity_issues(&function_with_branches(16));
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].severity, Severity::High);
    assert!(issues[0].description.contains("(17)"));
}

#[test]
fn test_confidence_is_capped() {
    let issues = complexity_issues(&function_with_branches(40));
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].confidence, 0.95);
}

#[test]
fn test_boolean_operands_raise_complexity() {
    // 8 sequential ifs (+8) plus an 8-operand `and` (+7) on top of base 1.
    let mut source = function_with_branches(8);
    source.push_str(
        "    if a and b and c and d and e and f and g and h:\n        pass\n",
    );
    let issues = complexity_issues(&source);
    assert_eq!(issues.len(), 1);
    assert!(
        issues[0].description.contains("(17)"),
        "8 ifs + 1 if + 7 boolean operands should land on 17, got: {}",
        issues[0].description
    );
    assert_eq!(issues[0].severity, Severity::High);
}

#[test]
fn test_chained_comparisons_raise_complexity() {
    let mut source = function_with_branches(10);
    source.push_str("    ok = a < b < c\n");
    // 10 ifs (+10) plus one extra comparator (+1) on top of base 1.
    let issues = complexity_issues(&source);
    assert_eq!(issues.len(), 1);
    assert!(issues[0].description.contains("(12)"));
}

#[test]
fn test_except_handlers_raise_complexity() {
    let mut source = function_with_branches(9);
    source.push_str(
        "    try:\n        pass\n    except ValueError:\n        pass\n    except KeyError:\n        pass\n",
    );
    // 9 ifs + 2 handlers (the try itself does not count) -> 12.
    let issues = complexity_issues(&source);
    assert_eq!(issues.len(), 1);
    assert!(issues[0].description.contains("(12)"));
}

#[test]
fn test_every_function_is_measured_independently() {
    let mut source = function_with_branches(11);
    source.push('\n');
    source.push_str("def g(x):\n    return x\n");
    let issues = complexity_issues(&source);
    assert_eq!(issues.len(), 1);
    assert!(issues[0].description.contains("Function f"));
}

#[test]
fn test_nested_function_counts_toward_parent() {
    // The inner def contributes its branches to the outer subtree walk and
    // is also measured on its own.
    let mut source = String::from("def outer(x):\n");
    for _ in 0..6 {
        source.push_str("    if x:\n        pass\n");
    }
    source.push_str("    def inner(y):\n");
    for _ in 0..5 {
        source.push_str("        if y:\n            pass\n");
    }
    let issues = complexity_issues(&source);
    // outer: 1 + 6 + 5 = 12; inner: 1 + 5 = 6 (below threshold).
    assert_eq!(issues.len(), 1);
    assert!(issues[0].description.contains("outer"));
    assert!(issues[0].description.contains("(12)"));
}

#[test]
fn test_comprehension_conditions_are_walked() {
    let mut source = function_with_branches(10);
    source.push_str("    xs = [v for v in vs if v and w]\n");
    // 10 ifs plus the 2-operand `and` inside the comprehension (+1) -> 12.
    let issues = complexity_issues(&source);
    assert_eq!(issues.len(), 1);
    assert!(issues[0].description.contains("(12)"));
}
