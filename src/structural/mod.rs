// SPDX-License-Identifier: PMPL-1.0-or-later

//! Structural checks over the parsed tree
//!
//! Two checks: function definitions with too many declared parameters, and
//! `if` statements sitting on top of deep control-flow nesting. When the
//! source does not parse at all, the whole pass collapses into a single
//! critical issue (the complexity pass stays silent so the failure is
//! reported exactly once).

use crate::parse::ParseFailure;
use crate::types::{Category, Issue, Severity};
use line_numbers::LinePositions;
use rustpython_parser::ast::{Arguments, ExceptHandler, Stmt, Suite};

/// Declared named parameters beyond this count get flagged.
const MAX_PARAMETERS: usize = 7;
/// Control-flow nesting beyond this depth gets flagged.
const MAX_NESTING_DEPTH: usize = 4;

/// Run both structural checks over a successfully parsed module.
pub fn analyze(suite: &Suite, source: &str) -> Vec<Issue> {
    let positions = LinePositions::from(source);
    let mut issues = Vec::new();
    walk(suite, &positions, &mut issues);
    issues
}

/// The single issue reported for a source that failed to parse.
pub fn syntax_error_issue(failure: &ParseFailure) -> Issue {
    Issue {
        severity: Severity::Critical,
        category: Category::Bug,
        line_number: failure.line,
        description: format!("Syntax error: {}", failure.message),
        suggestion: "Fix syntax error".to_string(),
        confidence: 1.0,
    }
}

fn walk(stmts: &[Stmt], positions: &LinePositions, issues: &mut Vec<Issue>) {
    for stmt in stmts {
        match stmt {
            Stmt::FunctionDef(func) => {
                check_parameter_count(
                    func.name.as_str(),
                    &func.args,
                    line_at(positions, func.range.start().into()),
                    issues,
                );
                walk(&func.body, positions, issues);
            }
            Stmt::AsyncFunctionDef(func) => {
                check_parameter_count(
                    func.name.as_str(),
                    &func.args,
                    line_at(positions, func.range.start().into()),
                    issues,
                );
                walk(&func.body, positions, issues);
            }
            Stmt::ClassDef(class) => walk(&class.body, positions, issues),
            Stmt::If(if_stmt) => {
                let depth = nesting_depth(stmt);
                if depth > MAX_NESTING_DEPTH {
                    issues.push(Issue {
                        severity: Severity::Medium,
                        category: Category::Style,
                        line_number: line_at(positions, if_stmt.range.start().into()),
                        description: format!("Deeply nested condition (depth: {depth})"),
                        suggestion: "Consider extracting conditions into separate functions"
                            .to_string(),
                        confidence: 0.7,
                    });
                }
                walk(&if_stmt.body, positions, issues);
                walk(&if_stmt.orelse, positions, issues);
            }
            Stmt::For(s) => {
                walk(&s.body, positions, issues);
                walk(&s.orelse, positions, issues);
            }
            Stmt::AsyncFor(s) => {
                walk(&s.body, positions, issues);
                walk(&s.orelse, positions, issues);
            }
            Stmt::While(s) => {
                walk(&s.body, positions, issues);
                walk(&s.orelse, positions, issues);
            }
            Stmt::With(s) => walk(&s.body, positions, issues),
            Stmt::AsyncWith(s) => walk(&s.body, positions, issues),
            Stmt::Try(s) => {
                walk(&s.body, positions, issues);
                for handler in &s.handlers {
                    let ExceptHandler::ExceptHandler(h) = handler;
                    walk(&h.body, positions, issues);
                }
                walk(&s.orelse, positions, issues);
                walk(&s.finalbody, positions, issues);
            }
            Stmt::TryStar(s) => {
                walk(&s.body, positions, issues);
                for handler in &s.handlers {
                    let ExceptHandler::ExceptHandler(h) = handler;
                    walk(&h.body, positions, issues);
                }
                walk(&s.orelse, positions, issues);
                walk(&s.finalbody, positions, issues);
            }
            Stmt::Match(s) => {
                for case in &s.cases {
                    walk(&case.body, positions, issues);
                }
            }
            _ => {}
        }
    }
}

fn check_parameter_count(
    name: &str,
    args: &Arguments,
    line_number: usize,
    issues: &mut Vec<Issue>,
) {
    let count = args.posonlyargs.len() + args.args.len() + args.kwonlyargs.len();
    if count > MAX_PARAMETERS {
        issues.push(Issue {
            severity: Severity::Medium,
            category: Category::Style,
            line_number,
            description: format!("Function {name} has too many parameters ({count})"),
            suggestion:
                "Consider using a configuration object or breaking into smaller functions"
                    .to_string(),
            confidence: 0.8,
        });
    }
}

/// Maximum depth of control-flow constructs nested beneath `stmt`.
///
/// Depth 0 at the node itself; each directly nested control-flow child adds
/// one, recursing per child and taking the maximum across siblings. Only
/// control-flow children are descended into, so the count follows
/// if/loop/with/try chains rather than every statement beneath the node.
fn nesting_depth(stmt: &Stmt) -> usize {
    let mut deepest = 0;
    for block in nested_blocks(stmt) {
        for child in block {
            if is_control_flow(child) {
                deepest = deepest.max(1 + nesting_depth(child));
            }
        }
    }
    deepest
}

fn is_control_flow(stmt: &Stmt) -> bool {
    matches!(
        stmt,
        Stmt::If(_)
            | Stmt::For(_)
            | Stmt::AsyncFor(_)
            | Stmt::While(_)
            | Stmt::With(_)
            | Stmt::AsyncWith(_)
            | Stmt::Try(_)
            | Stmt::TryStar(_)
    )
}

/// Statement blocks a control-flow construct nests directly. Except-handler
/// bodies are not part of the chain; the `try` itself is the counted
/// construct.
fn nested_blocks(stmt: &Stmt) -> Vec<&[Stmt]> {
    match stmt {
        Stmt::If(s) => vec![s.body.as_slice(), s.orelse.as_slice()],
        Stmt::For(s) => vec![s.body.as_slice(), s.orelse.as_slice()],
        Stmt::AsyncFor(s) => vec![s.body.as_slice(), s.orelse.as_slice()],
        Stmt::While(s) => vec![s.body.as_slice(), s.orelse.as_slice()],
        Stmt::With(s) => vec![s.body.as_slice()],
        Stmt::AsyncWith(s) => vec![s.body.as_slice()],
        Stmt::Try(s) => vec![
            s.body.as_slice(),
            s.orelse.as_slice(),
            s.finalbody.as_slice(),
        ],
        Stmt::TryStar(s) => vec![
            s.body.as_slice(),
            s.orelse.as_slice(),
            s.finalbody.as_slice(),
        ],
        _ => Vec::new(),
    }
}

fn line_at(positions: &LinePositions, offset: usize) -> usize {
    positions.from_offset(offset).as_usize() + 1
}
