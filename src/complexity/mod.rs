// SPDX-License-Identifier: PMPL-1.0-or-later

//! Cyclomatic complexity per function
//!
//! Complexity starts at 1 and grows with every decision point found in the
//! function's subtree: conditionals, loops and resource scopes add one,
//! every except clause adds one, an n-operand boolean expression adds n-1,
//! and a chained comparison adds one per extra comparator. Nested function
//! bodies count toward the enclosing function as well as being measured on
//! their own, matching a plain subtree walk.

use crate::types::{Category, Issue, Severity};
use line_numbers::LinePositions;
use rustpython_parser::ast::{Arguments, ExceptHandler, Expr, Stmt, Suite};

/// Functions above this complexity get flagged.
const COMPLEXITY_THRESHOLD: u32 = 10;
/// Above this, the finding escalates from medium to high.
const HIGH_COMPLEXITY_THRESHOLD: u32 = 15;

/// Measure every function definition in the module and flag the complex
/// ones. Callers skip this pass entirely when parsing failed.
pub fn analyze(suite: &Suite, source: &str) -> Vec<Issue> {
    let positions = LinePositions::from(source);
    let mut issues = Vec::new();
    collect_functions(suite, &positions, &mut issues);
    issues
}

/// Cyclomatic complexity of one function body.
pub fn cyclomatic_complexity(body: &[Stmt]) -> u32 {
    let mut complexity = 1;
    count_stmts(body, &mut complexity);
    complexity
}

fn collect_functions(stmts: &[Stmt], positions: &LinePositions, issues: &mut Vec<Issue>) {
    for stmt in stmts {
        match stmt {
            Stmt::FunctionDef(func) => {
                check_function(
                    func.name.as_str(),
                    &func.body,
                    positions.from_offset(func.range.start().into()).as_usize() + 1,
                    issues,
                );
                collect_functions(&func.body, positions, issues);
            }
            Stmt::AsyncFunctionDef(func) => {
                check_function(
                    func.name.as_str(),
                    &func.body,
                    positions.from_offset(func.range.start().into()).as_usize() + 1,
                    issues,
                );
                collect_functions(&func.body, positions, issues);
            }
            Stmt::ClassDef(class) => collect_functions(&class.body, positions, issues),
            Stmt::If(s) => {
                collect_functions(&s.body, positions, issues);
                collect_functions(&s.orelse, positions, issues);
            }
            Stmt::For(s) => {
                collect_functions(&s.body, positions, issues);
                collect_functions(&s.orelse, positions, issues);
            }
            Stmt::AsyncFor(s) => {
                collect_functions(&s.body, positions, issues);
                collect_functions(&s.orelse, positions, issues);
            }
            Stmt::While(s) => {
                collect_functions(&s.body, positions, issues);
                collect_functions(&s.orelse, positions, issues);
            }
            Stmt::With(s) => collect_functions(&s.body, positions, issues),
            Stmt::AsyncWith(s) => collect_functions(&s.body, positions, issues),
            Stmt::Try(s) => {
                collect_functions(&s.body, positions, issues);
                for handler in &s.handlers {
                    let ExceptHandler::ExceptHandler(h) = handler;
                    collect_functions(&h.body, positions, issues);
                }
                collect_functions(&s.orelse, positions, issues);
                collect_functions(&s.finalbody, positions, issues);
            }
            Stmt::TryStar(s) => {
                collect_functions(&s.body, positions, issues);
                for handler in &s.handlers {
                    let ExceptHandler::ExceptHandler(h) = handler;
                    collect_functions(&h.body, positions, issues);
                }
                collect_functions(&s.orelse, positions, issues);
                collect_functions(&s.finalbody, positions, issues);
            }
            Stmt::Match(s) => {
                for case in &s.cases {
                    collect_functions(&case.body, positions, issues);
                }
            }
            _ => {}
        }
    }
}

fn check_function(name: &str, body: &[Stmt], line_number: usize, issues: &mut Vec<Issue>) {
    let complexity = cyclomatic_complexity(body);
    if complexity > COMPLEXITY_THRESHOLD {
        let severity = if complexity > HIGH_COMPLEXITY_THRESHOLD {
            Severity::High
        } else {
            Severity::Medium
        };
        issues.push(Issue {
            severity,
            category: Category::Style,
            line_number,
            description: format!("Function {name} has high cyclomatic complexity ({complexity})"),
            suggestion: "Consider refactoring into smaller functions to reduce complexity"
                .to_string(),
            confidence: (0.5 + f64::from(complexity) / 50.0).min(0.95),
        });
    }
}

fn count_stmts(stmts: &[Stmt], complexity: &mut u32) {
    for stmt in stmts {
        match stmt {
            Stmt::FunctionDef(func) => {
                for decorator in &func.decorator_list {
                    count_expr(decorator, complexity);
                }
                count_stmts(&func.body, complexity);
            }
            Stmt::AsyncFunctionDef(func) => {
                for decorator in &func.decorator_list {
                    count_expr(decorator, complexity);
                }
                count_stmts(&func.body, complexity);
            }
            Stmt::ClassDef(class) => {
                for decorator in &class.decorator_list {
                    count_expr(decorator, complexity);
                }
                count_stmts(&class.body, complexity);
            }
            Stmt::If(s) => {
                *complexity += 1;
                count_expr(&s.test, complexity);
                count_stmts(&s.body, complexity);
                count_stmts(&s.orelse, complexity);
            }
            Stmt::For(s) => {
                *complexity += 1;
                count_expr(&s.target, complexity);
                count_expr(&s.iter, complexity);
                count_stmts(&s.body, complexity);
                count_stmts(&s.orelse, complexity);
            }
            Stmt::AsyncFor(s) => {
                *complexity += 1;
                count_expr(&s.target, complexity);
                count_expr(&s.iter, complexity);
                count_stmts(&s.body, complexity);
                count_stmts(&s.orelse, complexity);
            }
            Stmt::While(s) => {
                *complexity += 1;
                count_expr(&s.test, complexity);
                count_stmts(&s.body, complexity);
                count_stmts(&s.orelse, complexity);
            }
            Stmt::With(s) => {
                *complexity += 1;
                for item in &s.items {
                    count_expr(&item.context_expr, complexity);
                }
                count_stmts(&s.body, complexity);
            }
            Stmt::AsyncWith(s) => {
                *complexity += 1;
                for item in &s.items {
                    count_expr(&item.context_expr, complexity);
                }
                count_stmts(&s.body, complexity);
            }
            Stmt::Try(s) => {
                count_stmts(&s.body, complexity);
                for handler in &s.handlers {
                    let ExceptHandler::ExceptHandler(h) = handler;
                    *complexity += 1;
                    count_stmts(&h.body, complexity);
                }
                count_stmts(&s.orelse, complexity);
                count_stmts(&s.finalbody, complexity);
            }
            Stmt::TryStar(s) => {
                count_stmts(&s.body, complexity);
                for handler in &s.handlers {
                    let ExceptHandler::ExceptHandler(h) = handler;
                    *complexity += 1;
                    count_stmts(&h.body, complexity);
                }
                count_stmts(&s.orelse, complexity);
                count_stmts(&s.finalbody, complexity);
            }
            Stmt::Match(s) => {
                count_expr(&s.subject, complexity);
                for case in &s.cases {
                    if let Some(guard) = &case.guard {
                        count_expr(guard, complexity);
                    }
                    count_stmts(&case.body, complexity);
                }
            }
            Stmt::Return(s) => {
                if let Some(value) = &s.value {
                    count_expr(value, complexity);
                }
            }
            Stmt::Delete(s) => {
                for target in &s.targets {
                    count_expr(target, complexity);
                }
            }
            Stmt::Assign(s) => {
                for target in &s.targets {
                    count_expr(target, complexity);
                }
                count_expr(&s.value, complexity);
            }
            Stmt::AugAssign(s) => {
                count_expr(&s.target, complexity);
                count_expr(&s.value, complexity);
            }
            Stmt::AnnAssign(s) => {
                count_expr(&s.target, complexity);
                if let Some(value) = &s.value {
                    count_expr(value, complexity);
                }
            }
            Stmt::Raise(s) => {
                if let Some(exc) = &s.exc {
                    count_expr(exc, complexity);
                }
                if let Some(cause) = &s.cause {
                    count_expr(cause, complexity);
                }
            }
            Stmt::Assert(s) => {
                count_expr(&s.test, complexity);
                if let Some(msg) = &s.msg {
                    count_expr(msg, complexity);
                }
            }
            Stmt::Expr(s) => count_expr(&s.value, complexity),
            _ => {}
        }
    }
}

fn count_expr(expr: &Expr, complexity: &mut u32) {
    match expr {
        Expr::BoolOp(e) => {
            // An n-operand and/or contributes n-1 decision points.
            *complexity += e.values.len().saturating_sub(1) as u32;
            for value in &e.values {
                count_expr(value, complexity);
            }
        }
        Expr::Compare(e) => {
            // a < b < c is two comparisons but one extra decision point.
            *complexity += e.ops.len().saturating_sub(1) as u32;
            count_expr(&e.left, complexity);
            for comparator in &e.comparators {
                count_expr(comparator, complexity);
            }
        }
        Expr::NamedExpr(e) => {
            count_expr(&e.target, complexity);
            count_expr(&e.value, complexity);
        }
        Expr::BinOp(e) => {
            count_expr(&e.left, complexity);
            count_expr(&e.right, complexity);
        }
        Expr::UnaryOp(e) => count_expr(&e.operand, complexity),
        Expr::Lambda(e) => {
            count_arguments(&e.args, complexity);
            count_expr(&e.body, complexity);
        }
        Expr::IfExp(e) => {
            count_expr(&e.test, complexity);
            count_expr(&e.body, complexity);
            count_expr(&e.orelse, complexity);
        }
        Expr::Dict(e) => {
            for key in e.keys.iter().flatten() {
                count_expr(key, complexity);
            }
            for value in &e.values {
                count_expr(value, complexity);
            }
        }
        Expr::Set(e) => {
            for elt in &e.elts {
                count_expr(elt, complexity);
            }
        }
        Expr::ListComp(e) => {
            count_expr(&e.elt, complexity);
            count_comprehensions(&e.generators, complexity);
        }
        Expr::SetComp(e) => {
            count_expr(&e.elt, complexity);
            count_comprehensions(&e.generators, complexity);
        }
        Expr::DictComp(e) => {
            count_expr(&e.key, complexity);
            count_expr(&e.value, complexity);
            count_comprehensions(&e.generators, complexity);
        }
        Expr::GeneratorExp(e) => {
            count_expr(&e.elt, complexity);
            count_comprehensions(&e.generators, complexity);
        }
        Expr::Await(e) => count_expr(&e.value, complexity),
        Expr::Yield(e) => {
            if let Some(value) = &e.value {
                count_expr(value, complexity);
            }
        }
        Expr::YieldFrom(e) => count_expr(&e.value, complexity),
        Expr::Call(e) => {
            count_expr(&e.func, complexity);
            for arg in &e.args {
                count_expr(arg, complexity);
            }
            for keyword in &e.keywords {
                count_expr(&keyword.value, complexity);
            }
        }
        Expr::FormattedValue(e) => count_expr(&e.value, complexity),
        Expr::JoinedStr(e) => {
            for value in &e.values {
                count_expr(value, complexity);
            }
        }
        Expr::Attribute(e) => count_expr(&e.value, complexity),
        Expr::Subscript(e) => {
            count_expr(&e.value, complexity);
            count_expr(&e.slice, complexity);
        }
        Expr::Starred(e) => count_expr(&e.value, complexity),
        Expr::List(e) => {
            for elt in &e.elts {
                count_expr(elt, complexity);
            }
        }
        Expr::Tuple(e) => {
            for elt in &e.elts {
                count_expr(elt, complexity);
            }
        }
        Expr::Slice(e) => {
            if let Some(lower) = &e.lower {
                count_expr(lower, complexity);
            }
            if let Some(upper) = &e.upper {
                count_expr(upper, complexity);
            }
            if let Some(step) = &e.step {
                count_expr(step, complexity);
            }
        }
        _ => {}
    }
}

fn count_comprehensions(
    generators: &[rustpython_parser::ast::Comprehension],
    complexity: &mut u32,
) {
    for generator in generators {
        count_expr(&generator.target, complexity);
        count_expr(&generator.iter, complexity);
        for condition in &generator.ifs {
            count_expr(condition, complexity);
        }
    }
}

fn count_arguments(args: &Arguments, complexity: &mut u32) {
    for arg in args
        .posonlyargs
        .iter()
        .chain(&args.args)
        .chain(&args.kwonlyargs)
    {
        if let Some(default) = &arg.default {
            count_expr(default, complexity);
        }
    }
}
