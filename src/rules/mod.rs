// SPDX-License-Identifier: PMPL-1.0-or-later

//! Pattern rule registry
//!
//! Two fixed, ordered rule sequences (security and performance), built once
//! and read-only afterwards, so a table can be shared freely across
//! concurrent analyses. Rules are plain data: a compiled line matcher plus
//! the metadata copied onto every issue the matcher produces. There is no
//! dynamic rule loading.

use crate::types::Severity;
use regex::Regex;

/// A single line-oriented pattern rule.
#[derive(Debug, Clone)]
pub struct Rule {
    pub matcher: Regex,
    pub severity: Severity,
    pub description: &'static str,
    pub suggestion: &'static str,
    pub confidence: f64,
}

impl Rule {
    /// Confidence applied when a rule does not set its own.
    pub const DEFAULT_CONFIDENCE: f64 = 0.9;

    fn new(
        pattern: &str,
        severity: Severity,
        description: &'static str,
        suggestion: &'static str,
    ) -> Self {
        Self {
            matcher: Regex::new(pattern).expect("rule pattern must compile"),
            severity,
            description,
            suggestion,
            confidence: Self::DEFAULT_CONFIDENCE,
        }
    }

    fn with_confidence(
        pattern: &str,
        severity: Severity,
        description: &'static str,
        suggestion: &'static str,
        confidence: f64,
    ) -> Self {
        Self {
            confidence,
            ..Self::new(pattern, severity, description, suggestion)
        }
    }
}

/// The process-wide rule registry.
pub struct RuleTable {
    security: Vec<Rule>,
    performance: Vec<Rule>,
}

impl RuleTable {
    pub fn new() -> Self {
        Self {
            security: security_rules(),
            performance: performance_rules(),
        }
    }

    pub fn security(&self) -> &[Rule] {
        &self.security
    }

    pub fn performance(&self) -> &[Rule] {
        &self.performance
    }
}

impl Default for RuleTable {
    fn default() -> Self {
        Self::new()
    }
}

fn security_rules() -> Vec<Rule> {
    vec![
        Rule::with_confidence(
            r"eval\s*\(",
            Severity::Critical,
            "Use of eval() can lead to code injection",
            "Use ast.literal_eval() for safe evaluation",
            0.95,
        ),
        Rule::with_confidence(
            r"exec\s*\(",
            Severity::Critical,
            "Use of exec() can execute arbitrary code",
            "Avoid exec() or use restricted execution environment",
            0.95,
        ),
        Rule::new(
            r"pickle\.loads?\s*\(",
            Severity::High,
            "Pickle deserialization can execute arbitrary code",
            "Use json or other safe serialization formats",
        ),
        Rule::with_confidence(
            r"(subprocess|os)\.(system|popen|check_output)\s*\(",
            Severity::High,
            "Shell command execution without proper sanitization",
            "Use subprocess.run() with shell=False and proper input validation",
            0.85,
        ),
        Rule::with_confidence(
            r"input\s*\(",
            Severity::Medium,
            "Direct user input without validation",
            "Validate and sanitize all user inputs",
            0.80,
        ),
        Rule::new(
            r"Crypto\.Random\.random\(\)",
            Severity::High,
            "Use of insecure random number generator",
            "Use secrets module for cryptographically secure random numbers",
        ),
        Rule::with_confidence(
            r"(md5|sha1)\.update\(",
            Severity::High,
            "Use of weak cryptographic hash functions",
            "Use SHA-256 or stronger hash functions",
            0.85,
        ),
        Rule::with_confidence(
            r"password\s*=\s*.*",
            Severity::Medium,
            "Potential hardcoded password",
            "Use environment variables or secure configuration management",
            0.70,
        ),
    ]
}

fn performance_rules() -> Vec<Rule> {
    vec![
        Rule::with_confidence(
            r"for\s+\w+\s+in\s+range\s*\(\s*len\s*\(",
            Severity::Medium,
            "Inefficient iteration pattern",
            "Use enumerate() or iterate directly over the sequence",
            0.80,
        ),
        Rule::with_confidence(
            r"\.append\s*\(\s*\)\s*in\s+for",
            Severity::Low,
            "List comprehension might be more efficient",
            "Consider using list comprehension",
            0.70,
        ),
        // Requires a newline, so it can never hit during line-oriented
        // scanning; kept so the registry matches the published rule set.
        Rule::with_confidence(
            r"import\s+(\w+).*\n.*\w+\.\w+\(.*\)\s*\*\s*1000",
            Severity::Medium,
            "Inefficient repeated function calls",
            "Store function reference in a variable to avoid repeated attribute access",
            0.75,
        ),
        Rule::with_confidence(
            r"global\s+\w+",
            Severity::Medium,
            "Use of global variables reduces code maintainability",
            "Pass variables as parameters or use class attributes",
            0.80,
        ),
        Rule::with_confidence(
            r"with\s+open\([^)]*\)\s+as\s+\w+:\s*\w+\.read\(\)",
            Severity::Medium,
            "Reading entire file into memory may cause memory issues",
            "Process file in chunks or use streaming approach for large files",
            0.85,
        ),
        Rule::with_confidence(
            r"\.sort\(\s*key\s*=.*\)\s*\[\s*-1\s*\]",
            Severity::Medium,
            "Inefficient way to find maximum element",
            "Use max() function with key parameter instead",
            0.80,
        ),
        Rule::with_confidence(
            r"list\(.*\)\.index\(",
            Severity::Medium,
            "Linear search with O(n) complexity",
            "Use set or dict for O(1) lookup if possible",
            0.75,
        ),
    ]
}
