// SPDX-License-Identifier: PMPL-1.0-or-later

//! Parser front end
//!
//! Thin wrapper over `rustpython-parser` producing the statement suite the
//! tree-based passes walk. Parse failures are data here, not errors: the
//! structural pass turns them into a single critical issue.

use line_numbers::LinePositions;
use rustpython_parser::{ast::Mod, parse, Mode};

pub use rustpython_parser::ast::Suite;

/// A failed parse, reduced to what the pipeline needs.
#[derive(Debug, Clone)]
pub struct ParseFailure {
    /// 1-based line of the reported error; 1 when unknown.
    pub line: usize,
    pub message: String,
}

/// Parse `source` as a Python module. `filename` only feeds parser
/// diagnostics.
pub fn parse_module(source: &str, filename: &str) -> Result<Suite, ParseFailure> {
    match parse(source, Mode::Module, filename) {
        Ok(Mod::Module(module)) => Ok(module.body),
        // Mode::Module only ever yields Mod::Module.
        Ok(_) => Ok(Vec::new()),
        Err(err) => Err(ParseFailure {
            line: line_of_offset(source, err.offset.into()),
            message: err.error.to_string(),
        }),
    }
}

/// Convert a byte offset into a 1-based line number.
///
/// Offsets at or past end-of-input (common for unexpected-EOF errors) are
/// clamped onto the last line.
pub fn line_of_offset(source: &str, offset: usize) -> usize {
    if source.is_empty() {
        return 1;
    }
    let clamped = offset.min(source.len() - 1);
    let positions = LinePositions::from(source);
    positions.from_offset(clamped).as_usize() + 1
}
