//! Function extraction from the top-level statement stream
//!
//! C function definitions always live at nesting level 0, and after a scan a
//! definition appears as a code statement followed by its delimiter records.
//! The extractor walks the level-0 view looking for the five-entry skeleton
//! `code ( ) { }`.  Anything between `(` and `)` or `{` and `}` sits at a
//! deeper level and never shows up in that view, so parameter lists and
//! bodies would interpose their own level-0 code statements between the
//! delimiters — see the note on [`extract`] for what that implies.

use crate::scanner::location::SourceLocation;
use crate::scanner::statements::{Statement, StatementKind};
use serde::Serialize;
use std::fmt;

/// A function definition located in a scanned file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FunctionRecord {
    /// The final whitespace-delimited token of the signature statement, e.g.
    /// `main` for `int main`.
    pub name: String,
    /// Start of the signature statement (the `int` in `int main() {}`).
    pub start: SourceLocation,
    /// Position of the closing `}`.
    pub end: SourceLocation,
}

impl FunctionRecord {
    fn new(signature: &str, start: SourceLocation, end: SourceLocation) -> Self {
        let name = signature
            .split_whitespace()
            .last()
            .unwrap_or("")
            .to_string();
        Self { name, start, end }
    }

    /// Whether the 1-based `line` falls within this function's line extent.
    pub fn contains_line(&self, line: usize) -> bool {
        self.start.line <= line && line <= self.end.line
    }
}

impl fmt::Display for FunctionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (lines {}..{})",
            self.name, self.start.line, self.end.line
        )
    }
}

fn is_block(statement: &Statement, kind: StatementKind, text: &str) -> bool {
    statement.kind == kind && statement.text == text
}

/// Extract function records from the level-0 statement view, in source order.
///
/// The cursor requires five consecutive entries of the exact shape
/// `code, open "(", close ")", open "{", close "}"`.  On a mismatch partway
/// through, scanning resumes at the entry that failed; the consumed prefix is
/// never re-examined for partial matches.
///
/// Note the skeleton is deliberately narrow: a definition whose parameter
/// list or body contains any code statement (the overwhelmingly common case
/// in hand-written C) interposes extra level-0 entries and is not matched.
/// Downstream consumers rely on that exact behavior against generated
/// test-case files, so it must not be widened here.
pub fn extract(level0: &[&Statement]) -> Vec<FunctionRecord> {
    let mut records = Vec::new();
    let mut idx = 0;

    while idx < level0.len() {
        let head = level0[idx];
        if head.kind != StatementKind::Code {
            idx += 1;
            continue;
        }
        if idx + 4 >= level0.len() {
            break;
        }
        idx += 1;
        if !is_block(level0[idx], StatementKind::BlockOpen, "(") {
            continue;
        }
        idx += 1;
        if !is_block(level0[idx], StatementKind::BlockClose, ")") {
            continue;
        }
        idx += 1;
        if !is_block(level0[idx], StatementKind::BlockOpen, "{") {
            continue;
        }
        idx += 1;
        if !is_block(level0[idx], StatementKind::BlockClose, "}") {
            continue;
        }
        records.push(FunctionRecord::new(&head.text, head.start, level0[idx].end));
        idx += 1;
    }
    records
}
