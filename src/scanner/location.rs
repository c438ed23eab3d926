// Source position type shared across the scanner

use serde::Serialize;
use std::fmt;

/// Source location information for error reporting and function extents.
///
/// Both fields are 1-based.  The column counts characters scanned so far on
/// the line, so a tab advances it by one like any other character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}
