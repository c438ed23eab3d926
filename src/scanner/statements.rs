//! Statement records and the accumulator that builds them
//!
//! A statement here is a maximal run of characters between delimiter or
//! separator events, tagged with the nesting level it was finalized at.
//! Delimiters themselves become single-character [`StatementKind::BlockOpen`]
//! and [`StatementKind::BlockClose`] records, so the list never contains a
//! statement straddling a bracket boundary.  The function extractor depends on
//! that: it expects a code statement and its surrounding delimiters as
//! discrete, adjacent list entries.

use crate::scanner::location::SourceLocation;
use std::fmt;

/// Classification of a statement record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementKind {
    /// Ordinary code text between separators.
    Code,
    /// A preprocessor directive: the accumulated text starts with `#`.
    Directive,
    /// A single open delimiter (`{`, `(` or `[`).
    BlockOpen,
    /// A single close delimiter (`}`, `)` or `]`).
    BlockClose,
}

impl StatementKind {
    fn label(self) -> &'static str {
        match self {
            StatementKind::Code => "code",
            StatementKind::Directive => "directive",
            StatementKind::BlockOpen => "open",
            StatementKind::BlockClose => "close",
        }
    }
}

/// One statement detected in a scanned file.
///
/// `level` is the nesting depth the statement was finalized at.  Block-open
/// records carry the depth *before* the open (the level of the surrounding
/// block) and block-close records the depth *after* the close, so an open and
/// its matching close always carry the same level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    pub kind: StatementKind,
    pub level: usize,
    pub start: SourceLocation,
    pub end: SourceLocation,
    pub text: String,
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:9} {:2} ({:3},{:3})..({:3},{:3}) {:indent$}{}",
            self.kind.label(),
            self.level,
            self.start.line,
            self.start.column,
            self.end.line,
            self.end.column,
            "",
            self.text,
            indent = 4 * self.level
        )
    }
}

/// Statement under construction: text plus its start and running end position.
#[derive(Debug)]
struct PendingStatement {
    text: String,
    start: SourceLocation,
    end: SourceLocation,
}

/// Accumulates characters into [`Statement`] records, in scan order.
#[derive(Debug, Default)]
pub struct StatementList {
    statements: Vec<Statement>,
    pending: Option<PendingStatement>,
}

impl StatementList {
    pub fn new() -> Self {
        Self {
            statements: Vec::new(),
            pending: None,
        }
    }

    /// Drop all statements and any statement under construction.
    pub fn clear(&mut self) {
        self.statements.clear();
        self.pending = None;
    }

    /// Feed one character at `location` into the statement under
    /// construction.  Plain spaces and tabs at the start of a statement are
    /// discarded rather than accumulated; once a statement has begun, every
    /// character counts and advances the end position.
    pub fn push_char(&mut self, ch: char, location: SourceLocation) {
        match &mut self.pending {
            Some(pending) => {
                pending.text.push(ch);
                pending.end = location;
            }
            None => {
                if ch != ' ' && ch != '\t' {
                    self.pending = Some(PendingStatement {
                        text: ch.to_string(),
                        start: location,
                        end: location,
                    });
                }
            }
        }
    }

    /// End of statement: stamp the statement under construction with `level`,
    /// classify it, and append it to the list.  A no-op when nothing is under
    /// construction, so repeated separators produce no spurious records.
    pub fn finish(&mut self, level: usize) {
        if let Some(pending) = self.pending.take() {
            if !pending.text.is_empty() {
                let kind = if pending.text.starts_with('#') {
                    StatementKind::Directive
                } else {
                    StatementKind::Code
                };
                self.statements.push(Statement {
                    kind,
                    level,
                    start: pending.start,
                    end: pending.end,
                    text: pending.text,
                });
            }
        }
    }

    /// Append a single-character block-open record at `location`.  `level`
    /// must be the depth of the surrounding block (the depth before the
    /// open).  Any pending statement is finalized first.
    pub fn push_block_open(&mut self, ch: char, location: SourceLocation, level: usize) {
        self.finish(level);
        self.push_block(StatementKind::BlockOpen, ch, location, level);
    }

    /// Append a single-character block-close record at `location`.  `level`
    /// must be the depth after the close (the same level as the matching
    /// open).  Any pending statement is finalized first.
    pub fn push_block_close(&mut self, ch: char, location: SourceLocation, level: usize) {
        self.finish(level);
        self.push_block(StatementKind::BlockClose, ch, location, level);
    }

    fn push_block(&mut self, kind: StatementKind, ch: char, location: SourceLocation, level: usize) {
        self.statements.push(Statement {
            kind,
            level,
            start: location,
            end: location,
            text: ch.to_string(),
        });
    }

    /// All finalized statements, in scan order.
    pub fn all(&self) -> &[Statement] {
        &self.statements
    }

    /// The in-order subsequence of statements at or above the given nesting
    /// level (that is, with `statement.level <= level`).  `at_level(0)` is the
    /// top-level view the function extractor runs on.
    pub fn at_level(&self, level: usize) -> Vec<&Statement> {
        self.statements
            .iter()
            .filter(|statement| statement.level <= level)
            .collect()
    }
}
