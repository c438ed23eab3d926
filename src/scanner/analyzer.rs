//! Source scanner state machine
//!
//! [`Analyzer`] drives a single-pass, left-to-right scan over a file's lines,
//! one character at a time, in one of four lexical modes.  Delimiter handling
//! is delegated to [`BlockTracker`] and statement accumulation to
//! [`StatementList`]; the analyzer owns both and supplies the nesting depth
//! when statements are finalized.
//!
//! A two-character lookahead (current plus next character on the same line)
//! drives the `/*`, `*/` and `//` detections.  The lookahead never crosses a
//! line boundary; the only end-of-line decision is the `\` continuation check
//! for preprocessor directives.

use crate::scanner::blocks::BlockTracker;
use crate::scanner::functions::{self, FunctionRecord};
use crate::scanner::location::SourceLocation;
use crate::scanner::statements::{Statement, StatementList};
use std::fmt;

/// Lexical mode at the current scan position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LexMode {
    /// Ordinary code.
    Code,
    /// Inside `/* ... */`; the body is not accumulated.
    BlockComment,
    /// Inside `" ... "`; the body is not accumulated.
    StringLiteral,
    /// Inside a `#` directive; runs to end of line unless continued with `\`.
    Directive,
}

/// Structural scan failure.  Both variants are fatal for the file being
/// scanned: the statement list is not usable after either.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanError {
    /// A close delimiter did not match the most recent open, or there was
    /// nothing to close.  `expected` is the close the enclosing block wanted,
    /// if there was an enclosing block at all.
    MismatchedDelimiter {
        found: char,
        expected: Option<char>,
        location: SourceLocation,
    },
    /// End of input with unclosed blocks still on the stack.  `opened_at`
    /// identifies the innermost block left open; `location` is the final
    /// position the scan reached.
    UnterminatedBlock {
        delimiter: char,
        opened_at: SourceLocation,
        location: SourceLocation,
    },
}

impl ScanError {
    /// The position the error was raised at.
    pub fn location(&self) -> SourceLocation {
        match self {
            ScanError::MismatchedDelimiter { location, .. }
            | ScanError::UnterminatedBlock { location, .. } => *location,
        }
    }
}

impl fmt::Display for ScanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScanError::MismatchedDelimiter {
                found,
                expected,
                location,
            } => match expected {
                Some(expected) => write!(
                    f,
                    "mismatched delimiter '{}' at {} (expected '{}')",
                    found, location, expected
                ),
                None => write!(
                    f,
                    "mismatched delimiter '{}' at {} (no open block)",
                    found, location
                ),
            },
            ScanError::UnterminatedBlock {
                delimiter,
                opened_at,
                location,
            } => write!(
                f,
                "unterminated block at {}: '{}' opened at {} was never closed",
                location, delimiter, opened_at
            ),
        }
    }
}

impl std::error::Error for ScanError {}

/// Scans one file's text into a statement list.
///
/// All state is per-scan: [`Analyzer::scan`] resets the tracker, the
/// statement list, and the lexical mode before consuming the input, so an
/// analyzer may be reused across files (or the same file twice, yielding
/// identical results).
#[derive(Debug, Default)]
pub struct Analyzer {
    blocks: BlockTracker,
    statements: StatementList,
}

/// Mode plus the last position examined; live only for the duration of one
/// scan.
#[derive(Debug)]
struct ScanState {
    mode: LexMode,
    last: SourceLocation,
}

impl Analyzer {
    pub fn new() -> Self {
        Self {
            blocks: BlockTracker::new(),
            statements: StatementList::new(),
        }
    }

    /// Scan `source` line by line.  Returns a structural error on a
    /// mismatched close delimiter or on unclosed blocks at end of input;
    /// on success the accumulated statements are available via
    /// [`Analyzer::statements`].
    pub fn scan(&mut self, source: &str) -> Result<(), ScanError> {
        self.blocks.clear();
        self.statements.clear();
        let mut state = ScanState {
            mode: LexMode::Code,
            last: SourceLocation::new(0, 0),
        };

        for (index, raw_line) in source.lines().enumerate() {
            let line_number = index + 1;
            self.scan_line(&mut state, line_number, raw_line.trim_end())?;
        }

        // End of input: every opened block must have been closed.
        if let Some((delimiter, opened_at)) = self.blocks.innermost() {
            return Err(ScanError::UnterminatedBlock {
                delimiter,
                opened_at,
                location: state.last,
            });
        }
        Ok(())
    }

    fn scan_line(
        &mut self,
        state: &mut ScanState,
        line_number: usize,
        line: &str,
    ) -> Result<(), ScanError> {
        let chars: Vec<char> = line.chars().collect();
        let mut col = 0;

        // Leading whitespace is skipped, but the column still advances.
        while col < chars.len() && (chars[col] == ' ' || chars[col] == '\t') {
            col += 1;
        }

        while col < chars.len() {
            let ch = chars[col];
            let next = chars.get(col + 1).copied();
            col += 1;
            let location = SourceLocation::new(line_number, col);
            state.last = location;

            match state.mode {
                LexMode::BlockComment => {
                    if ch == '*' && next == Some('/') {
                        state.mode = LexMode::Code;
                        col += 1;
                    }
                }
                LexMode::StringLiteral => {
                    if ch == '"' {
                        state.mode = LexMode::Code;
                    }
                }
                LexMode::Directive => {
                    self.statements.push_char(ch, location);
                }
                LexMode::Code => {
                    if ch == '"' {
                        state.mode = LexMode::StringLiteral;
                    } else if BlockTracker::is_open_delimiter(ch) {
                        self.statements.finish(self.blocks.depth());
                        self.blocks.open(ch, location);
                        self.statements
                            .push_block_open(ch, location, self.blocks.depth() - 1);
                    } else if BlockTracker::is_close_delimiter(ch) {
                        self.statements.finish(self.blocks.depth());
                        let expected = self
                            .blocks
                            .innermost()
                            .and_then(|(open, _)| BlockTracker::opposite_of(open));
                        if self.blocks.close(ch) {
                            self.statements
                                .push_block_close(ch, location, self.blocks.depth());
                        } else {
                            return Err(ScanError::MismatchedDelimiter {
                                found: ch,
                                expected,
                                location,
                            });
                        }
                    } else if ch == '/' && next == Some('*') {
                        state.mode = LexMode::BlockComment;
                        col += 1;
                    } else if ch == '/' && next == Some('/') {
                        // The rest of the line is a comment.
                        return Ok(());
                    } else if ch == '#' {
                        self.statements.finish(self.blocks.depth());
                        state.mode = LexMode::Directive;
                        self.statements.push_char(ch, location);
                    } else if ch == ';' {
                        self.statements.finish(self.blocks.depth());
                    } else {
                        self.statements.push_char(ch, location);
                    }
                }
            }
        }

        // End of physical line: a directive ends here unless its last
        // character is a `\` continuation.
        if state.mode == LexMode::Directive && !line.ends_with('\\') {
            self.statements.finish(self.blocks.depth());
            state.mode = LexMode::Code;
        }
        Ok(())
    }

    /// All statements accumulated by the last scan, in source order.
    pub fn statements(&self) -> &[Statement] {
        self.statements.all()
    }

    /// The statements at or above the given nesting level, in source order.
    pub fn statements_at_level(&self, level: usize) -> Vec<&Statement> {
        self.statements.at_level(level)
    }

    /// Extract the function records from the top-level statement stream of
    /// the last scan, in source order.
    pub fn functions(&self) -> Vec<FunctionRecord> {
        functions::extract(&self.statements.at_level(0))
    }
}
