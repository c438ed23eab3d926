//! Delimiter stack tracking
//!
//! [`BlockTracker`] records the currently-open block delimiters in the order
//! they were opened, validates that each close matches the most recent open,
//! and reports the current nesting depth.  The depth recorded on each
//! statement is what later lets the function extractor restrict itself to the
//! top-level statement stream.

use crate::scanner::location::SourceLocation;

const OPEN_DELIMITERS: [char; 3] = ['{', '(', '['];
const CLOSE_DELIMITERS: [char; 3] = ['}', ')', ']'];

/// Stack of currently-open block delimiters and their source positions.
///
/// Read bottom to top, the stack is the sequence of unclosed delimiters in
/// the order they were opened.  The top of the stack is the current enclosing
/// block; the stack size is the nesting depth.
#[derive(Debug, Default)]
pub struct BlockTracker {
    stack: Vec<(char, SourceLocation)>,
}

impl BlockTracker {
    pub fn new() -> Self {
        Self { stack: Vec::new() }
    }

    /// Forget all open blocks, ready for a fresh scan.
    pub fn clear(&mut self) {
        self.stack.clear();
    }

    /// Whether `ch` opens a block (`{`, `(` or `[`).
    pub fn is_open_delimiter(ch: char) -> bool {
        OPEN_DELIMITERS.contains(&ch)
    }

    /// Whether `ch` closes a block (`}`, `)` or `]`).
    pub fn is_close_delimiter(ch: char) -> bool {
        CLOSE_DELIMITERS.contains(&ch)
    }

    /// The paired delimiter for either side of a pair: `{` ↔ `}`, `(` ↔ `)`,
    /// `[` ↔ `]`.  Returns `None` for anything that is not a delimiter.
    pub fn opposite_of(ch: char) -> Option<char> {
        if let Some(idx) = OPEN_DELIMITERS.iter().position(|&open| open == ch) {
            return Some(CLOSE_DELIMITERS[idx]);
        }
        if let Some(idx) = CLOSE_DELIMITERS.iter().position(|&close| close == ch) {
            return Some(OPEN_DELIMITERS[idx]);
        }
        None
    }

    /// A new block opens: push it with the position it opened at.
    pub fn open(&mut self, ch: char, location: SourceLocation) {
        self.stack.push((ch, location));
    }

    /// A block closes.  Pops the most recent open and returns true only if it
    /// belongs to the same delimiter pair as `ch`.
    ///
    /// The pop happens even on a mismatch, so the reported depth at an error
    /// site reflects the close having consumed a stack frame.  An empty stack
    /// (nothing to close) returns false without popping.
    pub fn close(&mut self, ch: char) -> bool {
        match self.stack.pop() {
            Some((open, _)) => Self::opposite_of(open) == Some(ch),
            None => false,
        }
    }

    /// Current nesting depth: the number of unclosed blocks.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// The innermost unclosed block (the current enclosing symbol), if any.
    pub fn innermost(&self) -> Option<(char, SourceLocation)> {
        self.stack.last().copied()
    }
}
