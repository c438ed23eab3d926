//! C source block scanner
//!
//! This module turns C source text into a flat list of statement records and
//! extracts function definitions from it:
//! - [`blocks`]: delimiter stack tracking (`{}`, `()`, `[]`)
//! - [`statements`]: statement records and the accumulator that builds them
//! - [`analyzer`]: the line-by-line, character-by-character scan
//! - [`functions`]: function extraction from the top-level statement stream
//! - [`location`]: 1-based (line, column) source positions
//!
//! # Scanning model
//!
//! The scanner is a four-mode state machine (code, block comment, string
//! literal, preprocessor directive).  In code mode every delimiter character
//! both finalizes the statement under construction and emits a single-character
//! block-open or block-close record, so statements never straddle a delimiter.
//! Comment and string bodies are consumed without producing any statements.
//!
//! # Error model
//!
//! The only failures are structural: a close delimiter that does not match the
//! most recent open, and a non-empty delimiter stack at end of input.  Both
//! carry a source position and abort the scan of the file.  Anything else —
//! unterminated comments or strings at end of file, directives without
//! continuations, statement runs that merely fail to look like a function —
//! is tolerated silently.

pub mod analyzer;
pub mod blocks;
pub mod functions;
pub mod location;
pub mod statements;
