//! # Introduction
//!
//! cscan scans C source files, tracking nested block structure (braces,
//! parentheses, brackets), classifying the text between delimiters into
//! statements, and using the resulting statement stream to locate function
//! definitions and their line extents.  The primary question it answers is:
//! given a file and a line number, which function contains that line?
//!
//! ## Scan pipeline
//!
//! ```text
//! Source lines → Analyzer → {BlockTracker, StatementList} → FunctionRecords → FunctionIndex
//! ```
//!
//! 1. [`scanner`] — the character-by-character scanner:
//!    [`scanner::blocks::BlockTracker`] validates delimiter nesting,
//!    [`scanner::statements::StatementList`] accumulates statement records,
//!    [`scanner::analyzer::Analyzer`] drives the scan, and
//!    [`scanner::functions`] extracts function records from the top-level
//!    statement stream.
//! 2. [`index`] — a directory-walking driver that caches per-file function
//!    lists and answers line-to-function point queries.
//!
//! ## What the scanner is not
//!
//! It is not a C parser.  It builds no syntax tree, expands no macros, and
//! validates nothing beyond paired-delimiter correctness.  Preprocessor
//! directives are accumulated as opaque one-statement lines (honoring `\`
//! continuations) and comment and string-literal bodies are skipped entirely.

pub mod index;
pub mod scanner;
