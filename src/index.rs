//! Per-file function index
//!
//! [`FunctionIndex`] is the driver layered on top of the scanner: it walks a
//! directory tree for C sources, scans each file once, caches the resulting
//! function list keyed by the resolved absolute path, and answers point
//! queries of the form "which function contains this line?".
//!
//! A structural error in one file is fatal only for that file.  Tree scans
//! keep going and report per-file failures to the caller, which decides what
//! to do with them.

use crate::scanner::analyzer::{Analyzer, ScanError};
use crate::scanner::functions::FunctionRecord;
use rustc_hash::FxHashMap;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Failure to index a single file.
#[derive(Debug)]
pub enum IndexError {
    /// The file could not be resolved or read.
    Io { path: PathBuf, source: io::Error },
    /// The file scanned with a structural error (delimiter imbalance).
    Scan { path: PathBuf, source: ScanError },
}

impl fmt::Display for IndexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexError::Io { path, source } => {
                write!(f, "{}: {}", path.display(), source)
            }
            IndexError::Scan { path, source } => {
                write!(f, "{}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for IndexError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            IndexError::Io { source, .. } => Some(source),
            IndexError::Scan { source, .. } => Some(source),
        }
    }
}

/// Outcome of a tree scan: how many files were indexed, and which failed.
#[derive(Debug, Default)]
pub struct ScanSummary {
    pub scanned: usize,
    pub failures: Vec<IndexError>,
}

/// Cache of per-file function lists, keyed by resolved absolute path.
///
/// Each scan gets a fresh [`Analyzer`]; only the extracted function lists
/// persist here.  The cache holds empty lists too, so a file without any
/// recognized function is still scanned only once.
#[derive(Debug, Default)]
pub struct FunctionIndex {
    cache: FxHashMap<PathBuf, Vec<FunctionRecord>>,
}

impl FunctionIndex {
    pub fn new() -> Self {
        Self {
            cache: FxHashMap::default(),
        }
    }

    /// Drop every cached file.
    pub fn clear(&mut self) {
        self.cache.clear();
    }

    /// Number of files indexed so far.
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    /// Whether `path` names a C source file (`.c` or `.C` suffix).
    pub fn is_source_file(path: &Path) -> bool {
        matches!(
            path.extension().and_then(|ext| ext.to_str()),
            Some("c") | Some("C")
        )
    }

    /// Scan one file and cache its function list.  Already-indexed files are
    /// not re-read.  Returns the cached list on success.
    pub fn scan_file(&mut self, path: &Path) -> Result<&[FunctionRecord], IndexError> {
        let resolved = fs::canonicalize(path).map_err(|source| IndexError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        if !self.cache.contains_key(&resolved) {
            let functions = Self::scan_one(&resolved)?;
            self.cache.insert(resolved.clone(), functions);
        }
        Ok(self
            .cache
            .get(&resolved)
            .map(Vec::as_slice)
            .unwrap_or_default())
    }

    fn scan_one(resolved: &Path) -> Result<Vec<FunctionRecord>, IndexError> {
        let source = fs::read_to_string(resolved).map_err(|source| IndexError::Io {
            path: resolved.to_path_buf(),
            source,
        })?;
        let mut analyzer = Analyzer::new();
        analyzer.scan(&source).map_err(|source| IndexError::Scan {
            path: resolved.to_path_buf(),
            source,
        })?;
        Ok(analyzer.functions())
    }

    /// Walk the tree rooted at `root` and scan every C source file found.
    /// Per-file failures do not stop the walk; they are collected in the
    /// returned summary.
    pub fn scan_tree(&mut self, root: &Path) -> ScanSummary {
        let mut summary = ScanSummary::default();
        for entry in WalkDir::new(root).into_iter().filter_map(Result::ok) {
            if !entry.file_type().is_file() || !Self::is_source_file(entry.path()) {
                continue;
            }
            match self.scan_file(entry.path()) {
                Ok(_) => summary.scanned += 1,
                Err(err) => summary.failures.push(err),
            }
        }
        summary
    }

    /// The cached function list for `path`, if the file has been indexed.
    pub fn functions(&self, path: &Path) -> Option<&[FunctionRecord]> {
        let resolved = fs::canonicalize(path).ok()?;
        self.cache.get(&resolved).map(Vec::as_slice)
    }

    /// The function containing the 1-based `line` of `path`, if any.  First
    /// match wins; the extractor's records never overlap.
    pub fn function_at(&self, path: &Path, line: usize) -> Option<&FunctionRecord> {
        self.functions(path)?
            .iter()
            .find(|function| function.contains_line(line))
    }

    /// Iterate over the indexed files and their function lists.
    pub fn entries(&self) -> impl Iterator<Item = (&Path, &[FunctionRecord])> {
        self.cache
            .iter()
            .map(|(path, functions)| (path.as_path(), functions.as_slice()))
    }
}
