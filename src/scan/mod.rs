//! Heuristic source scanning.
//!
//! Scans are best-effort text searches, not static analysis. The pipeline
//! only sees the [`SourceScanner`] trait, so a smarter implementation can
//! replace [`RegexScanner`] without touching the steps that use it.
//!
//! # Example
//!
//! ```
//! use qgate::scan::{RegexScanner, ScanPattern, SourceScanner};
//! use std::fs;
//! use std::path::PathBuf;
//! use tempfile::TempDir;
//!
//! let temp = TempDir::new().unwrap();
//! fs::create_dir_all(temp.path().join("pkg")).unwrap();
//! fs::write(temp.path().join("pkg/a.py"), "x = 1\n# TODO: tidy\n").unwrap();
//!
//! let scanner = RegexScanner::new(temp.path(), vec!["__pycache__".into()]);
//! let pattern = ScanPattern::literal("TODO").unwrap();
//! let matches = scanner.scan(&[PathBuf::from("pkg")], &pattern).unwrap();
//! assert_eq!(matches.len(), 1);
//! assert_eq!(matches[0].line, 2);
//! ```

pub mod pattern;
pub mod walker;

pub use pattern::{ScanMatch, ScanPattern};
pub use walker::RegexScanner;

use crate::error::Result;
use std::path::PathBuf;

/// Searches source trees for a pattern.
pub trait SourceScanner {
    /// Every line under `roots` that matches `pattern`, in path order.
    fn scan(&self, roots: &[PathBuf], pattern: &ScanPattern) -> Result<Vec<ScanMatch>>;
}
