//! Scan patterns and matches.

use std::fmt;
use std::path::PathBuf;

use regex::Regex;

use crate::error::{GateError, Result};

/// A compiled pattern to search for.
#[derive(Debug, Clone)]
pub struct ScanPattern {
    regex: Regex,
}

impl ScanPattern {
    /// Compile a regular expression.
    pub fn regex(pattern: &str) -> Result<Self> {
        let regex = Regex::new(pattern).map_err(|e| GateError::ConfigValidationError {
            message: format!("invalid scan pattern '{}': {}", pattern, e),
        })?;
        Ok(Self { regex })
    }

    /// Match a literal token anywhere in a line.
    pub fn literal(token: &str) -> Result<Self> {
        Self::regex(&regex::escape(token))
    }

    /// Whether a line matches.
    pub fn is_match(&self, line: &str) -> bool {
        self.regex.is_match(line)
    }

    /// The underlying expression.
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}

/// One matching line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanMatch {
    /// File path, relative to the scanner's base directory.
    pub path: PathBuf,
    /// 1-based line number.
    pub line: usize,
    /// The line, trimmed.
    pub text: String,
}

impl fmt::Display for ScanMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}: {}", self.path.display(), self.line, self.text)
    }
}
