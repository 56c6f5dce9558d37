//! Recursive regex scanner.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{GateError, Result};

use super::{ScanMatch, ScanPattern, SourceScanner};

/// Walks directory trees and matches file contents line by line.
///
/// Directories are visited in sorted order. Excluded directory names are
/// skipped at any depth, symlinks are not followed, and files that are not
/// valid UTF-8 are ignored.
#[derive(Debug, Clone)]
pub struct RegexScanner {
    base: PathBuf,
    exclude_dirs: Vec<String>,
}

impl RegexScanner {
    /// Create a scanner resolving roots against `base`.
    pub fn new(base: &Path, exclude_dirs: Vec<String>) -> Self {
        Self {
            base: base.to_path_buf(),
            exclude_dirs,
        }
    }

    fn is_excluded(&self, name: &str) -> bool {
        self.exclude_dirs.iter().any(|d| d == name)
    }

    fn walk(&self, relative: &Path, pattern: &ScanPattern, out: &mut Vec<ScanMatch>) -> Result<()> {
        let dir = self.base.join(relative);
        let mut entries = fs::read_dir(&dir)
            .map_err(|e| scan_error(relative, e))?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| scan_error(relative, e))?;
        entries.sort_by_key(|e| e.file_name());

        for entry in entries {
            let name = entry.file_name();
            let child = relative.join(&name);
            let file_type = entry.file_type().map_err(|e| scan_error(&child, e))?;

            if file_type.is_dir() {
                if !self.is_excluded(&name.to_string_lossy()) {
                    self.walk(&child, pattern, out)?;
                }
            } else if file_type.is_file() {
                self.scan_file(&child, pattern, out)?;
            }
        }

        Ok(())
    }

    fn scan_file(&self, relative: &Path, pattern: &ScanPattern, out: &mut Vec<ScanMatch>) -> Result<()> {
        let bytes = fs::read(self.base.join(relative)).map_err(|e| scan_error(relative, e))?;
        let Ok(content) = String::from_utf8(bytes) else {
            tracing::debug!("Skipping non-UTF-8 file {}", relative.display());
            return Ok(());
        };

        out.extend(
            content
                .lines()
                .enumerate()
                .filter(|(_, line)| pattern.is_match(line))
                .map(|(i, line)| ScanMatch {
                    path: relative.to_path_buf(),
                    line: i + 1,
                    text: line.trim().to_string(),
                }),
        );
        Ok(())
    }
}

fn scan_error(path: &Path, e: std::io::Error) -> GateError {
    GateError::ScanError {
        path: path.to_path_buf(),
        message: e.to_string(),
    }
}

impl SourceScanner for RegexScanner {
    fn scan(&self, roots: &[PathBuf], pattern: &ScanPattern) -> Result<Vec<ScanMatch>> {
        let mut matches = Vec::new();

        for root in roots {
            let full = self.base.join(root);
            if full.is_dir() {
                self.walk(root, pattern, &mut matches)?;
            } else if full.is_file() {
                self.scan_file(root, pattern, &mut matches)?;
            } else {
                tracing::debug!("Scan root {} does not exist, skipping", root.display());
            }
        }

        Ok(matches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, content: &[u8]) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn scanner(root: &Path) -> RegexScanner {
        RegexScanner::new(root, vec!["__pycache__".to_string()])
    }

    #[test]
    fn finds_matches_with_line_numbers() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "pkg/a.py", b"import x\n\nprint(x)\n");

        let pattern = ScanPattern::regex(r"print\(").unwrap();
        let matches = scanner(temp.path())
            .scan(&[PathBuf::from("pkg")], &pattern)
            .unwrap();

        assert_eq!(
            matches,
            vec![ScanMatch {
                path: PathBuf::from("pkg/a.py"),
                line: 3,
                text: "print(x)".to_string(),
            }]
        );
    }

    #[test]
    fn skips_excluded_directories_at_any_depth() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "pkg/__pycache__/a.py", b"print(1)\n");
        write(temp.path(), "pkg/sub/__pycache__/b.py", b"print(2)\n");

        let pattern = ScanPattern::regex(r"print\(").unwrap();
        let matches = scanner(temp.path())
            .scan(&[PathBuf::from("pkg")], &pattern)
            .unwrap();

        assert!(matches.is_empty());
    }

    #[test]
    fn ignores_binary_files() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "pkg/blob.bin", &[0xff, 0xfe, b'T', b'O', b'D', b'O']);

        let pattern = ScanPattern::literal("TODO").unwrap();
        let matches = scanner(temp.path())
            .scan(&[PathBuf::from("pkg")], &pattern)
            .unwrap();

        assert!(matches.is_empty());
    }

    #[test]
    fn missing_root_is_skipped() {
        let temp = TempDir::new().unwrap();
        let pattern = ScanPattern::literal("TODO").unwrap();
        let matches = scanner(temp.path())
            .scan(&[PathBuf::from("nope")], &pattern)
            .unwrap();
        assert!(matches.is_empty());
    }

    #[test]
    fn scans_multiple_roots_in_order() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "pkg/b.py", b"# TODO b\n");
        write(temp.path(), "pkg/a.py", b"# TODO a\n");
        write(temp.path(), "tests/test_a.py", b"# TODO t\n");

        let pattern = ScanPattern::literal("TODO").unwrap();
        let matches = scanner(temp.path())
            .scan(&[PathBuf::from("pkg"), PathBuf::from("tests")], &pattern)
            .unwrap();

        let paths: Vec<_> = matches.iter().map(|m| m.path.clone()).collect();
        assert_eq!(
            paths,
            vec![
                PathBuf::from("pkg/a.py"),
                PathBuf::from("pkg/b.py"),
                PathBuf::from("tests/test_a.py"),
            ]
        );
    }

    #[test]
    fn single_file_root_is_scanned() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "setup.py", b"print('hi')\n");

        let pattern = ScanPattern::regex(r"print\(").unwrap();
        let matches = scanner(temp.path())
            .scan(&[PathBuf::from("setup.py")], &pattern)
            .unwrap();
        assert_eq!(matches.len(), 1);
    }
}
