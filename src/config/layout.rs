//! Resolved project layout.
//!
//! Turns the `project` and `environment` sections of the configuration into
//! concrete paths, auto-detecting the library directory when it is not
//! configured.

use std::fs;
use std::path::{Path, PathBuf};

use super::interpolation::InterpolationContext;
use super::schema::GateConfig;

/// Directory used when no package directory can be detected.
pub const FALLBACK_LIBRARY_DIR: &str = "src";

/// Concrete project paths for one run.
///
/// `library`, `tests` and `venv` stay relative to `root` so that commands
/// and messages show the same short paths a developer would type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    /// Absolute project root.
    pub root: PathBuf,
    /// Library directory, relative to root.
    pub library: PathBuf,
    /// Test directory, relative to root.
    pub tests: PathBuf,
    /// Virtual environment directory, relative to root.
    pub venv: PathBuf,
    /// Marker file name inside the library directory.
    pub marker: String,
}

impl ProjectLayout {
    /// Resolve the layout for a project root.
    ///
    /// A relative root is made absolute against the current directory, since
    /// tools run with the root as their working directory.
    pub fn resolve(root: &Path, config: &GateConfig) -> Self {
        let root = std::path::absolute(root).unwrap_or_else(|_| root.to_path_buf());
        let root = root.as_path();
        let library = config
            .project
            .library
            .clone()
            .unwrap_or_else(|| detect_library_dir(root, config));

        Self {
            root: root.to_path_buf(),
            library,
            tests: config.project.tests.clone(),
            venv: config.environment.dir.clone(),
            marker: config.project.marker.clone(),
        }
    }

    /// Marker path relative to root.
    pub fn marker_path(&self) -> PathBuf {
        self.library.join(&self.marker)
    }

    /// Absolute path of a root-relative path.
    pub fn abs(&self, relative: &Path) -> PathBuf {
        self.root.join(relative)
    }

    /// Variables available to tool commands.
    pub fn interpolation_context(&self) -> InterpolationContext {
        let mut ctx = InterpolationContext::new();
        ctx.insert("root", self.root.display().to_string());
        ctx.insert("library", self.library.display().to_string());
        ctx.insert("tests", self.tests.display().to_string());
        ctx.insert("venv", self.venv.display().to_string());
        ctx.insert("marker", self.marker.clone());
        ctx
    }
}

/// Find the package directory: the first (sorted) top-level directory that
/// holds an `__init__.py`, ignoring hidden dirs, the test dir and the venv.
pub fn detect_library_dir(root: &Path, config: &GateConfig) -> PathBuf {
    let skip = [
        config.project.tests.as_path(),
        config.environment.dir.as_path(),
    ];

    let mut candidates: Vec<PathBuf> = match fs::read_dir(root) {
        Ok(entries) => entries
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| p.is_dir())
            .filter_map(|p| p.file_name().map(PathBuf::from))
            .filter(|name| !name.to_string_lossy().starts_with('.'))
            .filter(|name| !skip.contains(&name.as_path()))
            .filter(|name| root.join(name).join("__init__.py").is_file())
            .collect(),
        Err(e) => {
            tracing::debug!("Cannot list {}: {}", root.display(), e);
            Vec::new()
        }
    };
    candidates.sort();

    match candidates.into_iter().next() {
        Some(dir) => {
            tracing::debug!("Detected library directory: {}", dir.display());
            dir
        }
        None => PathBuf::from(FALLBACK_LIBRARY_DIR),
    }
}
