//! Configuration file discovery and loading.
//!
//! qgate reads up to two files from the project root, later overriding
//! earlier:
//!
//! 1. Project config (`.qgate.yml`)
//! 2. Local overrides (`.qgate.local.yml`, meant to stay untracked)
//!
//! When neither exists, the built-in defaults apply.

use crate::config::schema::GateConfig;
use crate::error::{GateError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Project config file name.
pub const CONFIG_FILE: &str = ".qgate.yml";

/// Local override file name.
pub const LOCAL_CONFIG_FILE: &str = ".qgate.local.yml";

/// Files that mark a Python project root.
const ROOT_MARKERS: &[&str] = &[CONFIG_FILE, "pyproject.toml", "setup.py", "setup.cfg"];

/// Paths to configuration files in merge order.
#[derive(Debug, Clone, Default)]
pub struct ConfigPaths {
    /// Project config: .qgate.yml (or an explicit --config path)
    pub project: Option<PathBuf>,

    /// Local overrides: .qgate.local.yml
    pub project_local: Option<PathBuf>,
}

impl ConfigPaths {
    /// Discover config files for the given project root.
    pub fn discover(project_root: &Path) -> Self {
        Self {
            project: existing(project_root.join(CONFIG_FILE)),
            project_local: existing(project_root.join(LOCAL_CONFIG_FILE)),
        }
    }

    /// Returns all existing config paths in merge order.
    pub fn all_existing(&self) -> Vec<&PathBuf> {
        self.project.iter().chain(self.project_local.iter()).collect()
    }
}

fn existing(path: PathBuf) -> Option<PathBuf> {
    if path.is_file() {
        Some(path)
    } else {
        None
    }
}

/// A configuration together with the files it came from.
#[derive(Debug, Clone, Default)]
pub struct LoadedConfig {
    /// Merged, parsed configuration.
    pub config: GateConfig,
    /// Files that contributed, in merge order.
    pub sources: Vec<PathBuf>,
}

/// Find the project root by walking up from `start`.
///
/// Looks for `.qgate.yml` or Python packaging files, falling back to a
/// `.git` directory.
pub fn find_project_root(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();

    loop {
        if ROOT_MARKERS.iter().any(|m| current.join(m).is_file()) {
            return Some(current);
        }

        if current.join(".git").exists() {
            return Some(current);
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Load configuration for a project.
///
/// With `explicit`, that file replaces `.qgate.yml` and must exist. Local
/// overrides are applied in both cases.
///
/// # Errors
///
/// Returns `ConfigNotFound` if `explicit` doesn't exist.
/// Returns `ConfigParseError` if any file is invalid.
pub fn load_config(project_root: &Path, explicit: Option<&Path>) -> Result<LoadedConfig> {
    let mut paths = ConfigPaths::discover(project_root);

    if let Some(path) = explicit {
        if !path.is_file() {
            return Err(GateError::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }
        paths.project = Some(path.to_path_buf());
    }

    let mut merged = serde_yaml::Value::Mapping(serde_yaml::Mapping::new());
    let mut sources = Vec::new();

    for path in paths.all_existing() {
        tracing::debug!("Loading config from {}", path.display());
        let value = load_config_value(path)?;
        deep_merge(&mut merged, value);
        sources.push(path.clone());
    }

    let origin = sources
        .last()
        .cloned()
        .unwrap_or_else(|| project_root.join(CONFIG_FILE));
    let config = serde_yaml::from_value(merged).map_err(|e| GateError::ConfigParseError {
        path: origin,
        message: e.to_string(),
    })?;

    Ok(LoadedConfig { config, sources })
}

/// Parse YAML content into GateConfig.
pub fn parse_config(content: &str, source_path: &Path) -> Result<GateConfig> {
    if content.trim().is_empty() {
        return Ok(GateConfig::default());
    }
    serde_yaml::from_str(content).map_err(|e| GateError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load a config file as a raw YAML value (for merging).
///
/// Empty files count as an empty mapping.
pub fn load_config_value(path: &Path) -> Result<serde_yaml::Value> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            GateError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            GateError::Io(e)
        }
    })?;

    if content.trim().is_empty() {
        return Ok(serde_yaml::Value::Mapping(serde_yaml::Mapping::new()));
    }

    let value: serde_yaml::Value =
        serde_yaml::from_str(&content).map_err(|e| GateError::ConfigParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    match value {
        serde_yaml::Value::Mapping(_) => Ok(value),
        serde_yaml::Value::Null => Ok(serde_yaml::Value::Mapping(serde_yaml::Mapping::new())),
        _ => Err(GateError::ConfigParseError {
            path: path.to_path_buf(),
            message: "top level must be a mapping".to_string(),
        }),
    }
}

/// Merge `overlay` into `base`. Mappings merge key by key; everything else
/// (including lists) is replaced.
pub fn deep_merge(base: &mut serde_yaml::Value, overlay: serde_yaml::Value) {
    match (base, overlay) {
        (serde_yaml::Value::Mapping(base_map), serde_yaml::Value::Mapping(overlay_map)) => {
            for (key, value) in overlay_map {
                match base_map.get_mut(&key) {
                    Some(existing) => deep_merge(existing, value),
                    None => {
                        base_map.insert(key, value);
                    }
                }
            }
        }
        (base, overlay) => *base = overlay,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_files_yield_defaults() {
        let temp = TempDir::new().unwrap();
        let loaded = load_config(temp.path(), None).unwrap();
        assert_eq!(loaded.config, GateConfig::default());
        assert!(loaded.sources.is_empty());
    }

    #[test]
    fn project_config_is_loaded() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(CONFIG_FILE),
            "project:\n  library: pkg\n",
        )
        .unwrap();

        let loaded = load_config(temp.path(), None).unwrap();
        assert_eq!(loaded.config.project.library, Some(PathBuf::from("pkg")));
        assert_eq!(loaded.sources.len(), 1);
    }

    #[test]
    fn local_overrides_merge_over_project() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(CONFIG_FILE),
            "project:\n  library: pkg\n  tests: tests\n",
        )
        .unwrap();
        fs::write(
            temp.path().join(LOCAL_CONFIG_FILE),
            "project:\n  tests: test_suite\n",
        )
        .unwrap();

        let loaded = load_config(temp.path(), None).unwrap();
        assert_eq!(loaded.config.project.library, Some(PathBuf::from("pkg")));
        assert_eq!(loaded.config.project.tests, PathBuf::from("test_suite"));
        assert_eq!(loaded.sources.len(), 2);
    }

    #[test]
    fn explicit_config_must_exist() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope.yml");
        let err = load_config(temp.path(), Some(&missing)).unwrap_err();
        assert!(matches!(err, GateError::ConfigNotFound { .. }));
    }

    #[test]
    fn explicit_config_replaces_project_file() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(CONFIG_FILE), "project:\n  library: a\n").unwrap();
        let other = temp.path().join("ci.yml");
        fs::write(&other, "project:\n  library: b\n").unwrap();

        let loaded = load_config(temp.path(), Some(&other)).unwrap();
        assert_eq!(loaded.config.project.library, Some(PathBuf::from("b")));
    }

    #[test]
    fn empty_file_is_defaults() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(CONFIG_FILE), "  \n").unwrap();
        let loaded = load_config(temp.path(), None).unwrap();
        assert_eq!(loaded.config, GateConfig::default());
    }

    #[test]
    fn invalid_yaml_is_parse_error() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(CONFIG_FILE), "project: [unclosed\n").unwrap();
        let err = load_config(temp.path(), None).unwrap_err();
        assert!(matches!(err, GateError::ConfigParseError { .. }));
    }

    #[test]
    fn non_mapping_top_level_is_parse_error() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(CONFIG_FILE), "- a\n- b\n").unwrap();
        let err = load_config(temp.path(), None).unwrap_err();
        assert!(err.to_string().contains("mapping"));
    }

    #[test]
    fn parse_config_handles_empty_content() {
        let config = parse_config("", Path::new("x.yml")).unwrap();
        assert_eq!(config, GateConfig::default());
    }

    #[test]
    fn find_project_root_walks_up_to_pyproject() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("pyproject.toml"), "[project]\n").unwrap();
        let nested = temp.path().join("pkg").join("sub");
        fs::create_dir_all(&nested).unwrap();

        assert_eq!(find_project_root(&nested), Some(temp.path().to_path_buf()));
    }

    #[test]
    fn deep_merge_replaces_lists() {
        let mut base: serde_yaml::Value =
            serde_yaml::from_str("tools:\n  lint: [ruff, check]\n  tests: [pytest]\n").unwrap();
        let overlay: serde_yaml::Value = serde_yaml::from_str("tools:\n  lint: [flake8]\n").unwrap();

        deep_merge(&mut base, overlay);

        let config: GateConfig = serde_yaml::from_value(base).unwrap();
        assert_eq!(config.tools.lint, vec!["flake8"]);
        assert_eq!(config.tools.tests, vec!["pytest"]);
    }
}
