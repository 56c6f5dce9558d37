//! Configuration schema definitions for qgate.
//!
//! This module contains the structs that map to `.qgate.yml`. Every field
//! has a default, so an absent or empty file yields the standard pipeline.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// An argv list: program followed by its arguments.
pub type Argv = Vec<String>;

/// Root configuration structure for `.qgate.yml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, deny_unknown_fields)]
pub struct GateConfig {
    /// Project layout
    pub project: ProjectConfig,

    /// Isolated environment settings
    pub environment: EnvironmentConfig,

    /// Commands for each external tool
    pub tools: ToolsConfig,

    /// Heuristic scan settings
    pub scans: ScanConfig,
}

/// Where the package lives inside the project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, deny_unknown_fields)]
pub struct ProjectConfig {
    /// Library source directory (auto-detected when omitted)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub library: Option<PathBuf>,

    /// Test directory
    pub tests: PathBuf,

    /// Marker file that must exist inside the library directory
    pub marker: String,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            library: None,
            tests: PathBuf::from("tests"),
            marker: "py.typed".to_string(),
        }
    }
}

/// Virtual environment settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, deny_unknown_fields)]
pub struct EnvironmentConfig {
    /// Environment directory, relative to the project root
    pub dir: PathBuf,

    /// Command that creates the environment when the directory is missing
    pub create: Argv,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("venv"),
            create: argv(&["python3", "-m", "venv", "${venv}"]),
        }
    }
}

/// Commands for every external tool the pipeline drives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, deny_unknown_fields)]
pub struct ToolsConfig {
    /// Install commands, run in order
    pub install: Vec<Argv>,

    /// Formatter in check-only mode
    pub format_check: Argv,

    /// Formatter command suggested as a fix
    pub format_fix: Argv,

    /// Linter
    pub lint: Argv,

    /// Linter autofix command suggested in the summary
    pub lint_fix: Argv,

    /// Strict type checker
    pub type_check: Argv,

    /// Test runner
    pub tests: Argv,

    /// Linter restricted to the unused-import rule
    pub unused_imports: Argv,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            install: vec![
                argv(&["pip", "install", "-e", ".[dev]"]),
                argv(&["pip", "install", "types-requests", "types-protobuf"]),
            ],
            format_check: argv(&["black", "--check", "${library}", "${tests}"]),
            format_fix: argv(&["black", "${library}", "${tests}"]),
            lint: argv(&["ruff", "check", "${library}", "${tests}"]),
            lint_fix: argv(&["ruff", "check", "--fix", "${library}", "${tests}"]),
            type_check: argv(&["mypy", "${library}", "--strict"]),
            tests: argv(&["pytest", "${tests}", "-v", "--tb=short"]),
            unused_imports: argv(&[
                "ruff",
                "check",
                "--select",
                "F401",
                "${library}",
                "${tests}",
            ]),
        }
    }
}

/// Heuristic scan settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, deny_unknown_fields)]
pub struct ScanConfig {
    /// Regex for console output calls in library code
    pub print_pattern: String,

    /// Token that marks unfinished work (matched as a literal substring)
    pub work_marker: String,

    /// Directory names skipped while scanning
    pub exclude_dirs: Vec<String>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            print_pattern: r"print\(".to_string(),
            work_marker: "TODO".to_string(),
            exclude_dirs: vec!["__pycache__".to_string()],
        }
    }
}

fn argv(parts: &[&str]) -> Argv {
    parts.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_mapping_yields_defaults() {
        let config: GateConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config, GateConfig::default());
    }

    #[test]
    fn partial_tools_keep_other_defaults() {
        let yaml = r#"
tools:
  lint: [flake8, src]
"#;
        let config: GateConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.tools.lint, vec!["flake8", "src"]);
        assert_eq!(config.tools.type_check[0], "mypy");
        assert_eq!(config.tools.install.len(), 2);
    }

    #[test]
    fn project_section_parses() {
        let yaml = r#"
project:
  library: py_micro_plumberd
  tests: test
"#;
        let config: GateConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(
            config.project.library,
            Some(PathBuf::from("py_micro_plumberd"))
        );
        assert_eq!(config.project.tests, PathBuf::from("test"));
        assert_eq!(config.project.marker, "py.typed");
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let yaml = "scans:\n  todo_token: FIXME\n";
        assert!(serde_yaml::from_str::<GateConfig>(yaml).is_err());
    }

    #[test]
    fn default_environment_uses_venv_dir() {
        let env = EnvironmentConfig::default();
        assert_eq!(env.dir, PathBuf::from("venv"));
        assert_eq!(env.create.last().map(String::as_str), Some("${venv}"));
    }

    #[test]
    fn defaults_round_trip_through_yaml() {
        let yaml = serde_yaml::to_string(&GateConfig::default()).unwrap();
        let parsed: GateConfig = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed, GateConfig::default());
    }

    #[test]
    fn schema_names_sections() {
        let schema = schemars::schema_for!(GateConfig);
        let json = serde_json::to_string(&schema).unwrap();
        assert!(json.contains("environment"));
        assert!(json.contains("unused_imports"));
    }
}
