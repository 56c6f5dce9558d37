//! Configuration loading, parsing, and validation for qgate.
//!
//! - Schema definitions in [`schema`]
//! - File discovery and loading in [`loader`]
//! - Validation in [`validator`]
//! - Variable interpolation in [`interpolation`]
//! - Resolved project paths in [`layout`]
//!
//! # Example
//!
//! ```
//! use qgate::config::{load_config, validate};
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! fs::write(temp.path().join(".qgate.yml"), "project:\n  library: pkg\n").unwrap();
//!
//! let loaded = load_config(temp.path(), None).unwrap();
//! validate(&loaded.config).unwrap();
//! assert_eq!(loaded.config.project.library, Some("pkg".into()));
//! ```

pub mod interpolation;
pub mod layout;
pub mod loader;
pub mod schema;
pub mod validator;

pub use interpolation::{
    extract_variables, parse_interpolation, resolve_argv, resolve_string, InterpolationContext,
    Segment,
};
pub use layout::{detect_library_dir, ProjectLayout};
pub use loader::{
    deep_merge, find_project_root, load_config, load_config_value, parse_config, ConfigPaths,
    LoadedConfig, CONFIG_FILE, LOCAL_CONFIG_FILE,
};
pub use schema::{Argv, EnvironmentConfig, GateConfig, ProjectConfig, ScanConfig, ToolsConfig};
pub use validator::{validate, validate_config, ValidationError, KNOWN_VARIABLES};
