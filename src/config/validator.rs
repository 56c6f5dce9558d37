//! Configuration validation rules.
//!
//! - Every tool command must name a program
//! - Layout paths must be non-empty and relative to the project root
//! - Command arguments may only reference known variables
//! - Scan patterns must compile

use crate::config::interpolation::extract_variables;
use crate::config::schema::{Argv, GateConfig};
use crate::error::{GateError, Result};
use std::path::Path;

/// Variables every command may reference.
pub const KNOWN_VARIABLES: &[&str] = &["root", "library", "tests", "venv", "marker"];

/// Validation error with context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Config field, e.g. `tools.lint`
    pub field: String,
    /// Human-readable error message
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a configuration and return all errors.
pub fn validate_config(config: &GateConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if let Some(library) = &config.project.library {
        check_relative(&mut errors, "project.library", library);
    }
    check_relative(&mut errors, "project.tests", &config.project.tests);
    check_relative(&mut errors, "environment.dir", &config.environment.dir);

    if config.project.marker.trim().is_empty() {
        errors.push(error("project.marker", "must not be empty"));
    } else if config.project.marker.contains(['/', '\\']) {
        errors.push(error(
            "project.marker",
            "must be a file name, not a path",
        ));
    }

    check_argv(&mut errors, "environment.create", &config.environment.create);

    let tools = &config.tools;
    for (i, argv) in tools.install.iter().enumerate() {
        check_argv(&mut errors, &format!("tools.install[{}]", i), argv);
    }
    check_argv(&mut errors, "tools.format_check", &tools.format_check);
    check_argv(&mut errors, "tools.format_fix", &tools.format_fix);
    check_argv(&mut errors, "tools.lint", &tools.lint);
    check_argv(&mut errors, "tools.lint_fix", &tools.lint_fix);
    check_argv(&mut errors, "tools.type_check", &tools.type_check);
    check_argv(&mut errors, "tools.tests", &tools.tests);
    check_argv(&mut errors, "tools.unused_imports", &tools.unused_imports);

    if let Err(e) = regex::Regex::new(&config.scans.print_pattern) {
        errors.push(error("scans.print_pattern", &e.to_string()));
    }
    if config.scans.work_marker.trim().is_empty() {
        errors.push(error("scans.work_marker", "must not be empty"));
    }

    errors
}

/// Validate and fail on the first batch of errors.
pub fn validate(config: &GateConfig) -> Result<()> {
    let errors = validate_config(config);
    if errors.is_empty() {
        return Ok(());
    }

    let message = errors
        .iter()
        .map(ValidationError::to_string)
        .collect::<Vec<_>>()
        .join("; ");
    Err(GateError::ConfigValidationError { message })
}

fn error(field: &str, message: &str) -> ValidationError {
    ValidationError {
        field: field.to_string(),
        message: message.to_string(),
    }
}

fn check_relative(errors: &mut Vec<ValidationError>, field: &str, path: &Path) {
    if path.as_os_str().is_empty() {
        errors.push(error(field, "must not be empty"));
    } else if path.is_absolute() {
        errors.push(error(field, "must be relative to the project root"));
    }
}

fn check_argv(errors: &mut Vec<ValidationError>, field: &str, argv: &Argv) {
    match argv.first() {
        None => errors.push(error(field, "must name a program")),
        Some(program) if program.trim().is_empty() => {
            errors.push(error(field, "program must not be blank"))
        }
        Some(_) => {}
    }

    for arg in argv {
        for var in extract_variables(arg) {
            if !KNOWN_VARIABLES.contains(&var.as_str()) {
                errors.push(error(
                    field,
                    &format!(
                        "unknown variable '${{{}}}' (known: {})",
                        var,
                        KNOWN_VARIABLES.join(", ")
                    ),
                ));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn default_config_is_valid() {
        assert!(validate_config(&GateConfig::default()).is_empty());
        assert!(validate(&GateConfig::default()).is_ok());
    }

    #[test]
    fn empty_command_is_reported_with_field() {
        let mut config = GateConfig::default();
        config.tools.lint = Vec::new();

        let errors = validate_config(&config);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "tools.lint");
    }

    #[test]
    fn empty_install_entry_is_indexed() {
        let mut config = GateConfig::default();
        config.tools.install.push(Vec::new());

        let errors = validate_config(&config);
        assert_eq!(errors[0].field, "tools.install[2]");
    }

    #[test]
    fn unknown_variable_is_reported() {
        let mut config = GateConfig::default();
        config.tools.tests = vec!["pytest".to_string(), "${package}".to_string()];

        let errors = validate_config(&config);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("package"));
    }

    #[test]
    fn absolute_paths_are_rejected() {
        let mut config = GateConfig::default();
        config.environment.dir = PathBuf::from("/opt/venv");

        let errors = validate_config(&config);
        assert_eq!(errors[0].field, "environment.dir");
    }

    #[test]
    fn marker_must_be_a_file_name() {
        let mut config = GateConfig::default();
        config.project.marker = "sub/py.typed".to_string();
        assert_eq!(validate_config(&config)[0].field, "project.marker");
    }

    #[test]
    fn bad_regex_is_reported() {
        let mut config = GateConfig::default();
        config.scans.print_pattern = "print(".to_string();
        assert_eq!(validate_config(&config)[0].field, "scans.print_pattern");
    }

    #[test]
    fn validate_joins_all_errors() {
        let mut config = GateConfig::default();
        config.tools.lint = Vec::new();
        config.tools.tests = Vec::new();

        let msg = validate(&config).unwrap_err().to_string();
        assert!(msg.contains("tools.lint"));
        assert!(msg.contains("tools.tests"));
    }
}
