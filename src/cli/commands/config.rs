//! Config command implementation.
//!
//! The `qgate config` command shows resolved configuration, or the JSON
//! schema of the config file.

use std::path::{Path, PathBuf};

use crate::cli::args::ConfigArgs;
use crate::config::GateConfig;
use crate::error::{GateError, Result};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};
use super::{load_project, CONFIG_ERROR_EXIT};

/// The config command implementation.
pub struct ConfigCommand {
    project_root: PathBuf,
    config_path: Option<PathBuf>,
    args: ConfigArgs,
}

impl ConfigCommand {
    /// Create a new config command.
    pub fn new(project_root: &Path, config_path: Option<&Path>, args: ConfigArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            config_path: config_path.map(Path::to_path_buf),
            args,
        }
    }

    /// Get the project root path.
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }
}

impl Command for ConfigCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        if self.args.schema {
            let schema = schemars::schema_for!(GateConfig);
            let json =
                serde_json::to_string_pretty(&schema).map_err(|e| GateError::Other(e.into()))?;
            ui.message(&json);
            return Ok(CommandResult::success());
        }

        let Some(mut project) =
            load_project(&self.project_root, self.config_path.as_deref(), ui)?
        else {
            return Ok(CommandResult::failure(CONFIG_ERROR_EXIT));
        };

        // Show the detected library so the output is a complete config.
        project.config.project.library = Some(project.layout.library.clone());

        if project.sources.is_empty() {
            ui.message("# built-in defaults");
        }
        for path in &project.sources {
            ui.message(&format!("# {}", path.display()));
        }

        if self.args.json {
            let json = serde_json::to_string_pretty(&project.config)
                .map_err(|e| GateError::Other(e.into()))?;
            ui.message(&json);
        } else {
            let yaml =
                serde_yaml::to_string(&project.config).map_err(|e| GateError::Other(e.into()))?;
            ui.message(&yaml);
        }

        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MockUI;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn config_command_creation() {
        let temp = TempDir::new().unwrap();
        let cmd = ConfigCommand::new(temp.path(), None, ConfigArgs::default());
        assert_eq!(cmd.project_root(), temp.path());
    }

    #[test]
    fn defaults_are_shown_without_config_file() {
        let temp = TempDir::new().unwrap();
        let cmd = ConfigCommand::new(temp.path(), None, ConfigArgs::default());
        let mut ui = MockUI::new();

        let result = cmd.execute(&mut ui).unwrap();

        assert!(result.success);
        assert!(ui.has_message("# built-in defaults"));
        assert!(ui.has_message("library: src"));
        assert!(ui.has_message("print_pattern"));
    }

    #[test]
    fn config_shows_config_path_and_overrides() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(".qgate.yml"), "project:\n  tests: spec\n").unwrap();
        let cmd = ConfigCommand::new(temp.path(), None, ConfigArgs::default());
        let mut ui = MockUI::new();

        cmd.execute(&mut ui).unwrap();

        assert!(ui.has_message(".qgate.yml"));
        assert!(ui.has_message("tests: spec"));
    }

    #[test]
    fn config_json_output() {
        let temp = TempDir::new().unwrap();
        let args = ConfigArgs {
            json: true,
            ..Default::default()
        };
        let cmd = ConfigCommand::new(temp.path(), None, args);
        let mut ui = MockUI::new();

        cmd.execute(&mut ui).unwrap();

        let json: serde_json::Value = serde_json::from_str(ui.messages().last().unwrap()).unwrap();
        assert_eq!(json["environment"]["dir"], "venv");
    }

    #[test]
    fn schema_describes_sections() {
        let temp = TempDir::new().unwrap();
        let args = ConfigArgs {
            schema: true,
            ..Default::default()
        };
        let cmd = ConfigCommand::new(temp.path(), None, args);
        let mut ui = MockUI::new();

        cmd.execute(&mut ui).unwrap();

        let schema = &ui.messages()[0];
        assert!(schema.contains("\"tools\""));
        assert!(schema.contains("\"scans\""));
    }
}
