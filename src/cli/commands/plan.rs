//! Plan command implementation.
//!
//! The `qgate plan` command lists the steps, their severity and the
//! resolved commands without running anything.

use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::cli::args::PlanArgs;
use crate::error::{GateError, Result};
use crate::gate::{Pipeline, Severity};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};
use super::{load_project, CONFIG_ERROR_EXIT};

/// One step as shown by `plan --json`.
#[derive(Debug, Clone, Serialize)]
pub struct PlanEntry {
    pub id: &'static str,
    pub title: &'static str,
    pub severity: Severity,
    pub commands: Vec<String>,
}

/// The plan command implementation.
pub struct PlanCommand {
    project_root: PathBuf,
    config_path: Option<PathBuf>,
    args: PlanArgs,
}

impl PlanCommand {
    /// Create a new plan command.
    pub fn new(project_root: &Path, config_path: Option<&Path>, args: PlanArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            config_path: config_path.map(Path::to_path_buf),
            args,
        }
    }
}

impl Command for PlanCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let Some(project) = load_project(&self.project_root, self.config_path.as_deref(), ui)?
        else {
            return Ok(CommandResult::failure(CONFIG_ERROR_EXIT));
        };

        let pipeline = Pipeline::standard();
        let entries = pipeline
            .steps()
            .iter()
            .map(|step| -> Result<PlanEntry> {
                Ok(PlanEntry {
                    id: step.id(),
                    title: step.title(),
                    severity: step.severity(),
                    commands: step.plan(&project.config, &project.layout)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        if self.args.json {
            let json =
                serde_json::to_string_pretty(&entries).map_err(|e| GateError::Other(e.into()))?;
            ui.message(&json);
            return Ok(CommandResult::success());
        }

        let total = entries.len();
        for (index, entry) in entries.iter().enumerate() {
            ui.message(&format!(
                "[{}/{}] {} ({}, {})",
                index + 1,
                total,
                entry.title,
                entry.id,
                entry.severity
            ));
            for command in &entry.commands {
                ui.message(&format!("      {}", command));
            }
        }

        Ok(CommandResult::success())
    }
}
