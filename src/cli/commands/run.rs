//! Run command implementation.
//!
//! The `qgate run` command executes the quality gate pipeline.

use std::path::{Path, PathBuf};

use crate::cli::args::RunArgs;
use crate::error::Result;
use crate::gate::{Pipeline, StepContext};
use crate::scan::RegexScanner;
use crate::shell::{ProcessRunner, SystemRunner};
use crate::ui::{OutputMode, UserInterface};

use super::dispatcher::{Command, CommandResult};
use super::{load_project, CONFIG_ERROR_EXIT};

/// The run command implementation.
pub struct RunCommand {
    project_root: PathBuf,
    config_path: Option<PathBuf>,
    args: RunArgs,
}

impl RunCommand {
    /// Create a new run command.
    pub fn new(project_root: &Path, config_path: Option<&Path>, args: RunArgs) -> Self {
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

    /// Get the command arguments.
    pub fn args(&self) -> &RunArgs {
        &self.args
    }

    /// Execute with a specific process runner.
    pub fn execute_with(
        &self,
        ui: &mut dyn UserInterface,
        runner: &mut dyn ProcessRunner,
    ) -> Result<CommandResult> {
        let Some(project) = load_project(&self.project_root, self.config_path.as_deref(), ui)?
        else {
            return Ok(CommandResult::failure(CONFIG_ERROR_EXIT));
        };

        ui.show_header("Running quality checks");

        if ui.output_mode() == OutputMode::Verbose {
            for source in &project.sources {
                ui.message(&format!("Config: {}", source.display()));
            }
            ui.message(&format!("Library: {}", project.layout.library.display()));
        }

        let scanner = RegexScanner::new(
            &project.layout.root,
            project.config.scans.exclude_dirs.clone(),
        );
        let report = {
            let mut ctx =
                StepContext::new(&project.config, &project.layout, runner, &mut *ui, &scanner);
            Pipeline::standard().run(&mut ctx)
        };

        if let Some(path) = &self.args.report {
            report.write_json(path)?;
        }

        if report.is_success() {
            Ok(CommandResult::success())
        } else {
            Ok(CommandResult::failure(report.exit_code))
        }
    }
}

impl Command for RunCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        self.execute_with(ui, &mut SystemRunner)
    }
}
