//! Shared state for one pipeline run.

use crate::config::{resolve_argv, GateConfig, ProjectLayout};
use crate::environment::ActivatedEnvironment;
use crate::error::{GateError, Result};
use crate::scan::SourceScanner;
use crate::shell::{CommandOptions, CommandResult, Invocation, ProcessRunner};
use crate::ui::UserInterface;

use super::outcome::IssueCounter;

/// Everything a step can see and touch.
pub struct StepContext<'a> {
    /// Resolved configuration.
    pub config: &'a GateConfig,
    /// Concrete project paths.
    pub layout: &'a ProjectLayout,
    /// How tools are spawned.
    pub runner: &'a mut dyn ProcessRunner,
    /// Where status lines go.
    pub ui: &'a mut dyn UserInterface,
    /// Heuristic source scanner.
    pub scanner: &'a dyn SourceScanner,
    /// Set by the bootstrap step, taken by teardown.
    pub environment: Option<ActivatedEnvironment>,
    /// Heuristic issues found so far.
    pub issues: IssueCounter,
}

impl<'a> StepContext<'a> {
    /// Create a context with no active environment and a zero counter.
    pub fn new(
        config: &'a GateConfig,
        layout: &'a ProjectLayout,
        runner: &'a mut dyn ProcessRunner,
        ui: &'a mut dyn UserInterface,
        scanner: &'a dyn SourceScanner,
    ) -> Self {
        Self {
            config,
            layout,
            runner,
            ui,
            scanner,
            environment: None,
            issues: IssueCounter::new(),
        }
    }

    /// Interpolate a configured argv, as a user would type it.
    pub fn command_line(&self, argv: &[String]) -> Result<Invocation> {
        command_line(argv, self.layout)
    }

    /// Interpolate a configured argv and point it at the active environment.
    pub fn invocation(&self, argv: &[String]) -> Result<Invocation> {
        let invocation = self.command_line(argv)?;
        Ok(match &self.environment {
            Some(env) => env.resolve(&invocation),
            None => invocation,
        })
    }

    /// Command options rooted at the project, with the environment overlay.
    pub fn options(&self, capture: bool) -> CommandOptions {
        let mut options = if capture {
            CommandOptions::captured(&self.layout.root)
        } else {
            CommandOptions::inherited(&self.layout.root)
        };
        if let Some(env) = &self.environment {
            env.apply(&mut options);
        }
        options
    }

    /// Run a tool the way the output mode asks for.
    ///
    /// Normal and verbose modes hand the terminal to the tool. Quiet mode
    /// captures its output behind a spinner and shows it only on failure.
    pub fn run_tool(&mut self, argv: &[String]) -> Result<CommandResult> {
        let shown = self.command_line(argv)?;
        let invocation = self.invocation(argv)?;
        let mode = self.ui.output_mode();

        if mode.shows_details() {
            self.ui.detail(&format!("$ {}", shown));
        }

        if mode.streams_tool_output() {
            let options = self.options(false);
            return self.runner.run(&invocation, &options);
        }

        let options = self.options(true);
        let mut spinner = self
            .ui
            .start_spinner(&format!("Running {}", invocation.program_name()));
        let result = self.runner.run(&invocation, &options);
        spinner.finish();

        let result = result?;
        if !result.success {
            self.ui
                .show_error_block(&shown.to_string(), &result.combined_output());
        }
        Ok(result)
    }

    /// Run a tool with its output captured regardless of mode.
    pub fn run_captured(&mut self, argv: &[String]) -> Result<CommandResult> {
        let invocation = self.invocation(argv)?;
        let options = self.options(true);
        self.runner.run(&invocation, &options)
    }

    /// A configured command rendered for hints, falling back to the raw argv.
    pub fn display_command(&self, argv: &[String]) -> String {
        self.command_line(argv)
            .map(|inv| inv.to_string())
            .unwrap_or_else(|_| argv.join(" "))
    }
}

/// Interpolate a configured argv against the project layout.
///
/// # Errors
///
/// Returns `ConfigValidationError` for an empty argv or an unknown variable.
pub fn command_line(argv: &[String], layout: &ProjectLayout) -> Result<Invocation> {
    let resolved = resolve_argv(argv, &layout.interpolation_context())?;
    Invocation::from_argv(&resolved).ok_or_else(|| GateError::ConfigValidationError {
        message: "command must not be empty".to_string(),
    })
}
