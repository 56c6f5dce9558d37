//! The driver loop.

use chrono::Utc;
use std::time::Instant;

use crate::ui::{RunSummary, StatusKind, SummaryLine};

use super::context::StepContext;
use super::outcome::{Severity, StepOutcome};
use super::report::{RunReport, StepRecord};
use super::step::Step;
use super::steps::standard_steps;

/// Banner shown when every fatal step passed.
pub const SUCCESS_BANNER: &str = "All quality checks passed!";

/// An ordered list of steps.
pub struct Pipeline {
    steps: Vec<Box<dyn Step>>,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::standard()
    }
}

impl Pipeline {
    /// Pipeline over the given steps.
    pub fn new(steps: Vec<Box<dyn Step>>) -> Self {
        Self { steps }
    }

    /// The eight built-in steps.
    pub fn standard() -> Self {
        Self::new(standard_steps())
    }

    /// Steps in execution order.
    pub fn steps(&self) -> &[Box<dyn Step>] {
        &self.steps
    }

    /// Run every step in order, stopping at the first fatal outcome.
    ///
    /// A step that errors instead of reporting an outcome is judged by its
    /// severity: fatal steps abort with exit code 1, advisory steps warn.
    ///
    /// On the success path the environment is deactivated and the summary,
    /// banner and fix hints are shown. An aborted run skips all three and
    /// leaves the environment handle to be dropped.
    pub fn run(&self, ctx: &mut StepContext<'_>) -> RunReport {
        let started_at = Utc::now();
        let start = Instant::now();
        let total = self.steps.len();
        let mut records = Vec::with_capacity(total);

        for (index, step) in self.steps.iter().enumerate() {
            ctx.ui.show_step(index + 1, total, step.title());
            let step_start = Instant::now();

            let outcome = match step.run(ctx) {
                Ok(outcome) => outcome,
                Err(e) => {
                    tracing::debug!("Step '{}' errored: {:?}", step.id(), e);
                    match step.severity() {
                        Severity::Fatal => {
                            ctx.ui.error(&e.to_string());
                            StepOutcome::fatal(None, e.to_string())
                        }
                        Severity::Advisory => {
                            ctx.ui.warning(&e.to_string());
                            StepOutcome::advisory(e.to_string())
                        }
                    }
                }
            };

            match &outcome {
                StepOutcome::Passed => tracing::debug!("Step '{}' passed", step.id()),
                StepOutcome::Advisory { detail } => {
                    tracing::info!("Step '{}' reported: {}", step.id(), detail)
                }
                StepOutcome::Fatal { exit_code, detail } => tracing::debug!(
                    "Step '{}' failed with exit code {}: {}",
                    step.id(),
                    exit_code,
                    detail
                ),
            }

            let exit_code = match &outcome {
                StepOutcome::Fatal { exit_code, .. } => Some(*exit_code),
                _ => None,
            };
            records.push(StepRecord::new(step.as_ref(), outcome, step_start.elapsed()));

            if let Some(exit_code) = exit_code {
                return RunReport {
                    started_at,
                    finished_at: Utc::now(),
                    project_root: ctx.layout.root.clone(),
                    library: ctx.layout.library.clone(),
                    steps: records,
                    issues: ctx.issues.count(),
                    aborted_at: Some(step.id().to_string()),
                    exit_code,
                    environment_deactivated: false,
                };
            }
        }

        let environment_deactivated = match ctx.environment.take() {
            Some(env) => {
                env.deactivate();
                ctx.ui.message("Deactivated virtual environment");
                true
            }
            None => false,
        };

        ctx.ui.show_run_summary(&RunSummary {
            lines: records.iter().map(summary_line).collect(),
            total_duration: start.elapsed(),
            issues: ctx.issues.count(),
        });
        ctx.ui.show_banner(SUCCESS_BANNER);

        let config = ctx.config;
        let format_fix = ctx.display_command(&config.tools.format_fix);
        let lint_fix = ctx.display_command(&config.tools.lint_fix);
        ctx.ui.show_hint(&format!("To auto-format: {}", format_fix));
        ctx.ui
            .show_hint(&format!("To auto-fix lint issues: {}", lint_fix));

        RunReport {
            started_at,
            finished_at: Utc::now(),
            project_root: ctx.layout.root.clone(),
            library: ctx.layout.library.clone(),
            steps: records,
            issues: ctx.issues.count(),
            aborted_at: None,
            exit_code: 0,
            environment_deactivated,
        }
    }
}

fn summary_line(record: &StepRecord) -> SummaryLine {
    let status = match record.outcome {
        StepOutcome::Passed => StatusKind::Success,
        StepOutcome::Advisory { .. } => StatusKind::Warning,
        StepOutcome::Fatal { .. } => StatusKind::Failed,
    };
    SummaryLine {
        name: record.title.clone(),
        status,
        duration: record.duration,
        detail: record.outcome.detail().map(String::from),
    }
}
