//! Terminal user interface components.
//!
//! This module provides:
//! - [`UserInterface`] trait for UI abstraction
//! - [`TerminalUI`] for real terminal output (colored when appropriate)
//! - [`MockUI`] for asserting on output in tests
//!
//! # Example
//!
//! ```
//! use qgate::ui::{MockUI, UserInterface};
//!
//! let mut ui = MockUI::new();
//! ui.show_step(4, 8, "Running linter");
//! ui.success("Linting passed");
//! assert!(ui.has_success("Linting passed"));
//! ```

pub mod icons;
pub mod mock;
pub mod output;
pub mod progress;
pub mod spinner;
pub mod terminal;
pub mod theme;

pub use icons::StatusKind;
pub use mock::{MockSpinner, MockUI};
pub use output::OutputMode;
pub use progress::format_duration;
pub use spinner::ProgressSpinner;
pub use terminal::{create_ui, TerminalUI};
pub use theme::{should_use_colors, GateTheme};

use std::time::Duration;

/// Trait for user interface interactions.
///
/// This trait allows mocking the UI in tests.
pub trait UserInterface {
    /// Get the current output mode.
    fn output_mode(&self) -> OutputMode;

    /// Display a plain message.
    fn message(&mut self, msg: &str);

    /// Display a success message.
    fn success(&mut self, msg: &str);

    /// Display a warning message.
    fn warning(&mut self, msg: &str);

    /// Display an error message.
    fn error(&mut self, msg: &str);

    /// Display a remediation hint.
    fn show_hint(&mut self, hint: &str);

    /// Display a secondary detail line (e.g. a scan match).
    fn detail(&mut self, line: &str);

    /// Show a header at the start of a run.
    fn show_header(&mut self, title: &str);

    /// Show a numbered step banner (e.g. "[3/8] Checking formatting").
    fn show_step(&mut self, index: usize, total: usize, title: &str);

    /// Show a failing command and its captured output.
    fn show_error_block(&mut self, command: &str, output: &str);

    /// Show the per-step summary table.
    fn show_run_summary(&mut self, summary: &RunSummary);

    /// Show the closing banner.
    fn show_banner(&mut self, title: &str);

    /// Start a spinner for a captured operation.
    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle>;
}

/// Handle for controlling a spinner.
pub trait SpinnerHandle {
    /// Update the spinner message.
    fn set_message(&mut self, msg: &str);

    /// Stop and clear the spinner.
    fn finish(&mut self);
}

/// One row of the run summary.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryLine {
    /// Step title.
    pub name: String,
    /// Status icon to show.
    pub status: StatusKind,
    /// How long the step took.
    pub duration: Duration,
    /// Extra detail, e.g. "2 issues".
    pub detail: Option<String>,
}

/// Data for the summary table shown at the end of a run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    /// One line per executed step.
    pub lines: Vec<SummaryLine>,
    /// Wall-clock time of the whole run.
    pub total_duration: Duration,
    /// Heuristic issues found.
    pub issues: usize,
}
