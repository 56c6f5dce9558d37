//! The quality gate pipeline.
//!
//! A [`Pipeline`] runs [`Step`]s strictly in order. Each step reports a
//! tri-state [`StepOutcome`]; the first `Fatal` outcome ends the run with
//! its exit code, while `Advisory` outcomes are shown and the run goes on.
//!
//! # Example
//!
//! ```
//! use qgate::config::{GateConfig, ProjectLayout};
//! use qgate::gate::{Pipeline, StepContext};
//! use qgate::scan::RegexScanner;
//! use qgate::shell::{MockResponse, MockRunner};
//! use qgate::ui::MockUI;
//! use tempfile::TempDir;
//!
//! let temp = TempDir::new().unwrap();
//! let config = GateConfig::default();
//! let layout = ProjectLayout::resolve(temp.path(), &config);
//! let scanner = RegexScanner::new(temp.path(), vec![]);
//!
//! let mut runner = MockRunner::new();
//! runner.respond("ruff check src", MockResponse::exit(3));
//! let mut ui = MockUI::new();
//!
//! let report = {
//!     let mut ctx = StepContext::new(&config, &layout, &mut runner, &mut ui, &scanner);
//!     Pipeline::standard().run(&mut ctx)
//! };
//!
//! assert_eq!(report.exit_code, 3);
//! assert!(!runner.was_invoked("mypy"));
//! ```

pub mod context;
pub mod outcome;
pub mod pipeline;
pub mod report;
pub mod step;
pub mod steps;

pub use context::{command_line, StepContext};
pub use outcome::{fatal_exit_code, IssueCounter, Severity, StepOutcome};
pub use pipeline::{Pipeline, SUCCESS_BANNER};
pub use report::{RunReport, StepRecord};
pub use step::Step;
pub use steps::{
    standard_steps, BootstrapStep, FormatStep, InstallStep, LintStep, MarkerStep, ScanStep,
    TestStep, TypeCheckStep,
};
