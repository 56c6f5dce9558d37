//! The step abstraction.

use crate::config::{GateConfig, ProjectLayout};
use crate::error::Result;

use super::context::StepContext;
use super::outcome::{Severity, StepOutcome};

/// One stage of the quality gate.
///
/// A tool exiting non-zero is reported through the returned [`StepOutcome`].
/// `Err` is reserved for conditions that stop the step from observing a
/// result at all; the pipeline treats it as fatal.
pub trait Step {
    /// Stable identifier used in reports and plans.
    fn id(&self) -> &'static str;

    /// Human-readable title shown in the step banner.
    fn title(&self) -> &'static str;

    /// Whether a failure stops the run.
    fn severity(&self) -> Severity;

    /// What the step would do, one line per command or check.
    fn plan(&self, config: &GateConfig, layout: &ProjectLayout) -> Result<Vec<String>>;

    /// Execute the step.
    fn run(&self, ctx: &mut StepContext<'_>) -> Result<StepOutcome>;
}
