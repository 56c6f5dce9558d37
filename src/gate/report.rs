//! Machine-readable record of a run.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{GateError, Result};

use super::outcome::{Severity, StepOutcome};
use super::step::Step;

/// What happened in one executed step.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepRecord {
    /// Step identifier.
    pub id: String,
    /// Step title.
    pub title: String,
    /// Declared severity.
    pub severity: Severity,
    /// Outcome, flattened into `status` plus its fields.
    #[serde(flatten)]
    pub outcome: StepOutcome,
    /// Wall-clock time in milliseconds.
    pub duration_ms: u64,
    /// Wall-clock time, for the summary table.
    #[serde(skip)]
    pub duration: Duration,
}

impl StepRecord {
    /// Record the outcome of a step.
    pub fn new(step: &dyn Step, outcome: StepOutcome, duration: Duration) -> Self {
        Self {
            id: step.id().to_string(),
            title: step.title().to_string(),
            severity: step.severity(),
            outcome,
            duration_ms: u64::try_from(duration.as_millis()).unwrap_or(u64::MAX),
            duration,
        }
    }
}

/// Full record of a run, written with `run --report`.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub project_root: PathBuf,
    pub library: PathBuf,
    /// Executed steps, in order. Steps after a fatal failure are absent.
    pub steps: Vec<StepRecord>,
    /// Heuristic issues found by the scans.
    pub issues: usize,
    /// Id of the step that aborted the run, if any.
    pub aborted_at: Option<String>,
    pub exit_code: i32,
    /// Whether teardown ran.
    pub environment_deactivated: bool,
}

impl RunReport {
    /// Whether every fatal step passed.
    pub fn is_success(&self) -> bool {
        self.aborted_at.is_none()
    }

    /// Write the report as pretty JSON.
    pub fn write_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(|e| GateError::Other(e.into()))?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, json + "\n")?;
        tracing::debug!("Wrote run report to {}", path.display());
        Ok(())
    }
}
