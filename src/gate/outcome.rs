//! Step outcomes and the heuristic issue counter.

use serde::Serialize;

/// What a failing step does to the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Failure aborts the run with a non-zero exit code.
    Fatal,
    /// Failure is reported; the run continues and the exit code is unaffected.
    Advisory,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Fatal => write!(f, "fatal"),
            Severity::Advisory => write!(f, "advisory"),
        }
    }
}

/// Result of running one step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StepOutcome {
    /// The step passed.
    Passed,
    /// The step found problems that should not block.
    Advisory {
        /// Short description of what was found.
        detail: String,
    },
    /// The step failed; the run must stop.
    Fatal {
        /// Process exit code for the run.
        exit_code: i32,
        /// Short description of the failure.
        detail: String,
    },
}

impl StepOutcome {
    /// Fatal failure derived from a tool's exit status.
    pub fn fatal(code: Option<i32>, detail: impl Into<String>) -> Self {
        Self::Fatal {
            exit_code: fatal_exit_code(code),
            detail: detail.into(),
        }
    }

    /// Advisory failure with a description.
    pub fn advisory(detail: impl Into<String>) -> Self {
        Self::Advisory {
            detail: detail.into(),
        }
    }

    /// Whether this outcome stops the pipeline.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Fatal { .. })
    }

    /// Detail text, if any.
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Passed => None,
            Self::Advisory { detail } | Self::Fatal { detail, .. } => Some(detail),
        }
    }
}

/// Map a failing tool's status to a process exit code.
///
/// Codes in `1..=255` pass through; anything else (signal, a bogus 0,
/// out-of-range values) becomes 1.
pub fn fatal_exit_code(code: Option<i32>) -> i32 {
    match code {
        Some(c) if (1..=255).contains(&c) => c,
        _ => 1,
    }
}

/// Counts heuristic checks that found something.
///
/// Only ever grows during a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IssueCounter {
    count: usize,
}

impl IssueCounter {
    /// Create a counter at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one detected issue.
    pub fn record(&mut self) {
        self.count += 1;
    }

    /// Issues recorded so far.
    pub fn count(&self) -> usize {
        self.count
    }
}
