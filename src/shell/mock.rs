//! Scripted process runner for testing.
//!
//! `MockRunner` implements [`ProcessRunner`] without spawning anything. Each
//! invocation is recorded, and its result comes from the most specific
//! scripted response whose pattern matches.
//!
//! # Example
//!
//! ```
//! use qgate::shell::{CommandOptions, Invocation, MockRunner, MockResponse, ProcessRunner};
//!
//! let mut runner = MockRunner::new();
//! runner.respond("ruff check --select", MockResponse::exit(1));
//! runner.respond("ruff", MockResponse::ok());
//!
//! let opts = CommandOptions::default();
//! let lint = Invocation::new("ruff", ["check", "pkg"]);
//! let unused = Invocation::new("ruff", ["check", "--select", "F401", "pkg"]);
//! assert!(runner.run(&lint, &opts).unwrap().success);
//! assert!(!runner.run(&unused, &opts).unwrap().success);
//! assert_eq!(runner.invocations().len(), 2);
//! ```

use std::time::Duration;

use crate::error::{GateError, Result};

use super::command::{CommandOptions, CommandResult, Invocation, ProcessRunner};

/// A scripted result for matching invocations.
#[derive(Debug, Clone, Default)]
pub struct MockResponse {
    exit_code: i32,
    stdout: String,
    stderr: String,
    spawn_error: bool,
}

impl MockResponse {
    /// Exit 0 with no output.
    pub fn ok() -> Self {
        Self::default()
    }

    /// Exit with the given code.
    pub fn exit(code: i32) -> Self {
        Self {
            exit_code: code,
            ..Default::default()
        }
    }

    /// Fail as if the program could not be started.
    pub fn spawn_error() -> Self {
        Self {
            spawn_error: true,
            ..Default::default()
        }
    }

    /// Attach stdout text.
    pub fn with_stdout(mut self, stdout: &str) -> Self {
        self.stdout = stdout.to_string();
        self
    }

    /// Attach stderr text.
    pub fn with_stderr(mut self, stderr: &str) -> Self {
        self.stderr = stderr.to_string();
        self
    }
}

/// Records invocations and answers them from a script.
///
/// A pattern matches when it equals the program's bare name, or when the
/// invocation (with the bare program name) starts with it. Longer patterns
/// win. Unmatched invocations succeed.
#[derive(Debug, Default)]
pub struct MockRunner {
    responses: Vec<(String, MockResponse)>,
    invocations: Vec<(Invocation, CommandOptions)>,
}

impl MockRunner {
    /// Create a runner where every command succeeds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Script a response for invocations matching `pattern`.
    pub fn respond(&mut self, pattern: &str, response: MockResponse) {
        self.responses.push((pattern.to_string(), response));
        self.responses
            .sort_by(|(a, _), (b, _)| b.len().cmp(&a.len()));
    }

    /// All invocations seen so far, in order.
    pub fn invocations(&self) -> Vec<&Invocation> {
        self.invocations.iter().map(|(inv, _)| inv).collect()
    }

    /// Options passed with the n-th invocation.
    pub fn options_at(&self, index: usize) -> Option<&CommandOptions> {
        self.invocations.get(index).map(|(_, opts)| opts)
    }

    /// Whether any invocation used the given bare program name.
    pub fn was_invoked(&self, program: &str) -> bool {
        self.invocations
            .iter()
            .any(|(inv, _)| inv.program_name() == program)
    }

    /// Rendered command lines (with bare program names), in order.
    pub fn command_lines(&self) -> Vec<String> {
        self.invocations
            .iter()
            .map(|(inv, _)| normalized(inv))
            .collect()
    }

    fn lookup(&self, invocation: &Invocation) -> MockResponse {
        let line = normalized(invocation);
        let name = invocation.program_name();
        self.responses
            .iter()
            .find(|(pattern, _)| pattern == name || line.starts_with(pattern.as_str()))
            .map(|(_, r)| r.clone())
            .unwrap_or_default()
    }
}

fn normalized(invocation: &Invocation) -> String {
    invocation
        .with_program(invocation.program_name())
        .to_string()
}

impl ProcessRunner for MockRunner {
    fn run(&mut self, invocation: &Invocation, options: &CommandOptions) -> Result<CommandResult> {
        self.invocations
            .push((invocation.clone(), options.clone()));
        let response = self.lookup(invocation);

        if response.spawn_error {
            return Err(GateError::CommandFailed {
                command: invocation.to_string(),
                message: "scripted spawn failure".to_string(),
            });
        }

        if response.exit_code == 0 {
            Ok(CommandResult::success(
                response.stdout,
                response.stderr,
                Duration::ZERO,
            ))
        } else {
            Ok(CommandResult::failure(
                Some(response.exit_code),
                response.stdout,
                response.stderr,
                Duration::ZERO,
            ))
        }
    }
}
