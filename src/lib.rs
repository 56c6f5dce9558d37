//! qgate - Quality gate for Python packages.
//!
//! qgate runs a fixed sequence of checks against a Python package inside a
//! reusable virtual environment: dependency install, formatting, linting,
//! strict type checking, the `py.typed` marker, tests and a few heuristic
//! source scans. Fatal checks stop the run with the failing tool's exit
//! code; advisory checks only warn.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Configuration loading, validation and project layout
//! - [`environment`] - Virtual environment creation and activation
//! - [`error`] - Error types and result aliases
//! - [`gate`] - Steps, outcomes and the pipeline driver
//! - [`scan`] - Heuristic source scanning
//! - [`shell`] - External command execution
//! - [`ui`] - Spinners and terminal output
//!
//! # Example
//!
//! ```
//! use qgate::config::{resolve_string, InterpolationContext};
//!
//! let mut ctx = InterpolationContext::new();
//! ctx.insert("library", "py_micro_plumberd");
//! let target = resolve_string("${library}/py.typed", &ctx).unwrap();
//! assert_eq!(target, "py_micro_plumberd/py.typed");
//! ```
//!
//! For end-to-end runs against real projects, see the integration tests.

pub mod cli;
pub mod config;
pub mod environment;
pub mod error;
pub mod gate;
pub mod scan;
pub mod shell;
pub mod ui;

pub use error::{GateError, Result};
