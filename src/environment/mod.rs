//! Isolated environment management.
//!
//! The environment is created lazily on first run, reused afterwards, and
//! never deleted by qgate.

pub mod venv;

pub use venv::{ActivatedEnvironment, EnsureOutcome, VirtualEnv};
