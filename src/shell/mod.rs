//! External command execution and platform detection.

pub mod command;
pub mod mock;
pub mod platform;

pub use command::{
    execute, CommandOptions, CommandResult, Invocation, ProcessRunner, SystemRunner,
};
pub use mock::{MockResponse, MockRunner};
pub use platform::{executable_candidates, is_ci, venv_bin_dir_name};
