//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! # Architecture
//!
//! Commands are dispatched via [`CommandDispatcher`], which routes CLI
//! subcommands to their implementations. This allows:
//! - Single binary with subcommands (`qgate run`, `qgate plan`)
//! - Shared configuration loading
//! - Consistent global flag handling

pub mod completions;
pub mod config;
pub mod dispatcher;
pub mod plan;
pub mod run;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};

use std::path::{Path, PathBuf};

use crate::config::{load_config, validate, GateConfig, ProjectLayout};
use crate::error::{GateError, Result};
use crate::ui::UserInterface;

/// Exit code for configuration problems found before any step runs.
pub const CONFIG_ERROR_EXIT: i32 = 2;

/// A loaded, validated project.
#[derive(Debug, Clone)]
pub struct LoadedProject {
    /// Validated configuration.
    pub config: GateConfig,
    /// Resolved paths.
    pub layout: ProjectLayout,
    /// Config files that were merged, in order.
    pub sources: Vec<PathBuf>,
}

/// Load and validate the configuration for a project root.
///
/// Configuration problems are reported through `ui` and yield `Ok(None)`;
/// callers exit with [`CONFIG_ERROR_EXIT`].
pub fn load_project(
    project_root: &Path,
    config_path: Option<&Path>,
    ui: &mut dyn UserInterface,
) -> Result<Option<LoadedProject>> {
    let loaded = load_config(project_root, config_path).and_then(|loaded| {
        validate(&loaded.config)?;
        Ok(loaded)
    });

    match loaded {
        Ok(loaded) => {
            let layout = ProjectLayout::resolve(project_root, &loaded.config);
            tracing::debug!(
                "Project root {}, library {}",
                layout.root.display(),
                layout.library.display()
            );
            Ok(Some(LoadedProject {
                config: loaded.config,
                layout,
                sources: loaded.sources,
            }))
        }
        Err(
            e @ (GateError::ConfigNotFound { .. }
            | GateError::ConfigParseError { .. }
            | GateError::ConfigValidationError { .. }),
        ) => {
            ui.error(&e.to_string());
            Ok(None)
        }
        Err(e) => Err(e),
    }
}
