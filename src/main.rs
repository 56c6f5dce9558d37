//! qgate CLI entry point.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use qgate::cli::{Cli, CommandDispatcher};
use qgate::config::find_project_root;
use qgate::ui::{create_ui, OutputMode};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber for logging.
///
/// Log level is controlled by:
/// 1. `--debug` flag sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is WARN, so logs never crowd the step output
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("qgate=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("qgate=warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// Explicit `--project`, else the nearest enclosing project, else cwd.
fn resolve_project_root(explicit: Option<&PathBuf>) -> PathBuf {
    if let Some(root) = explicit {
        return std::path::absolute(root).unwrap_or_else(|_| root.clone());
    }

    let cwd = std::env::current_dir().unwrap_or_default();
    find_project_root(&cwd).unwrap_or(cwd)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    tracing::debug!("qgate starting with args: {:?}", cli);

    let output_mode = if cli.quiet {
        OutputMode::Quiet
    } else if cli.verbose {
        OutputMode::Verbose
    } else {
        OutputMode::Normal
    };

    if cli.no_color {
        std::env::set_var("NO_COLOR", "1");
    }

    let project_root = resolve_project_root(cli.project.as_ref());
    tracing::debug!("Project root: {}", project_root.display());

    let mut ui = create_ui(output_mode);
    let dispatcher = CommandDispatcher::new(project_root).with_config(cli.config.clone());

    match dispatcher.dispatch(&cli, ui.as_mut()) {
        Ok(result) => ExitCode::from(u8::try_from(result.exit_code).unwrap_or(1)),
        Err(e) => {
            ui.error(&format!("Error: {}", e));
            ExitCode::from(1)
        }
    }
}
