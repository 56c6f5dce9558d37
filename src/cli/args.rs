//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// qgate - Quality gate for Python packages.
#[derive(Debug, Parser)]
#[command(name = "qgate")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to config file (replaces .qgate.yml)
    #[arg(short, long, global = true, env = "QGATE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Path to project root (default: nearest directory with pyproject.toml,
    /// setup.py, setup.cfg or .qgate.yml)
    #[arg(short, long, global = true)]
    pub project: Option<PathBuf>,

    /// Show commands and extra detail
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Capture tool output and show it only on failure
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run every quality check (default if no command specified)
    Run(RunArgs),

    /// Show the steps and the commands they would run
    Plan(PlanArgs),

    /// Show resolved configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `run` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct RunArgs {
    /// Write a JSON report of the run to this file
    #[arg(long, value_name = "FILE")]
    pub report: Option<PathBuf>,
}

/// Arguments for the `plan` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct PlanArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `config` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ConfigArgs {
    /// Output as JSON
    #[arg(long, conflicts_with = "schema")]
    pub json: bool,

    /// Print the JSON schema of the config file instead
    #[arg(long)]
    pub schema: bool,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_subcommand_parses() {
        let cli = Cli::try_parse_from(["qgate"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn run_accepts_report_path() {
        let cli = Cli::try_parse_from(["qgate", "run", "--report", "out.json"]).unwrap();
        match cli.command {
            Some(Commands::Run(args)) => assert_eq!(args.report, Some(PathBuf::from("out.json"))),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn global_flags_work_after_subcommand() {
        let cli = Cli::try_parse_from(["qgate", "plan", "--project", "/tmp/p", "-q"]).unwrap();
        assert_eq!(cli.project, Some(PathBuf::from("/tmp/p")));
        assert!(cli.quiet);
    }

    #[test]
    fn verbose_and_quiet_conflict() {
        assert!(Cli::try_parse_from(["qgate", "-v", "-q"]).is_err());
    }
}
