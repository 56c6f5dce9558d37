//! The built-in gate steps, in pipeline order.

use crate::config::{Argv, GateConfig, ProjectLayout};
use crate::environment::{EnsureOutcome, VirtualEnv};
use crate::error::Result;
use crate::scan::{ScanMatch, ScanPattern};
use crate::ui::UserInterface;

use super::context::{command_line, StepContext};
use super::outcome::{Severity, StepOutcome};
use super::step::Step;

/// Scan matches listed per warning before the rest are summarized.
const MAX_MATCHES_SHOWN: usize = 20;

/// Creates (if needed) and activates the virtual environment.
#[derive(Debug, Default, Clone, Copy)]
pub struct BootstrapStep;

impl Step for BootstrapStep {
    fn id(&self) -> &'static str {
        "env"
    }

    fn title(&self) -> &'static str {
        "Setting up virtual environment"
    }

    fn severity(&self) -> Severity {
        Severity::Fatal
    }

    fn plan(&self, config: &GateConfig, layout: &ProjectLayout) -> Result<Vec<String>> {
        let create = command_line(&config.environment.create, layout)?;
        Ok(vec![format!(
            "use {} (created with: {})",
            layout.venv.display(),
            create
        )])
    }

    fn run(&self, ctx: &mut StepContext<'_>) -> Result<StepOutcome> {
        let venv = VirtualEnv::locate(ctx.layout);
        let shown = venv.relative_path().display().to_string();
        let create = ctx.command_line(&ctx.config.environment.create)?;

        match venv.ensure(&mut *ctx.runner, &create, &ctx.layout.root) {
            Ok(EnsureOutcome::Created) => {
                ctx.ui
                    .success(&format!("Created virtual environment at {}", shown));
            }
            Ok(EnsureOutcome::Reused) => {
                ctx.ui
                    .success(&format!("Using existing virtual environment at {}", shown));
            }
            Err(e) => {
                ctx.ui.error(&e.to_string());
                return Ok(StepOutcome::fatal(
                    None,
                    format!("could not create virtual environment at {}", shown),
                ));
            }
        }

        ctx.environment = Some(venv.activate()?);
        Ok(StepOutcome::Passed)
    }
}

/// Runs every install command in order.
#[derive(Debug, Default, Clone, Copy)]
pub struct InstallStep;

impl Step for InstallStep {
    fn id(&self) -> &'static str {
        "install"
    }

    fn title(&self) -> &'static str {
        "Installing dependencies"
    }

    fn severity(&self) -> Severity {
        Severity::Fatal
    }

    fn plan(&self, config: &GateConfig, layout: &ProjectLayout) -> Result<Vec<String>> {
        plan_commands(config.tools.install.iter(), layout)
    }

    fn run(&self, ctx: &mut StepContext<'_>) -> Result<StepOutcome> {
        let config = ctx.config;
        for argv in &config.tools.install {
            let result = ctx.run_tool(argv)?;
            if !result.success {
                ctx.ui.error("Dependency installation failed");
                return Ok(StepOutcome::fatal(
                    result.exit_code,
                    format!("'{}' failed", ctx.display_command(argv)),
                ));
            }
        }

        ctx.ui.success("Dependencies installed");
        Ok(StepOutcome::Passed)
    }
}

/// Formatter in check-only mode. Drift is reported, never blocking.
#[derive(Debug, Default, Clone, Copy)]
pub struct FormatStep;

impl Step for FormatStep {
    fn id(&self) -> &'static str {
        "format"
    }

    fn title(&self) -> &'static str {
        "Checking code formatting"
    }

    fn severity(&self) -> Severity {
        Severity::Advisory
    }

    fn plan(&self, config: &GateConfig, layout: &ProjectLayout) -> Result<Vec<String>> {
        plan_commands([&config.tools.format_check], layout)
    }

    fn run(&self, ctx: &mut StepContext<'_>) -> Result<StepOutcome> {
        let config = ctx.config;
        let result = ctx.run_tool(&config.tools.format_check)?;

        if result.success {
            ctx.ui.success("Code formatting is correct");
            return Ok(StepOutcome::Passed);
        }

        ctx.ui.warning("Code formatting issues found");
        let fix = ctx.display_command(&config.tools.format_fix);
        ctx.ui.show_hint(&format!("Run '{}' to fix", fix));
        Ok(StepOutcome::advisory("formatting issues"))
    }
}

/// Linter over library and tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct LintStep;

impl Step for LintStep {
    fn id(&self) -> &'static str {
        "lint"
    }

    fn title(&self) -> &'static str {
        "Running linter"
    }

    fn severity(&self) -> Severity {
        Severity::Fatal
    }

    fn plan(&self, config: &GateConfig, layout: &ProjectLayout) -> Result<Vec<String>> {
        plan_commands([&config.tools.lint], layout)
    }

    fn run(&self, ctx: &mut StepContext<'_>) -> Result<StepOutcome> {
        let config = ctx.config;
        run_fatal_tool(
            ctx,
            &config.tools.lint,
            "Linting passed",
            "Linting failed",
            None,
        )
    }
}

/// Strict type checker over the library.
#[derive(Debug, Default, Clone, Copy)]
pub struct TypeCheckStep;

impl Step for TypeCheckStep {
    fn id(&self) -> &'static str {
        "types"
    }

    fn title(&self) -> &'static str {
        "Running type checker"
    }

    fn severity(&self) -> Severity {
        Severity::Fatal
    }

    fn plan(&self, config: &GateConfig, layout: &ProjectLayout) -> Result<Vec<String>> {
        plan_commands([&config.tools.type_check], layout)
    }

    fn run(&self, ctx: &mut StepContext<'_>) -> Result<StepOutcome> {
        let config = ctx.config;
        run_fatal_tool(
            ctx,
            &config.tools.type_check,
            "Type checking passed",
            "Type checking failed",
            Some("Fix type errors before committing"),
        )
    }
}

/// Checks that the typed-package marker exists. Never creates it.
#[derive(Debug, Default, Clone, Copy)]
pub struct MarkerStep;

impl Step for MarkerStep {
    fn id(&self) -> &'static str {
        "marker"
    }

    fn title(&self) -> &'static str {
        "Checking type marker"
    }

    fn severity(&self) -> Severity {
        Severity::Fatal
    }

    fn plan(&self, _config: &GateConfig, layout: &ProjectLayout) -> Result<Vec<String>> {
        Ok(vec![format!("require {}", layout.marker_path().display())])
    }

    fn run(&self, ctx: &mut StepContext<'_>) -> Result<StepOutcome> {
        let marker = ctx.layout.marker_path();

        if ctx.layout.abs(&marker).is_file() {
            ctx.ui
                .success(&format!("{} marker file present", ctx.layout.marker));
            return Ok(StepOutcome::Passed);
        }

        ctx.ui
            .error(&format!("{} marker file missing", ctx.layout.marker));
        ctx.ui
            .show_hint(&format!("Create it with: touch {}", marker.display()));
        Ok(StepOutcome::fatal(
            None,
            format!("{} not found", marker.display()),
        ))
    }
}

/// Test runner.
#[derive(Debug, Default, Clone, Copy)]
pub struct TestStep;

impl Step for TestStep {
    fn id(&self) -> &'static str {
        "tests"
    }

    fn title(&self) -> &'static str {
        "Running tests"
    }

    fn severity(&self) -> Severity {
        Severity::Fatal
    }

    fn plan(&self, config: &GateConfig, layout: &ProjectLayout) -> Result<Vec<String>> {
        plan_commands([&config.tools.tests], layout)
    }

    fn run(&self, ctx: &mut StepContext<'_>) -> Result<StepOutcome> {
        let config = ctx.config;
        run_fatal_tool(
            ctx,
            &config.tools.tests,
            "All tests passed",
            "Tests failed",
            None,
        )
    }
}

/// Heuristic scans: console output in library code, work markers, and
/// unused imports. Each sub-scan that finds something counts one issue.
#[derive(Debug, Default, Clone, Copy)]
pub struct ScanStep;

impl Step for ScanStep {
    fn id(&self) -> &'static str {
        "scans"
    }

    fn title(&self) -> &'static str {
        "Scanning for common issues"
    }

    fn severity(&self) -> Severity {
        Severity::Advisory
    }

    fn plan(&self, config: &GateConfig, layout: &ProjectLayout) -> Result<Vec<String>> {
        Ok(vec![
            format!(
                "search {} for /{}/",
                layout.library.display(),
                config.scans.print_pattern
            ),
            format!(
                "search {} and {} for {}",
                layout.library.display(),
                layout.tests.display(),
                config.scans.work_marker
            ),
            command_line(&config.tools.unused_imports, layout)?.to_string(),
        ])
    }

    fn run(&self, ctx: &mut StepContext<'_>) -> Result<StepOutcome> {
        let config = ctx.config;
        let layout = ctx.layout;

        let print = ScanPattern::regex(&config.scans.print_pattern)?;
        tracing::debug!("Scanning {} for {}", layout.library.display(), print.as_str());
        let found = ctx.scanner.scan(&[layout.library.clone()], &print)?;
        if !found.is_empty() {
            ctx.issues.record();
            ctx.ui
                .warning("Found print statements in library code (use logging instead)");
            show_matches(&mut *ctx.ui, &found);
        }

        let marker = ScanPattern::literal(&config.scans.work_marker)?;
        let roots = [layout.library.clone(), layout.tests.clone()];
        tracing::debug!("Scanning {:?} for {}", roots, marker.as_str());
        let found = ctx.scanner.scan(&roots, &marker)?;
        if !found.is_empty() {
            ctx.issues.record();
            ctx.ui
                .warning(&format!("Found {} comments", config.scans.work_marker));
            show_matches(&mut *ctx.ui, &found);
        }

        match ctx.run_captured(&config.tools.unused_imports) {
            Ok(result) if result.success => {}
            Ok(result) if result.exit_code == Some(1) => {
                ctx.issues.record();
                ctx.ui.warning("Found unused imports");
                let lines: Vec<&str> = result
                    .stdout
                    .lines()
                    .filter(|l| !l.trim().is_empty())
                    .collect();
                show_lines(&mut *ctx.ui, &lines);
            }
            Ok(result) => {
                ctx.issues.record();
                let status = result
                    .exit_code
                    .map(|c| format!("exit code {}", c))
                    .unwrap_or_else(|| "terminated by signal".to_string());
                ctx.ui
                    .warning(&format!("Unused import check could not run ({})", status));
            }
            Err(e) => {
                ctx.issues.record();
                ctx.ui.warning("Unused import check could not run");
                ctx.ui.detail(&e.to_string());
            }
        }

        match ctx.issues.count() {
            0 => {
                ctx.ui.success("No common issues found");
                Ok(StepOutcome::Passed)
            }
            1 => Ok(StepOutcome::advisory("1 issue")),
            n => Ok(StepOutcome::advisory(format!("{} issues", n))),
        }
    }
}

/// The default pipeline, in order.
pub fn standard_steps() -> Vec<Box<dyn Step>> {
    vec![
        Box::new(BootstrapStep),
        Box::new(InstallStep),
        Box::new(FormatStep),
        Box::new(LintStep),
        Box::new(TypeCheckStep),
        Box::new(MarkerStep),
        Box::new(TestStep),
        Box::new(ScanStep),
    ]
}

fn run_fatal_tool(
    ctx: &mut StepContext<'_>,
    argv: &[String],
    passed: &str,
    failed: &str,
    hint: Option<&str>,
) -> Result<StepOutcome> {
    let result = ctx.run_tool(argv)?;

    if result.success {
        ctx.ui.success(passed);
        return Ok(StepOutcome::Passed);
    }

    ctx.ui.error(failed);
    if let Some(hint) = hint {
        ctx.ui.show_hint(hint);
    }
    Ok(StepOutcome::fatal(result.exit_code, failed))
}

fn plan_commands<'c>(
    commands: impl IntoIterator<Item = &'c Argv>,
    layout: &ProjectLayout,
) -> Result<Vec<String>> {
    commands
        .into_iter()
        .map(|argv| command_line(argv, layout).map(|inv| inv.to_string()))
        .collect()
}

fn show_matches(ui: &mut dyn UserInterface, found: &[ScanMatch]) {
    let lines: Vec<String> = found.iter().map(ToString::to_string).collect();
    let refs: Vec<&str> = lines.iter().map(String::as_str).collect();
    show_lines(ui, &refs);
}

fn show_lines(ui: &mut dyn UserInterface, lines: &[&str]) {
    for line in lines.iter().take(MAX_MATCHES_SHOWN) {
        ui.detail(line);
    }
    if lines.len() > MAX_MATCHES_SHOWN {
        ui.detail(&format!("... and {} more", lines.len() - MAX_MATCHES_SHOWN));
    }
}
