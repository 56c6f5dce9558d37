//! Terminal UI.
//!
//! Status lines go to stdout; warnings, errors and failing-command output go
//! to stderr.

use console::Term;
use std::io::Write;

use super::progress::format_duration;
use super::{
    should_use_colors, GateTheme, OutputMode, ProgressSpinner, RunSummary, SpinnerHandle,
    UserInterface,
};

/// Terminal UI implementation.
pub struct TerminalUI {
    out: Term,
    err: Term,
    theme: GateTheme,
    mode: OutputMode,
}

impl TerminalUI {
    /// Create a new terminal UI, colored when stdout is a TTY and
    /// `NO_COLOR` is unset.
    pub fn new(mode: OutputMode) -> Self {
        let theme = if should_use_colors() {
            GateTheme::new()
        } else {
            GateTheme::plain()
        };

        Self::with_theme(mode, theme)
    }

    /// Create with an explicit theme.
    pub fn with_theme(mode: OutputMode, theme: GateTheme) -> Self {
        Self {
            out: Term::stdout(),
            err: Term::stderr(),
            theme,
            mode,
        }
    }
}

impl UserInterface for TerminalUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        writeln!(self.out, "{}", msg).ok();
    }

    fn success(&mut self, msg: &str) {
        writeln!(self.out, "{}", self.theme.format_success(msg)).ok();
    }

    fn warning(&mut self, msg: &str) {
        writeln!(self.err, "{}", self.theme.format_warning(msg)).ok();
    }

    fn error(&mut self, msg: &str) {
        writeln!(self.err, "{}", self.theme.format_error(msg)).ok();
    }

    fn show_hint(&mut self, hint: &str) {
        writeln!(self.out, "  {}", self.theme.format_hint(hint)).ok();
    }

    fn detail(&mut self, line: &str) {
        writeln!(self.out, "    {}", self.theme.dim.apply_to(line)).ok();
    }

    fn show_header(&mut self, title: &str) {
        writeln!(self.out, "\n{}\n", self.theme.format_header(title)).ok();
    }

    fn show_step(&mut self, index: usize, total: usize, title: &str) {
        writeln!(self.out, "\n{}", self.theme.format_step(index, total, title)).ok();
    }

    fn show_error_block(&mut self, command: &str, output: &str) {
        let b = &self.theme.border;
        writeln!(
            self.err,
            "    {} {}",
            b.apply_to("┌─"),
            b.apply_to("Command ──────────────────────────")
        )
        .ok();
        writeln!(
            self.err,
            "    {} {}",
            b.apply_to("│"),
            self.theme.command.apply_to(command)
        )
        .ok();

        if !output.is_empty() {
            writeln!(
                self.err,
                "    {} {}",
                b.apply_to("├─"),
                b.apply_to("Output ───────────────────────────")
            )
            .ok();
            for line in output.lines() {
                writeln!(self.err, "    {} {}", b.apply_to("│"), line).ok();
            }
        }

        writeln!(
            self.err,
            "    {}",
            b.apply_to("└────────────────────────────────────")
        )
        .ok();
    }

    fn show_run_summary(&mut self, summary: &RunSummary) {
        let b = &self.theme.border;

        writeln!(self.out).ok();
        writeln!(
            self.out,
            "  {} {}",
            b.apply_to("┌─"),
            b.apply_to("Summary ──────────────────────────")
        )
        .ok();

        for line in &summary.lines {
            let detail = line
                .detail
                .as_deref()
                .map(|d| format!(" {}", self.theme.dim.apply_to(d)))
                .unwrap_or_default();
            writeln!(
                self.out,
                "  {} {} {:<28} {}{}",
                b.apply_to("│"),
                line.status.styled(&self.theme),
                line.name,
                self.theme.duration.apply_to(format_duration(line.duration)),
                detail,
            )
            .ok();
        }

        writeln!(
            self.out,
            "  {}",
            b.apply_to("├────────────────────────────────────")
        )
        .ok();
        let issue_label = if summary.issues == 1 { "issue" } else { "issues" };
        writeln!(
            self.out,
            "  {} Total: {} {} {} {}",
            b.apply_to("│"),
            self.theme
                .duration
                .apply_to(format_duration(summary.total_duration)),
            self.theme.dim.apply_to("·"),
            summary.issues,
            issue_label,
        )
        .ok();
        writeln!(
            self.out,
            "  {}",
            b.apply_to("└────────────────────────────────────")
        )
        .ok();
    }

    fn show_banner(&mut self, title: &str) {
        writeln!(self.out, "\n{}", self.theme.format_banner(title)).ok();
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        if self.mode.shows_spinners() && self.err.is_term() && !crate::shell::is_ci() {
            Box::new(ProgressSpinner::new(message))
        } else {
            Box::new(ProgressSpinner::hidden())
        }
    }
}

/// Create the terminal UI for the given mode.
pub fn create_ui(mode: OutputMode) -> Box<dyn UserInterface> {
    Box::new(TerminalUI::new(mode))
}
