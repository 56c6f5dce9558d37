//! Output verbosity mode.

/// Output verbosity mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Tool output streamed, plus commands and durations.
    Verbose,
    /// Tool output streamed to the terminal.
    #[default]
    Normal,
    /// Tool output captured; shown only when a tool fails.
    Quiet,
}

impl OutputMode {
    /// Whether external tools write straight to the terminal.
    pub fn streams_tool_output(&self) -> bool {
        !matches!(self, Self::Quiet)
    }

    /// Whether to show commands, durations and per-match detail lines.
    pub fn shows_details(&self) -> bool {
        matches!(self, Self::Verbose)
    }

    /// Whether progress spinners are shown.
    pub fn shows_spinners(&self) -> bool {
        !matches!(self, Self::Verbose)
    }
}
