//! Status icons for the run summary.

use super::theme::GateTheme;

/// Status of one row in the run summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusKind {
    /// Step passed.
    Success,
    /// Fatal step failed.
    Failed,
    /// Advisory step reported issues.
    Warning,
}

impl StatusKind {
    /// Unicode icon for TTY output.
    pub fn icon(self) -> &'static str {
        match self {
            Self::Success => "✓",
            Self::Failed => "✗",
            Self::Warning => "⚠",
        }
    }

    /// Styled icon string using the given theme.
    pub fn styled(self, theme: &GateTheme) -> String {
        let icon = self.icon();
        match self {
            Self::Success => theme.success.apply_to(icon).to_string(),
            Self::Failed => theme.error.apply_to(icon).to_string(),
            Self::Warning => theme.warning.apply_to(icon).to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn icons_are_distinct() {
        let kinds = [StatusKind::Success, StatusKind::Failed, StatusKind::Warning];
        let icons: std::collections::HashSet<_> = kinds.iter().map(|k| k.icon()).collect();
        assert_eq!(icons.len(), kinds.len());
    }

    #[test]
    fn plain_styling_is_bare_icon() {
        assert_eq!(StatusKind::Warning.styled(&GateTheme::plain()), "⚠");
    }
}
