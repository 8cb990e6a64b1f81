//! Visual theme and styling.

use console::Style;

/// Width of the `=` rules around boxed headers.
pub const RULE_WIDTH: usize = 70;

/// Styles used by the console report.
///
/// Color is presentation only: the plain theme renders the same text.
#[derive(Debug, Clone)]
pub struct ValidateTheme {
    /// Style for the PASS marker (green).
    pub pass: Style,
    /// Style for the FAIL marker (red).
    pub fail: Style,
    /// Style for boxed header titles (bold).
    pub header: Style,
    /// Style for group labels (bold).
    pub group: Style,
    /// Style for the `=` rules (dim).
    pub border: Style,
    /// Style for indented detail lines (normal).
    pub detail: Style,
    /// Style for softened advisory notes (orange).
    pub note: Style,
}

impl Default for ValidateTheme {
    fn default() -> Self {
        Self::new()
    }
}

impl ValidateTheme {
    /// Create the colored theme.
    pub fn new() -> Self {
        Self {
            pass: Style::new().green().force_styling(true),
            fail: Style::new().red().force_styling(true),
            header: Style::new().bold().force_styling(true),
            group: Style::new().bold().force_styling(true),
            border: Style::new().dim().force_styling(true),
            detail: Style::new(),
            note: Style::new().color256(208).force_styling(true),
        }
    }

    /// Create a theme without colors (for non-TTY or `NO_COLOR`).
    pub fn plain() -> Self {
        Self {
            pass: Style::new(),
            fail: Style::new(),
            header: Style::new(),
            group: Style::new(),
            border: Style::new(),
            detail: Style::new(),
            note: Style::new(),
        }
    }

    /// Pick the colored or plain theme for the current terminal.
    pub fn detect() -> Self {
        if should_use_colors() {
            Self::new()
        } else {
            Self::plain()
        }
    }

    /// `✓ PASS` or `✗ FAIL`, colored.
    pub fn format_status(&self, passed: bool) -> String {
        if passed {
            self.pass.apply_to("✓ PASS").to_string()
        } else {
            self.fail.apply_to("✗ FAIL").to_string()
        }
    }

    /// A full-width `=` rule.
    pub fn rule(&self) -> String {
        self.border.apply_to("=".repeat(RULE_WIDTH)).to_string()
    }
}

/// Check if colors should be enabled.
pub fn should_use_colors() -> bool {
    // Check NO_COLOR env var (https://no-color.org/)
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }

    console::Term::stdout().is_term()
}
