//! Line-oriented console report.

use std::fmt::Display;
use std::io::{self, Write};

use super::hints;
use super::theme::ValidateTheme;
use super::Reporter;
use crate::checks::CheckResult;

/// Indentation of detail and note lines beneath a result.
const DETAIL_INDENT: &str = "      ";

/// Writes the validation report to a text sink.
///
/// Writes are best-effort: a closed or broken sink is logged and otherwise
/// ignored so a run always completes.
pub struct ConsoleReporter<W: Write> {
    out: W,
    theme: ValidateTheme,
}

impl ConsoleReporter<io::Stdout> {
    /// Report to stdout, colored when stdout is a terminal.
    pub fn stdout() -> Self {
        Self::new(io::stdout(), ValidateTheme::detect())
    }
}

impl<W: Write> ConsoleReporter<W> {
    pub fn new(out: W, theme: ValidateTheme) -> Self {
        Self { out, theme }
    }

    /// Consume the reporter and return the sink.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, text: impl Display) {
        if let Err(e) = writeln!(self.out, "{}", text) {
            tracing::warn!(error = %e, "failed to write report line");
        }
    }

    fn flush(&mut self) {
        if let Err(e) = self.out.flush() {
            tracing::warn!(error = %e, "failed to flush report");
        }
    }

    fn boxed(&mut self, title: &str) {
        let rule = self.theme.rule();
        let title = self.theme.header.apply_to(title).to_string();
        self.line("");
        self.line(&rule);
        self.line(format!("  {}", title));
        self.line(&rule);
    }

    fn success_template(&mut self) {
        self.line("");
        self.line(hints::success_headline());
        self.line("");
        self.line("Next steps:");
        for (idx, step) in hints::next_steps().iter().enumerate() {
            if idx > 0 {
                self.line("");
            }
            self.line(format!("  {}. {}", idx + 1, step.title));
            self.line(format!("     {}", step.detail));
        }
    }

    fn failure_template(&mut self) {
        self.line("");
        self.line(hints::failure_headline());
        self.line("");
        self.line("Some components are missing. Please:");
        for (idx, step) in hints::remediation_steps().iter().enumerate() {
            self.line(format!("  {}. {}", idx + 1, step));
        }
        self.line("");
        self.line("  If problems persist, contact the development team:");
        self.line(format!("  {}", hints::SUPPORT_CONTACT));
    }
}

impl<W: Write> Reporter for ConsoleReporter<W> {
    fn header(&mut self, title: &str) {
        self.boxed(title);
        self.flush();
    }

    fn group(&mut self, heading: &str, icon: Option<&str>) {
        let label = match icon {
            Some(icon) => format!("{} {}...", icon, heading),
            None => format!("{}...", heading),
        };
        let label = self.theme.group.apply_to(label).to_string();
        self.line("");
        self.line(label);
        self.flush();
    }

    fn result(&mut self, result: &CheckResult, note: Option<&str>) {
        let status = self.theme.format_status(result.passed());
        self.line(format!("{} - {}", status, result.name()));

        for detail in result.message().lines() {
            let detail = self.theme.detail.apply_to(detail).to_string();
            self.line(format!("{}{}", DETAIL_INDENT, detail));
        }

        if let Some(note) = note {
            let note = self.theme.note.apply_to(format!("Note: {}", note)).to_string();
            self.line(format!("{}{}", DETAIL_INDENT, note));
        }

        self.flush();
    }

    fn summary(&mut self, verdict: bool) {
        self.boxed("Validation Summary");
        if verdict {
            self.success_template();
        } else {
            self.failure_template();
        }
        let rule = self.theme.rule();
        self.line("");
        self.line(rule);
        self.line("");
        self.flush();
    }
}
