//! Report rendering.
//!
//! This module provides:
//! - [`Reporter`] trait, the sink the runner streams results into
//! - [`ConsoleReporter`] for human-facing terminal output
//! - [`RecordingReporter`] for assertions in tests
//!
//! # Example
//!
//! ```
//! use hgd_validate::ui::{ConsoleReporter, Reporter, ValidateTheme};
//!
//! let mut reporter = ConsoleReporter::new(Vec::new(), ValidateTheme::plain());
//! reporter.header("HGD Installation Validation");
//! reporter.summary(true);
//!
//! let text = String::from_utf8(reporter.into_inner()).unwrap();
//! assert!(text.contains("SUCCESS!"));
//! ```

pub mod hints;
pub mod mock;
pub mod terminal;
pub mod theme;

pub use mock::{RecordingReporter, ReportEvent};
pub use terminal::ConsoleReporter;
pub use theme::{should_use_colors, ValidateTheme};

use crate::checks::CheckResult;

/// Receives the progress of a validation run.
///
/// Calls arrive in run order: one `header`, then for each executed group a
/// `group` followed by one `result` per check, and finally `summary`.
/// Presentation only; nothing a reporter does feeds back into the verdict.
pub trait Reporter {
    /// Opening banner, once per run.
    fn header(&mut self, title: &str);

    /// A group is about to run.
    fn group(&mut self, heading: &str, icon: Option<&str>);

    /// A check finished. `note` is the softened hint for a failed check.
    fn result(&mut self, result: &CheckResult, note: Option<&str>);

    /// Closing summary for the run's verdict.
    fn summary(&mut self, verdict: bool);
}
