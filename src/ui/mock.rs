//! Recording reporter for testing.
//!
//! `RecordingReporter` implements the [`Reporter`] trait and captures every
//! event for later assertion.
//!
//! # Example
//!
//! ```
//! use hgd_validate::checks::{Check, CheckOutcome};
//! use hgd_validate::runner::{CheckGroup, ValidationRunner};
//! use hgd_validate::ui::RecordingReporter;
//!
//! let groups = vec![CheckGroup::new("Environment")
//!     .with_check(Check::required("always", || CheckOutcome::pass("ok")))];
//!
//! let mut reporter = RecordingReporter::new();
//! let report = ValidationRunner::new("Demo").run(&groups, &mut reporter);
//!
//! assert_eq!(reporter.groups(), vec!["Environment"]);
//! assert_eq!(reporter.results().len(), 1);
//! assert!(report.verdict());
//! ```

use super::Reporter;
use crate::checks::CheckResult;

/// A single reporter call, in the order it was made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportEvent {
    Header(String),
    Group(String),
    Result(CheckResult, Option<String>),
    Summary(bool),
}

/// Reporter that records calls instead of printing them.
#[derive(Debug, Default)]
pub struct RecordingReporter {
    events: Vec<ReportEvent>,
    results: Vec<(CheckResult, Option<String>)>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every event in call order.
    pub fn events(&self) -> &[ReportEvent] {
        &self.events
    }

    pub fn headers(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                ReportEvent::Header(title) => Some(title.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn groups(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                ReportEvent::Group(heading) => Some(heading.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Streamed results with the note passed alongside each.
    pub fn results(&self) -> &[(CheckResult, Option<String>)] {
        &self.results
    }

    /// The verdict passed to `summary`, if it was called.
    pub fn verdict(&self) -> Option<bool> {
        self.events.iter().rev().find_map(|e| match e {
            ReportEvent::Summary(verdict) => Some(*verdict),
            _ => None,
        })
    }
}

impl Reporter for RecordingReporter {
    fn header(&mut self, title: &str) {
        self.events.push(ReportEvent::Header(title.to_string()));
    }

    fn group(&mut self, heading: &str, _icon: Option<&str>) {
        self.events.push(ReportEvent::Group(heading.to_string()));
    }

    fn result(&mut self, result: &CheckResult, note: Option<&str>) {
        let note = note.map(str::to_string);
        self.results.push((result.clone(), note.clone()));
        self.events.push(ReportEvent::Result(result.clone(), note));
    }

    fn summary(&mut self, verdict: bool) {
        self.events.push(ReportEvent::Summary(verdict));
    }
}
