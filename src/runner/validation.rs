//! Validation run orchestration.

use tracing::{debug, info};

use crate::checks::CheckResult;
use crate::ui::Reporter;

use super::group::CheckGroup;

/// Outcome of a complete validation run.
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    results: Vec<CheckResult>,
    skipped: Vec<String>,
}

impl RunReport {
    /// Results of every executed check, in execution order.
    pub fn results(&self) -> &[CheckResult] {
        &self.results
    }

    /// Headings of gated groups that were not executed.
    pub fn skipped(&self) -> &[String] {
        &self.skipped
    }

    /// Whether every required check passed.
    ///
    /// Advisory results are ignored; with no required results the verdict
    /// is vacuously true.
    pub fn verdict(&self) -> bool {
        self.results
            .iter()
            .filter(|r| r.is_required())
            .all(|r| r.passed())
    }

    /// Process exit status: 0 when the verdict holds, 1 otherwise.
    pub fn exit_code(&self) -> u8 {
        if self.verdict() {
            0
        } else {
            1
        }
    }

    /// Names of required checks that failed.
    pub fn failed_required(&self) -> Vec<&str> {
        self.results
            .iter()
            .filter(|r| r.is_required() && !r.passed())
            .map(|r| r.name())
            .collect()
    }

    /// Names of advisory checks that failed.
    pub fn failed_advisory(&self) -> Vec<&str> {
        self.results
            .iter()
            .filter(|r| !r.is_required() && !r.passed())
            .map(|r| r.name())
            .collect()
    }
}

/// Executes check groups in order and streams results to a [`Reporter`].
pub struct ValidationRunner {
    title: String,
}

impl ValidationRunner {
    /// Create a runner whose report opens with `title`.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }

    /// Run every applicable group.
    ///
    /// Each result is handed to the reporter as soon as its check finishes.
    /// Once a required check fails, later gated groups are skipped and
    /// produce neither results nor output.
    pub fn run(&self, groups: &[CheckGroup], reporter: &mut dyn Reporter) -> RunReport {
        info!(title = %self.title, groups = groups.len(), "validation started");
        reporter.header(&self.title);

        let mut report = RunReport::default();
        let mut prerequisites_met = true;

        for group in groups {
            if group.is_gated() && !prerequisites_met {
                debug!(group = %group.heading(), "skipping gated group after required failure");
                report.skipped.push(group.heading().to_string());
                continue;
            }

            reporter.group(group.heading(), group.icon());

            for check in group.checks() {
                let result = check.execute();

                if result.is_required() && !result.passed() {
                    prerequisites_met = false;
                }

                let note = if result.passed() { None } else { check.note() };
                reporter.result(&result, note);
                report.results.push(result);
            }
        }

        info!(
            verdict = report.verdict(),
            executed = report.results.len(),
            skipped = report.skipped.len(),
            "validation finished"
        );
        report
    }
}
