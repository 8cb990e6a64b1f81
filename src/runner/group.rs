//! Ordered groups of checks.

use crate::checks::Check;

/// A titled, ordered batch of checks.
///
/// A gated group only runs if every required check executed before it
/// passed; otherwise its checks are skipped entirely.
#[derive(Debug)]
pub struct CheckGroup {
    heading: String,
    icon: Option<String>,
    gate: bool,
    checks: Vec<Check>,
}

impl CheckGroup {
    /// Create an ungated, empty group.
    pub fn new(heading: impl Into<String>) -> Self {
        Self {
            heading: heading.into(),
            icon: None,
            gate: false,
            checks: Vec::new(),
        }
    }

    /// Create a group that is skipped once a required check has failed.
    pub fn gated(heading: impl Into<String>) -> Self {
        Self {
            gate: true,
            ..Self::new(heading)
        }
    }

    /// Set the icon shown before the heading.
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Append a check.
    pub fn with_check(mut self, check: Check) -> Self {
        self.checks.push(check);
        self
    }

    /// Append several checks, preserving their order.
    pub fn with_checks(mut self, checks: impl IntoIterator<Item = Check>) -> Self {
        self.checks.extend(checks);
        self
    }

    pub fn heading(&self) -> &str {
        &self.heading
    }

    pub fn icon(&self) -> Option<&str> {
        self.icon.as_deref()
    }

    pub fn is_gated(&self) -> bool {
        self.gate
    }

    pub fn checks(&self) -> &[Check] {
        &self.checks
    }
}
