//! Verification checks and their outcomes.
//!
//! A [`Check`] pairs a name and a [`Severity`] with a [`Probe`], the
//! procedure that actually inspects the host. Executing a check always
//! produces a [`CheckResult`]; probe failures (missing module, missing
//! tool, timeouts, even panics) are folded into a failed result instead of
//! escaping to the caller.
//!
//! # Modules
//!
//! - [`probe`] - Interpreter, capability (import) and external command probes
//! - [`smoke`] - End-to-end smoke test against a minimal simulation config
//! - [`catalog`] - The fixed set of check groups for an HGD installation
//!
//! # Example
//!
//! ```
//! use hgd_validate::checks::{Check, CheckOutcome};
//!
//! let check = Check::required("always", || CheckOutcome::pass("fine"));
//! let result = check.execute();
//! assert!(result.passed());
//! assert_eq!(result.message(), "fine");
//! ```

pub mod catalog;
pub mod probe;
pub mod smoke;

pub use probe::{
    truncate_message, CapabilityProbe, CommandProbe, InterpreterVersionProbe,
    DEFAULT_MESSAGE_LIMIT,
};
pub use smoke::{SmokeConfig, SmokeTestProbe};

use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};

/// Whether a failing check counts against the overall verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Failure means the installation is broken.
    Required,
    /// Failure is reported but does not change the verdict.
    Advisory,
}

impl Severity {
    /// Whether this severity participates in the verdict.
    pub fn is_required(&self) -> bool {
        matches!(self, Severity::Required)
    }
}

/// The `(passed, message)` pair produced by a probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckOutcome {
    /// Whether the probe succeeded.
    pub passed: bool,
    /// Human-readable detail (may be empty).
    pub message: String,
}

impl CheckOutcome {
    /// A successful outcome.
    pub fn pass(message: impl Into<String>) -> Self {
        Self {
            passed: true,
            message: message.into(),
        }
    }

    /// A failed outcome.
    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            passed: false,
            message: message.into(),
        }
    }
}

/// A procedure that inspects the host and reports an outcome.
///
/// Implementations must be bounded in time and must not panic; any failure
/// to resolve what they look for is reported as a failed [`CheckOutcome`].
/// Closures returning a `CheckOutcome` are probes too.
pub trait Probe {
    /// Run the probe once.
    fn run(&self) -> CheckOutcome;
}

impl<F> Probe for F
where
    F: Fn() -> CheckOutcome,
{
    fn run(&self) -> CheckOutcome {
        self()
    }
}

/// Immutable record of one executed check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckResult {
    name: String,
    severity: Severity,
    passed: bool,
    message: String,
}

impl CheckResult {
    /// Record the outcome of the named check.
    pub fn new(name: impl Into<String>, severity: Severity, outcome: CheckOutcome) -> Self {
        Self {
            name: name.into(),
            severity,
            passed: outcome.passed,
            message: outcome.message,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn passed(&self) -> bool {
        self.passed
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Whether this result counts toward the verdict.
    pub fn is_required(&self) -> bool {
        self.severity.is_required()
    }
}

/// A named unit of verification.
pub struct Check {
    name: String,
    severity: Severity,
    note: Option<String>,
    probe: Box<dyn Probe>,
}

impl Check {
    /// Create a check with an explicit severity.
    pub fn new(name: impl Into<String>, severity: Severity, probe: impl Probe + 'static) -> Self {
        Self {
            name: name.into(),
            severity,
            note: None,
            probe: Box::new(probe),
        }
    }

    /// Create a check whose failure fails the run.
    pub fn required(name: impl Into<String>, probe: impl Probe + 'static) -> Self {
        Self::new(name, Severity::Required, probe)
    }

    /// Create a check whose failure is only reported.
    pub fn advisory(name: impl Into<String>, probe: impl Probe + 'static) -> Self {
        Self::new(name, Severity::Advisory, probe)
    }

    /// Attach a note shown beneath the result when the check fails.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }

    /// Run the probe and record its outcome.
    ///
    /// A panicking probe yields a failed result rather than unwinding
    /// into the runner.
    pub fn execute(&self) -> CheckResult {
        tracing::debug!(check = %self.name, severity = ?self.severity, "running check");

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| self.probe.run()))
            .unwrap_or_else(|payload| {
                let reason = panic_reason(payload.as_ref());
                tracing::warn!(check = %self.name, %reason, "probe panicked");
                CheckOutcome::fail(format!("Check aborted unexpectedly: {}", reason))
            });

        CheckResult::new(self.name.clone(), self.severity, outcome)
    }
}

impl fmt::Debug for Check {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Check")
            .field("name", &self.name)
            .field("severity", &self.severity)
            .field("note", &self.note)
            .finish_non_exhaustive()
    }
}

/// Run `f` with the default panic hook replaced by a debug log.
///
/// [`Check::execute`] already turns a probe panic into a failed result; this
/// keeps the hook's `thread 'main' panicked at ...` text out of the report.
/// The hook is process-wide, so call this from one thread only.
pub fn with_quiet_panics<T>(f: impl FnOnce() -> T) -> T {
    let previous = panic::take_hook();
    panic::set_hook(Box::new(|info| {
        tracing::debug!(%info, "panic contained by check");
    }));
    let value = f();
    panic::set_hook(previous);
    value
}

fn panic_reason(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
