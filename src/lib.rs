//! hgd-validate - Installation health check for the HGD simulation package.
//!
//! Runs an ordered battery of checks against the local Python environment
//! (interpreter version, third-party modules, the HGD package, its compiled
//! extension, a minimal end-to-end simulation and optional tools), prints a
//! report and exits 0 only when every required check passed.
//!
//! # Modules
//!
//! - [`checks`] - Check types, probes and the fixed HGD catalog
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Interpreter and deadline settings from the environment
//! - [`error`] - Error types and result aliases
//! - [`runner`] - Group sequencing, gating and the verdict
//! - [`shell`] - Subprocess execution with deadlines
//! - [`ui`] - Report rendering
//!
//! # Example
//!
//! ```
//! use hgd_validate::checks::{Check, CheckOutcome};
//! use hgd_validate::runner::{CheckGroup, ValidationRunner};
//! use hgd_validate::ui::RecordingReporter;
//!
//! let groups = vec![
//!     CheckGroup::new("Core")
//!         .with_check(Check::required("core", || CheckOutcome::fail("missing"))),
//!     CheckGroup::gated("Extras")
//!         .with_check(Check::advisory("extra", || CheckOutcome::pass("ok"))),
//! ];
//!
//! let mut reporter = RecordingReporter::new();
//! let report = ValidationRunner::new("Demo").run(&groups, &mut reporter);
//!
//! assert!(!report.verdict());
//! assert_eq!(report.exit_code(), 1);
//! assert_eq!(report.skipped(), ["Extras"]);
//! ```

pub mod checks;
pub mod cli;
pub mod config;
pub mod error;
pub mod runner;
pub mod shell;
pub mod ui;

pub use error::{Result, ValidateError};
