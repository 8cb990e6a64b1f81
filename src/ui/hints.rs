//! Guidance text for the end-of-run summary.
//!
//! Provides the suggested next actions after a clean validation and the
//! remediation steps after a failed one.

/// Where to ask for help when remediation does not work.
pub const SUPPORT_CONTACT: &str =
    "https://matrix.to/#/!UZnyhaLhQymfFbLJYI:matrix.org?via=matrix.org";

/// A numbered suggestion with an optional detail line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NextStep {
    pub title: &'static str,
    pub detail: &'static str,
}

/// Headline printed when every required check passed.
pub fn success_headline() -> &'static str {
    "✅ SUCCESS! HGD is properly installed and ready to use."
}

/// What to try once the installation is confirmed.
pub fn next_steps() -> &'static [NextStep] {
    &[
        NextStep {
            title: "Try the quick test:",
            detail: "python HGD/main.py json/minimal_test.json5",
        },
        NextStep {
            title: "Read the getting started guide:",
            detail: "See GETTING_STARTED.md",
        },
        NextStep {
            title: "Explore examples:",
            detail: "See EXAMPLES.md",
        },
    ]
}

/// Headline printed when a required check failed.
pub fn failure_headline() -> &'static str {
    "❌ INSTALLATION INCOMPLETE"
}

/// Ordered remediation steps after a failed run.
pub fn remediation_steps() -> &'static [&'static str] {
    &[
        "Review the error messages above",
        "Check TROUBLESHOOTING.md for solutions",
        "Ensure you ran: pip install -e .",
    ]
}
