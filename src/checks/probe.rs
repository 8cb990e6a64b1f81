//! Host probes: interpreter version, module imports, and external tools.
//!
//! Every probe shells out to a process under a hard deadline (see
//! [`crate::shell::execute`]) and classifies what happened into a
//! [`ValidateError`] before rendering a [`CheckOutcome`].

use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;

use super::{CheckOutcome, Probe};
use crate::error::{Result, ValidateError};
use crate::shell::{display_command, execute, CapturedOutput, CommandOptions, ProcessOutcome};

/// Maximum length, in characters, of captured error text in a message.
pub const DEFAULT_MESSAGE_LIMIT: usize = 200;

static RE_VERSION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+)\.(\d+)\.(\d+)").expect("version regex is valid")
});

/// Prints `major.minor.micro` of the running interpreter.
const VERSION_SNIPPET: &str = "import sys; print('%d.%d.%d' % sys.version_info[:3])";

/// Cut `text` to at most `limit` characters.
///
/// CRLF and lone CR line endings are normalised to LF first so the bound
/// means the same thing on every platform. Truncation happens on a `char`
/// boundary.
///
/// # Example
///
/// ```
/// use hgd_validate::checks::truncate_message;
///
/// assert_eq!(truncate_message("abc\r\ndef", 5), "abc\nd");
/// assert_eq!(truncate_message("short", 200), "short");
/// ```
pub fn truncate_message(text: &str, limit: usize) -> String {
    let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
    match normalized.char_indices().nth(limit) {
        Some((idx, _)) => normalized[..idx].to_string(),
        None => normalized,
    }
}

/// The last non-empty line of a process's stderr.
///
/// For a failed Python import this is the exception line
/// (`ModuleNotFoundError: No module named 'scipy'`) rather than the
/// traceback preamble.
pub fn resolution_error(stderr: &str) -> String {
    stderr
        .lines()
        .map(str::trim)
        .rfind(|line| !line.is_empty())
        .unwrap_or("no error output")
        .to_string()
}

/// Parse `major.minor.micro` out of interpreter output.
pub fn parse_version(output: &str) -> Option<(u32, u32, u32)> {
    let caps = RE_VERSION.captures(output)?;
    let major = caps.get(1)?.as_str().parse().ok()?;
    let minor = caps.get(2)?.as_str().parse().ok()?;
    let micro = caps.get(3)?.as_str().parse().ok()?;
    Some((major, minor, micro))
}

/// Checks that the Python interpreter runs and is new enough.
#[derive(Debug, Clone)]
pub struct InterpreterVersionProbe {
    python: String,
    minimum: (u32, u32),
    timeout: Duration,
    message_limit: usize,
}

impl InterpreterVersionProbe {
    pub fn new(python: impl Into<String>, minimum: (u32, u32), timeout: Duration) -> Self {
        Self {
            python: python.into(),
            minimum,
            timeout,
            message_limit: DEFAULT_MESSAGE_LIMIT,
        }
    }

    pub fn with_message_limit(mut self, limit: usize) -> Self {
        self.message_limit = limit;
        self
    }

    fn query_version(&self) -> Result<(u32, u32, u32)> {
        let args = ["-c", VERSION_SNIPPET];
        let output = expect_exit(
            &self.python,
            &args,
            execute(&self.python, &args, &CommandOptions::with_timeout(self.timeout))?,
            self.timeout,
        )?;

        if !output.success() {
            return Err(ValidateError::RuntimeFailure {
                command: self.python.clone(),
                code: output.exit_code,
                stderr: resolution_error(&output.stderr),
            });
        }

        parse_version(&output.stdout).ok_or_else(|| ValidateError::Config {
            message: format!(
                "Could not determine Python version from '{}'",
                output.stdout.trim()
            ),
        })
    }
}

impl Probe for InterpreterVersionProbe {
    fn run(&self) -> CheckOutcome {
        let (required_major, required_minor) = self.minimum;

        match self.query_version() {
            Ok((major, minor, micro)) => {
                let mut message = format!("Python {}.{}.{}", major, minor, micro);
                let passed = (major, minor) >= self.minimum;
                if !passed {
                    message.push_str(&format!(
                        " (Required: {}.{}+)",
                        required_major, required_minor
                    ));
                }
                CheckOutcome {
                    passed,
                    message,
                }
            }
            Err(ValidateError::MissingTool { tool }) => CheckOutcome::fail(format!(
                "Python interpreter '{}' was not found (Required: {}.{}+)",
                tool, required_major, required_minor
            )),
            Err(ValidateError::Timeout { timeout, .. }) => CheckOutcome::fail(format!(
                "{} did not respond within {}s",
                self.python,
                timeout.as_secs()
            )),
            Err(ValidateError::RuntimeFailure { stderr, .. }) => CheckOutcome::fail(format!(
                "{} failed: {}",
                self.python,
                truncate_message(&stderr, self.message_limit)
            )),
            Err(ValidateError::Config { message }) => {
                CheckOutcome::fail(truncate_message(&message, self.message_limit))
            }
            Err(e) => CheckOutcome::fail(format!(
                "Could not run {}: {}",
                self.python,
                truncate_message(&e.to_string(), self.message_limit)
            )),
        }
    }
}

/// Checks that a named capability resolves, judged by a resolver process
/// exiting successfully.
///
/// The usual resolver is `python -c "import ..."` (see
/// [`CapabilityProbe::python_import`]), but any program and argument list
/// can stand in.
#[derive(Debug, Clone)]
pub struct CapabilityProbe {
    capability: String,
    program: String,
    args: Vec<String>,
    timeout: Duration,
    success_message: String,
    failure_message: String,
    message_limit: usize,
}

impl CapabilityProbe {
    /// Resolve `capability` by running `program args...`.
    pub fn new(
        capability: impl Into<String>,
        program: impl Into<String>,
        args: Vec<String>,
        timeout: Duration,
    ) -> Self {
        let capability = capability.into();
        Self {
            success_message: format!("{} is installed", capability),
            failure_message: format!("{} is NOT installed", capability),
            capability,
            program: program.into(),
            args,
            timeout,
            message_limit: DEFAULT_MESSAGE_LIMIT,
        }
    }

    /// Resolve Python modules by importing them all in one interpreter.
    pub fn python_import(python: &str, modules: &[String], timeout: Duration) -> Self {
        let statement = format!("import {}", modules.join(", "));
        Self::new(
            modules.join(", "),
            python,
            vec!["-c".to_string(), statement],
            timeout,
        )
    }

    /// Override the pass and fail messages.
    ///
    /// The resolver's error text is appended to `failure` when the
    /// capability cannot be resolved.
    pub fn with_messages(mut self, success: impl Into<String>, failure: impl Into<String>) -> Self {
        self.success_message = success.into();
        self.failure_message = failure.into();
        self
    }

    pub fn with_message_limit(mut self, limit: usize) -> Self {
        self.message_limit = limit;
        self
    }

    pub fn capability(&self) -> &str {
        &self.capability
    }

    /// The command line this probe runs.
    pub fn command_line(&self) -> String {
        display_command(&self.program, &self.args)
    }

    fn resolve(&self) -> Result<()> {
        let output = expect_exit(
            &self.program,
            &self.args,
            execute(
                &self.program,
                &self.args,
                &CommandOptions::with_timeout(self.timeout),
            )?,
            self.timeout,
        )?;

        if output.success() {
            Ok(())
        } else {
            Err(ValidateError::MissingDependency {
                capability: self.capability.clone(),
                message: resolution_error(&output.stderr),
            })
        }
    }
}

impl Probe for CapabilityProbe {
    fn run(&self) -> CheckOutcome {
        let detail = match self.resolve() {
            Ok(()) => return CheckOutcome::pass(self.success_message.clone()),
            Err(ValidateError::MissingDependency { message, .. }) => message,
            Err(ValidateError::MissingTool { tool }) => {
                format!("interpreter '{}' was not found", tool)
            }
            Err(e) => e.to_string(),
        };

        CheckOutcome::fail(format!(
            "{}: {}",
            self.failure_message,
            truncate_message(&detail, self.message_limit)
        ))
    }
}

/// Checks that an external tool launches: `<tool> --version`.
///
/// The tool's own exit code is ignored; starting and finishing before the
/// deadline is the signal.
#[derive(Debug, Clone)]
pub struct CommandProbe {
    tool: String,
    timeout: Duration,
}

impl CommandProbe {
    pub fn new(tool: impl Into<String>, timeout: Duration) -> Self {
        Self {
            tool: tool.into(),
            timeout,
        }
    }

    pub fn tool(&self) -> &str {
        &self.tool
    }

    fn launch(&self) -> Result<()> {
        let args = ["--version"];
        let outcome = execute(&self.tool, &args, &CommandOptions::with_timeout(self.timeout))?;
        expect_exit(&self.tool, &args, outcome, self.timeout).map(|_| ())
    }
}

impl Probe for CommandProbe {
    fn run(&self) -> CheckOutcome {
        match self.launch() {
            Ok(()) => CheckOutcome::pass(format!("{} is available", self.tool)),
            Err(ValidateError::MissingTool { .. }) => CheckOutcome::fail(format!(
                "{} is NOT available (command not found)",
                self.tool
            )),
            Err(ValidateError::Timeout { timeout, .. }) => CheckOutcome::fail(format!(
                "{} is NOT available (no response within {}s)",
                self.tool,
                timeout.as_secs()
            )),
            Err(e) => CheckOutcome::fail(format!("{} is NOT available ({})", self.tool, e)),
        }
    }
}

/// Turn a timed-out process into [`ValidateError::Timeout`].
pub(crate) fn expect_exit<S: AsRef<std::ffi::OsStr>>(
    program: &str,
    args: &[S],
    outcome: ProcessOutcome,
    timeout: Duration,
) -> Result<CapturedOutput> {
    match outcome {
        ProcessOutcome::Exited(output) => Ok(output),
        ProcessOutcome::TimedOut => Err(ValidateError::Timeout {
            command: display_command(program, args),
            timeout,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn truncate_leaves_short_text_alone() {
        assert_eq!(truncate_message("No module named 'x'", 200), "No module named 'x'");
    }

    #[test]
    fn truncate_cuts_to_exact_bound() {
        let long = "x".repeat(500);
        let cut = truncate_message(&long, 200);
        assert_eq!(cut.chars().count(), 200);
    }

    #[test]
    fn truncate_is_line_ending_independent() {
        let unix = "line\n".repeat(100);
        let windows = "line\r\n".repeat(100);
        let unix_cut = truncate_message(&unix, 200);
        let windows_cut = truncate_message(&windows, 200);

        assert_eq!(unix_cut, windows_cut);
        assert!(windows_cut.chars().count() <= 200);
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        let text = "é".repeat(300);
        let cut = truncate_message(&text, 200);
        assert_eq!(cut.chars().count(), 200);
    }

    #[test]
    fn resolution_error_takes_last_line() {
        let stderr = "Traceback (most recent call last):\n  File \"<string>\", line 1, in <module>\nModuleNotFoundError: No module named 'scipy'\n\n";
        assert_eq!(
            resolution_error(stderr),
            "ModuleNotFoundError: No module named 'scipy'"
        );
    }

    #[test]
    fn resolution_error_on_empty_stderr() {
        assert_eq!(resolution_error("  \n"), "no error output");
    }

    #[test]
    fn parse_version_extracts_triple() {
        assert_eq!(parse_version("3.11.4\n"), Some((3, 11, 4)));
        assert_eq!(parse_version("Python 3.9.18"), Some((3, 9, 18)));
        assert_eq!(parse_version("garbage"), None);
    }

    #[test]
    fn command_probe_missing_tool_fails_fast() {
        let probe = CommandProbe::new(
            "hgd-validate-definitely-not-a-real-binary",
            Duration::from_secs(5),
        );
        let start = Instant::now();

        let outcome = probe.run();

        assert!(!outcome.passed);
        assert!(outcome.message.contains("NOT available"));
        assert!(outcome.message.contains("command not found"));
        assert!(start.elapsed() < Duration::from_secs(5));
    }

    #[cfg(unix)]
    #[test]
    fn command_probe_ignores_exit_code() {
        // dash rejects `--version` with a nonzero exit; launching is enough.
        let probe = CommandProbe::new("sh", Duration::from_secs(5));
        let outcome = probe.run();

        assert!(outcome.passed);
        assert_eq!(outcome.message, "sh is available");
    }

    #[cfg(unix)]
    #[test]
    fn capability_probe_passes_when_resolver_succeeds() {
        let probe = CapabilityProbe::new(
            "numpy",
            "sh",
            vec!["-c".into(), "exit 0".into()],
            Duration::from_secs(5),
        );

        let outcome = probe.run();

        assert!(outcome.passed);
        assert_eq!(outcome.message, "numpy is installed");
    }

    #[cfg(unix)]
    #[test]
    fn capability_probe_reports_resolution_error() {
        let probe = CapabilityProbe::new(
            "scipy",
            "sh",
            vec![
                "-c".into(),
                "echo 'Traceback' >&2; echo \"ModuleNotFoundError: No module named 'scipy'\" >&2; exit 1"
                    .into(),
            ],
            Duration::from_secs(5),
        );

        let outcome = probe.run();

        assert!(!outcome.passed);
        assert_eq!(
            outcome.message,
            "scipy is NOT installed: ModuleNotFoundError: No module named 'scipy'"
        );
    }

    #[cfg(unix)]
    #[test]
    fn capability_probe_truncates_long_errors() {
        let probe = CapabilityProbe::new(
            "HGD",
            "sh",
            vec!["-c".into(), "printf '%0300d' 0 >&2; exit 1".into()],
            Duration::from_secs(5),
        )
        .with_messages("ok", "HGD import failed")
        .with_message_limit(50);

        let outcome = probe.run();

        assert!(!outcome.passed);
        let detail = outcome.message.trim_start_matches("HGD import failed: ");
        assert_eq!(detail.chars().count(), 50);
    }

    #[cfg(unix)]
    #[test]
    fn capability_probe_times_out() {
        let probe = CapabilityProbe::new(
            "slow",
            "sleep",
            vec!["5".into()],
            Duration::from_millis(200),
        );

        let outcome = probe.run();

        assert!(!outcome.passed);
        assert!(outcome.message.contains("timed out"));
    }

    #[cfg(unix)]
    #[test]
    fn capability_probe_not_held_up_by_background_process() {
        let probe = CapabilityProbe::new(
            "worker",
            "sh",
            vec!["-c".into(), "sleep 4 & exit 0".into()],
            Duration::from_millis(300),
        );
        let start = Instant::now();

        let outcome = probe.run();

        assert!(outcome.passed, "unexpected failure: {}", outcome.message);
        assert!(start.elapsed() < Duration::from_secs(2));
    }

    #[test]
    fn capability_probe_missing_interpreter() {
        let probe = CapabilityProbe::python_import(
            "hgd-validate-no-such-python",
            &["numpy".to_string()],
            Duration::from_secs(5),
        );

        let outcome = probe.run();

        assert!(!outcome.passed);
        assert!(outcome.message.contains("hgd-validate-no-such-python"));
    }

    #[test]
    fn python_import_builds_single_statement() {
        let modules = vec!["HGD".to_string(), "HGD.main".to_string()];
        let probe = CapabilityProbe::python_import("python3", &modules, Duration::from_secs(5));

        assert_eq!(probe.capability(), "HGD, HGD.main");
        assert_eq!(probe.command_line(), "python3 -c import HGD, HGD.main");
    }

    #[test]
    fn version_probe_missing_interpreter() {
        let probe = InterpreterVersionProbe::new(
            "hgd-validate-no-such-python",
            (3, 9),
            Duration::from_secs(5),
        );

        let outcome = probe.run();

        assert!(!outcome.passed);
        assert!(outcome.message.contains("was not found"));
        assert!(outcome.message.contains("3.9+"));
    }

    #[cfg(unix)]
    #[test]
    fn version_probe_rejects_unparseable_output() {
        // sh cannot run the Python snippet.
        let probe = InterpreterVersionProbe::new("sh", (3, 9), Duration::from_secs(5));
        let outcome = probe.run();
        assert!(!outcome.passed);
    }
}
