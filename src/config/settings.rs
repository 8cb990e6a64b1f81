//! Runtime settings resolved from the process environment.

use std::time::Duration;

use crate::error::{Result, ValidateError};

/// Interpreter override.
pub const PYTHON_VAR: &str = "HGD_PYTHON";
/// Deadline (seconds) for `--version` probes of external tools.
pub const TOOL_TIMEOUT_VAR: &str = "HGD_VALIDATE_TOOL_TIMEOUT";
/// Deadline (seconds) for interpreter version and import probes.
pub const IMPORT_TIMEOUT_VAR: &str = "HGD_VALIDATE_IMPORT_TIMEOUT";
/// Deadline (seconds) for the end-to-end smoke test.
pub const SMOKE_TIMEOUT_VAR: &str = "HGD_VALIDATE_SMOKE_TIMEOUT";

/// Default Python interpreter name for this platform.
pub fn default_python() -> &'static str {
    if cfg!(target_os = "windows") {
        "python"
    } else {
        "python3"
    }
}

/// Settings consumed by the check catalog.
///
/// The set of checks is fixed; these only adjust how they reach the host
/// (which interpreter, how long to wait).
///
/// # Example
///
/// ```
/// use hgd_validate::config::ValidatorConfig;
///
/// let config = ValidatorConfig::from_env_with(|key: &str| match key {
///     "HGD_PYTHON" => Ok("/opt/venv/bin/python".to_string()),
///     _ => Err(std::env::VarError::NotPresent),
/// })
/// .unwrap();
///
/// assert_eq!(config.python, "/opt/venv/bin/python");
/// assert_eq!(config.tool_timeout.as_secs(), 5);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatorConfig {
    /// Interpreter used for import probes and the smoke test.
    pub python: String,
    /// Python package under validation.
    pub package: String,
    /// Deadline for `<tool> --version`.
    pub tool_timeout: Duration,
    /// Deadline for interpreter version and import probes.
    pub import_timeout: Duration,
    /// Deadline for the smoke-test subprocess.
    pub smoke_timeout: Duration,
    /// Maximum length of captured error text in a check message.
    pub message_limit: usize,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            python: default_python().to_string(),
            package: "HGD".to_string(),
            tool_timeout: Duration::from_secs(5),
            import_timeout: Duration::from_secs(30),
            smoke_timeout: Duration::from_secs(30),
            message_limit: 200,
        }
    }
}

impl ValidatorConfig {
    /// Resolve settings from the real process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_env_with(|key: &str| std::env::var(key))
    }

    /// Resolve settings with a custom env var lookup function.
    ///
    /// This allows testing without modifying actual environment variables.
    pub fn from_env_with<F>(env_fn: F) -> Result<Self>
    where
        F: Fn(&str) -> std::result::Result<String, std::env::VarError>,
    {
        let mut config = Self::default();

        if let Ok(python) = env_fn(PYTHON_VAR) {
            let python = python.trim();
            if !python.is_empty() {
                config.python = python.to_string();
            }
        }

        if let Some(timeout) = parse_seconds(&env_fn, TOOL_TIMEOUT_VAR)? {
            config.tool_timeout = timeout;
        }
        if let Some(timeout) = parse_seconds(&env_fn, IMPORT_TIMEOUT_VAR)? {
            config.import_timeout = timeout;
        }
        if let Some(timeout) = parse_seconds(&env_fn, SMOKE_TIMEOUT_VAR)? {
            config.smoke_timeout = timeout;
        }

        Ok(config)
    }
}

fn parse_seconds<F>(env_fn: &F, key: &str) -> Result<Option<Duration>>
where
    F: Fn(&str) -> std::result::Result<String, std::env::VarError>,
{
    let Ok(raw) = env_fn(key) else {
        return Ok(None);
    };

    match raw.trim().parse::<u64>() {
        Ok(0) | Err(_) => Err(ValidateError::Config {
            message: format!("{} must be a positive number of seconds, got '{}'", key, raw),
        }),
        Ok(secs) => Ok(Some(Duration::from_secs(secs))),
    }
}
