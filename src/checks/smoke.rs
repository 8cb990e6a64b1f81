//! End-to-end smoke test: run a tiny simulation through the package's CLI.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use super::probe::{expect_exit, truncate_message, DEFAULT_MESSAGE_LIMIT};
use super::{CheckOutcome, Probe};
use crate::error::{Result, ValidateError};
use crate::shell::{execute, CommandOptions};

/// Prefix of the per-run scratch directory under the platform temp dir.
pub const WORKSPACE_PREFIX: &str = "hgd_validation_";

/// File name of the generated configuration.
pub const CONFIG_FILE_NAME: &str = "test.json5";

/// Parameters for the smallest useful simulation.
///
/// Serialized as plain JSON, which every JSON5 reader accepts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SmokeConfig {
    /// Grid width.
    #[serde(rename = "nx")]
    pub grid_width: u32,
    /// Grid height.
    #[serde(rename = "ny")]
    pub grid_height: u32,
    /// Number of particle-size buckets.
    #[serde(rename = "nm")]
    pub size_buckets: u32,
    /// Layer height.
    #[serde(rename = "H")]
    pub layer_height: u32,
    /// Final simulated time.
    #[serde(rename = "t_f")]
    pub final_time: f64,
    /// Initial-condition mode.
    #[serde(rename = "IC_mode")]
    pub initial_condition: String,
    pub nu_fill: f64,
    pub fill_ratio: f64,
    /// Plot outputs (kept empty).
    pub plot: Vec<String>,
    /// Video outputs (kept empty).
    pub videos: Vec<String>,
    /// Save interval.
    #[serde(rename = "save_inc")]
    pub save_interval: u32,
}

impl SmokeConfig {
    /// A 10x10 grid run for 0.1 time units with no plots or videos.
    pub fn minimal() -> Self {
        Self {
            grid_width: 10,
            grid_height: 10,
            size_buckets: 5,
            layer_height: 1,
            final_time: 0.1,
            initial_condition: "column".to_string(),
            nu_fill: 0.5,
            fill_ratio: 0.5,
            plot: Vec::new(),
            videos: Vec::new(),
            save_interval: 100,
        }
    }

    /// Write this config to `dir/test.json5` and return the path.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(CONFIG_FILE_NAME);
        let contents = serde_json::to_string_pretty(self)?;
        fs::write(&path, contents)?;
        Ok(path)
    }
}

impl Default for SmokeConfig {
    fn default() -> Self {
        Self::minimal()
    }
}

/// Runs `<python> -m <package>.main <config>` against a fresh minimal config.
#[derive(Debug, Clone)]
pub struct SmokeTestProbe {
    python: String,
    package: String,
    config: SmokeConfig,
    timeout: Duration,
    working_dir: Option<PathBuf>,
    message_limit: usize,
}

impl SmokeTestProbe {
    pub fn new(python: impl Into<String>, package: impl Into<String>, timeout: Duration) -> Self {
        Self {
            python: python.into(),
            package: package.into(),
            config: SmokeConfig::minimal(),
            timeout,
            working_dir: None,
            message_limit: DEFAULT_MESSAGE_LIMIT,
        }
    }

    /// Run the simulation from `dir` instead of the current directory.
    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    pub fn with_message_limit(mut self, limit: usize) -> Self {
        self.message_limit = limit;
        self
    }

    /// The module passed to `-m`.
    pub fn entry_module(&self) -> String {
        format!("{}.main", self.package)
    }

    fn simulate(&self) -> Result<()> {
        // Dropping the TempDir removes it; failures there are ignored.
        let workspace = tempfile::Builder::new()
            .prefix(WORKSPACE_PREFIX)
            .tempdir()
            .context("failed to create scratch directory")?;
        let config_path = self
            .config
            .write_to(workspace.path())
            .with_context(|| format!("failed to write {}", CONFIG_FILE_NAME))?;
        tracing::debug!(path = %config_path.display(), "wrote smoke-test config");

        let args: Vec<OsString> = vec![
            "-m".into(),
            self.entry_module().into(),
            config_path.into_os_string(),
        ];

        let mut options = CommandOptions::with_timeout(self.timeout);
        options.cwd = self.working_dir.clone();

        let output = expect_exit(
            &self.python,
            &args,
            execute(&self.python, &args, &options)?,
            self.timeout,
        )?;

        if output.success() {
            Ok(())
        } else {
            Err(ValidateError::RuntimeFailure {
                command: self.entry_module(),
                code: output.exit_code,
                stderr: output.stderr,
            })
        }
    }
}

impl Probe for SmokeTestProbe {
    fn run(&self) -> CheckOutcome {
        match self.simulate() {
            Ok(()) => CheckOutcome::pass("Minimal simulation completed successfully"),
            Err(ValidateError::RuntimeFailure { code, stderr, .. }) => {
                let excerpt = if stderr.trim().is_empty() {
                    match code {
                        Some(code) => format!("exited with code {} and no error output", code),
                        None => "terminated by a signal".to_string(),
                    }
                } else {
                    truncate_message(&stderr, self.message_limit)
                };
                CheckOutcome::fail(format!("Simulation failed: {}", excerpt))
            }
            Err(ValidateError::Timeout { timeout, .. }) => CheckOutcome::fail(format!(
                "Simulation timed out after {}s (may indicate a problem)",
                timeout.as_secs()
            )),
            Err(ValidateError::MissingTool { tool }) => CheckOutcome::fail(format!(
                "Could not run simulation: interpreter '{}' was not found",
                tool
            )),
            Err(e) => CheckOutcome::fail(format!(
                "Could not run simulation: {}",
                truncate_message(&e.to_string(), self.message_limit)
            )),
        }
    }
}
