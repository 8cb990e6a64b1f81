//! Error types for validation probes.
//!
//! This module defines [`ValidateError`], the error type produced below the
//! probe boundary, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Process and import failures are classified into a `ValidateError`
//! - Probes never return these errors to the runner; they convert them into
//!   a failed [`CheckOutcome`](crate::checks::CheckOutcome)
//! - Use `anyhow::Error` (via `ValidateError::Other`) for unexpected errors

use std::time::Duration;
use thiserror::Error;

/// Core error type for validation probes.
#[derive(Debug, Error)]
pub enum ValidateError {
    /// A module or capability could not be resolved by the interpreter.
    #[error("{capability} could not be resolved: {message}")]
    MissingDependency { capability: String, message: String },

    /// An external executable was not found.
    #[error("Command not found: {tool}")]
    MissingTool { tool: String },

    /// A bounded operation exceeded its deadline.
    #[error("'{command}' timed out after {secs}s", secs = .timeout.as_secs())]
    Timeout { command: String, timeout: Duration },

    /// A subprocess ran to completion but exited unsuccessfully.
    #[error("'{command}' exited with code {code:?}: {stderr}")]
    RuntimeFailure {
        command: String,
        code: Option<i32>,
        stderr: String,
    },

    /// Invalid environment configuration.
    #[error("Invalid configuration: {message}")]
    Config { message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to serialize the smoke-test configuration.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for validation operations.
pub type Result<T> = std::result::Result<T, ValidateError>;
