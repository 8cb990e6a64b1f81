//! Configuration for a validation run.
//!
//! There is no configuration file. The check set is fixed at build time;
//! environment variables only select the interpreter and adjust deadlines
//! (see [`settings`]).

pub mod settings;

pub use settings::{
    default_python, ValidatorConfig, IMPORT_TIMEOUT_VAR, PYTHON_VAR, SMOKE_TIMEOUT_VAR,
    TOOL_TIMEOUT_VAR,
};
