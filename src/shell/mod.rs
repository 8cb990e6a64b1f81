//! External process execution.

pub mod command;

pub use command::{display_command, execute, CapturedOutput, CommandOptions, ProcessOutcome};
