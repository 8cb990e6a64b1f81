//! Check execution orchestration.

pub mod group;
pub mod validation;

pub use group::CheckGroup;
pub use validation::{RunReport, ValidationRunner};
