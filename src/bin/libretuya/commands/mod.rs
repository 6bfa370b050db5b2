//! Command implementations

pub mod completions;
pub mod flags;
pub mod generate;
pub mod validate;
