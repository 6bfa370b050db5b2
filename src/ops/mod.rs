//! High-level operations.
//!
//! This module contains the configuration pass run by the `libretuya`
//! commands: loading a build description, validating the platform block
//! and emitting build directives.

pub mod load;
pub mod to_code;
pub mod validate;

pub use load::{load_description, platform_block};
pub use to_code::{directives, to_code};
pub use validate::{set_core_data, validate_config, validate_description};
