//! LibreTuya platform integration for ESPHome-style firmware builds.
//!
//! This crate validates the `libretuya` block of a build description,
//! resolves the framework version, records target identification in a
//! shared build context and emits the build directives (compiler flags,
//! defines and PlatformIO options) the platform needs.

pub mod codegen;
pub mod core;
pub mod ops;
pub mod schema;
pub mod util;

/// Test utilities for unit tests.
///
/// This module is only available when compiling with `--cfg test` or
/// running tests. It provides sample build descriptions and helpers to
/// load and validate them.
#[cfg(test)]
pub mod test_support;

pub use codegen::BuildConfiguration;
pub use crate::core::{
    config::PlatformConfig, context::BuildContext, directive::Directive, errors::ConfigError,
    version::ResolvedFramework,
};
pub use ops::{to_code, validate_config};
