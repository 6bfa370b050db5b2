//! Core data structures for the LibreTuya platform.
//!
//! This module contains the foundational types used throughout the crate:
//! - The platform configuration schema and validated record
//! - Framework version aliases and resolution
//! - The shared build context
//! - Build directives and the sink trait they are emitted into

pub mod config;
pub mod context;
pub mod directive;
pub mod errors;
pub mod version;

pub use config::PlatformConfig;
pub use context::{BuildContext, CoreData};
pub use directive::{Directive, DirectiveSink, Expression, OptionValue};
pub use errors::ConfigError;
pub use version::{resolve_framework_version, ResolvedFramework, ARDUINO_VERSIONS};
