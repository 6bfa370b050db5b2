//! Test utilities for unit tests.
//!
//! # Example
//!
//! ```rust,ignore
//! use libretuya::test_support::DescriptionFixture;
//!
//! #[test]
//! fn test_example() {
//!     let tmp = tempfile::TempDir::new().unwrap();
//!     let path = DescriptionFixture::board("wb2l").write_to(tmp.path()).unwrap();
//!     // Load and validate `path`...
//! }
//! ```

pub mod fixtures;

use anyhow::Result;
use serde_json::Value;

use crate::core::config::PlatformConfig;
use crate::core::context::BuildContext;
use crate::ops::load::{parse_description, platform_block, DescriptionFormat};
use crate::ops::validate::validate_config;

// Re-export fixtures for convenience
pub use fixtures::*;

/// Parse a YAML description and return its platform block.
pub fn yaml_block(content: &str) -> Result<Value> {
    let doc = parse_description(content, DescriptionFormat::Yaml)?;
    Ok(platform_block(&doc)?.clone())
}

/// Parse and validate a YAML description with a fresh build context.
pub fn validate_yaml(content: &str) -> Result<(PlatformConfig, BuildContext)> {
    let block = yaml_block(content)?;
    let mut ctx = BuildContext::new();
    let config = validate_config(&block, &mut ctx)?;
    Ok((config, ctx))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::errors::ConfigError;
    use tempfile::TempDir;

    #[test]
    fn test_yaml_fixture_validates() {
        let (config, ctx) = validate_yaml(YAML_RECOMMENDED).unwrap();
        assert_eq!(config.framework.source, "~0.4.0");
        assert_eq!(ctx.core.target_platform.as_deref(), Some("libretuya"));
    }

    #[test]
    fn test_alias_fixture_is_rejected() {
        let err = validate_yaml(YAML_ALIAS_WITH_SOURCE).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::AliasWithSource { .. })
        ));
    }

    #[test]
    fn test_fixture_write_to() {
        let tmp = TempDir::new().unwrap();
        let path = DescriptionFixture::board("wb2l").write_to(tmp.path()).unwrap();
        assert!(std::fs::read_to_string(path).unwrap().contains("board: wb2l"));
    }
}
