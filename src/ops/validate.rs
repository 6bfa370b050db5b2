//! Implementation of platform configuration validation.

use std::path::Path;

use serde_json::Value;
use tracing::{debug, info};

use crate::core::config::{
    config_schema, PlatformConfig, FRAMEWORK_NAME, KEY_BOARD, PLATFORM_NAME,
};
use crate::core::context::BuildContext;
use crate::core::errors::ConfigError;
use crate::ops::load::{load_description, platform_block};
use crate::schema::ConfigPath;

/// Validate the raw `libretuya` block and record the result in `ctx`.
///
/// The context is only written once every check has passed; a rejected
/// configuration leaves it untouched.
pub fn validate_config(raw: &Value, ctx: &mut BuildContext) -> Result<PlatformConfig, ConfigError> {
    let path = ConfigPath::root().join(PLATFORM_NAME);

    debug!(platform = PLATFORM_NAME, "validating configuration");
    let validated = config_schema().validate(raw, &path)?;
    let config = PlatformConfig::from_validated(&validated, &path)?;

    set_core_data(&config, ctx);
    Ok(config)
}

/// Load the build description at `path` and validate its platform block.
pub fn validate_description(path: &Path, ctx: &mut BuildContext) -> anyhow::Result<PlatformConfig> {
    let doc = load_description(path)?;
    let block = platform_block(&doc)?;
    Ok(validate_config(block, ctx)?)
}

/// Write platform identification and the board into the build context.
pub fn set_core_data(config: &PlatformConfig, ctx: &mut BuildContext) {
    ctx.core.target_platform = Some(PLATFORM_NAME.to_string());
    ctx.core.target_framework = Some(FRAMEWORK_NAME.to_string());
    ctx.core.framework_version = Some(config.framework.version.clone());

    ctx.reset_platform(PLATFORM_NAME)
        .insert(KEY_BOARD.to_string(), Value::String(config.board.clone()));

    info!(
        board = %config.board,
        version = %config.framework.version,
        source = %config.framework.source,
        "resolved framework"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{DescriptionFixture, TOML_CUSTOM_SOURCE};
    use semver::Version;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_end_to_end_recommended() {
        let mut ctx = BuildContext::new();
        let config = validate_config(
            &json!({"board": "generic-bk7231n", "framework": {}}),
            &mut ctx,
        )
        .unwrap();

        assert_eq!(config.board, "generic-bk7231n");
        assert_eq!(config.framework.version.to_string(), "0.4.0");
        assert_eq!(config.framework.source, "~0.4.0");

        assert_eq!(ctx.core.target_platform.as_deref(), Some("libretuya"));
        assert_eq!(ctx.core.target_framework.as_deref(), Some("arduino"));
        assert_eq!(ctx.core.framework_version, Some(Version::new(0, 4, 0)));
        assert_eq!(
            ctx.platform_value("libretuya", "board"),
            Some(&json!("generic-bk7231n"))
        );
    }

    #[test]
    fn test_failure_leaves_context_untouched() {
        let mut ctx = BuildContext::new();
        let err = validate_config(
            &json!({"board": "wb2l", "framework": {"version": "latest", "source": "custom@1.0"}}),
            &mut ctx,
        )
        .unwrap_err();

        assert!(matches!(err, ConfigError::AliasWithSource { .. }));
        assert_eq!(err.path().to_string(), "libretuya -> framework");
        assert_eq!(ctx, BuildContext::new());
    }

    #[test]
    fn test_invalid_version_is_rejected() {
        let mut ctx = BuildContext::new();
        let err = validate_config(
            &json!({"board": "wb2l", "framework": {"version": "not-a-version"}}),
            &mut ctx,
        )
        .unwrap_err();

        assert!(matches!(err, ConfigError::InvalidVersion { .. }));
        assert_eq!(err.path().to_string(), "libretuya -> framework -> version");
    }

    #[test]
    fn test_validate_description_file() {
        let tmp = TempDir::new().unwrap();
        let path = DescriptionFixture::new("device.toml", TOML_CUSTOM_SOURCE)
            .write_to(tmp.path())
            .unwrap();

        let mut ctx = BuildContext::new();
        let config = validate_description(&path, &mut ctx).unwrap();

        assert_eq!(config.board, "wb2l");
        assert_eq!(config.framework.source, "custom@1.0");
        assert_eq!(ctx.platform_value("libretuya", "board"), Some(&json!("wb2l")));
    }

    #[test]
    fn test_validate_description_keeps_config_error() {
        let tmp = TempDir::new().unwrap();
        let path = DescriptionFixture::board("")
            .write_to(tmp.path())
            .unwrap();

        let err = validate_description(&path, &mut BuildContext::new()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::InvalidType { found: "null", .. })
        ));
    }

    #[test]
    fn test_revalidation_overwrites_with_same_values() {
        let raw = json!({"board": "wb2l", "framework": {"version": "0.5.2"}});
        let mut ctx = BuildContext::new();

        validate_config(&raw, &mut ctx).unwrap();
        let first = ctx.clone();
        validate_config(&raw, &mut ctx).unwrap();

        assert_eq!(ctx, first);
        assert_eq!(ctx.core.framework_version, Some(Version::new(0, 5, 2)));
    }
}
