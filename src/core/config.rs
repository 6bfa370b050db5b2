//! LibreTuya configuration schema and typed records.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::core::errors::ConfigError;
use crate::core::version::{
    resolve_framework_version, version_number, ResolvedFramework, DEFAULT_VERSION,
};
use crate::schema::{empty_mapping, string_strict, type_name, ConfigPath, Field, Schema};

/// Name of the platform and of its configuration block.
pub const PLATFORM_NAME: &str = "libretuya";

/// Application framework the platform always builds with.
pub const FRAMEWORK_NAME: &str = "arduino";

pub const CONF_BOARD: &str = "board";
pub const CONF_FRAMEWORK: &str = "framework";
pub const CONF_VERSION: &str = "version";
pub const CONF_SOURCE: &str = "source";

/// Key of the board identifier inside the platform's context namespace.
pub const KEY_BOARD: &str = "board";

/// A validated platform configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformConfig {
    /// Hardware board identifier (e.g. `generic-bk7231n`)
    pub board: String,

    /// Resolved framework version and package source
    pub framework: ResolvedFramework,
}

fn default_version() -> Value {
    Value::String(DEFAULT_VERSION.to_string())
}

/// Schema of the `framework` block.
pub fn framework_schema() -> Schema {
    Schema::new(vec![
        Field::optional(CONF_VERSION, string_strict).with_default(default_version),
        Field::optional(CONF_SOURCE, string_strict),
    ])
    .then(check_framework_version)
}

/// Schema of the whole platform block.
pub fn config_schema() -> Schema {
    Schema::new(vec![
        Field::required(CONF_BOARD, string_strict),
        Field::optional(CONF_FRAMEWORK, validate_framework).with_default(empty_mapping),
    ])
}

fn validate_framework(value: &Value, path: &ConfigPath) -> Result<Value, ConfigError> {
    framework_schema().validate(value, path).map(Value::Object)
}

/// Replace `version` and `source` with their resolved forms.
fn check_framework_version(
    mut value: Map<String, Value>,
    path: &ConfigPath,
) -> Result<Map<String, Value>, ConfigError> {
    let version = value
        .get(CONF_VERSION)
        .and_then(Value::as_str)
        .unwrap_or(DEFAULT_VERSION);
    let source = value.get(CONF_SOURCE).and_then(Value::as_str);

    let resolved = resolve_framework_version(version, source, path)?;

    value.insert(
        CONF_VERSION.to_string(),
        Value::String(resolved.version.to_string()),
    );
    value.insert(CONF_SOURCE.to_string(), Value::String(resolved.source));
    Ok(value)
}

impl PlatformConfig {
    /// Build the typed record from a mapping validated by [`config_schema`].
    pub fn from_validated(map: &Map<String, Value>, path: &ConfigPath) -> Result<Self, ConfigError> {
        let board = require_str(map, CONF_BOARD, path)?;

        let framework_path = path.join(CONF_FRAMEWORK);
        let framework = map
            .get(CONF_FRAMEWORK)
            .and_then(Value::as_object)
            .ok_or_else(|| ConfigError::MissingKey {
                path: path.clone(),
                key: CONF_FRAMEWORK.to_string(),
            })?;
        let version = require_str(framework, CONF_VERSION, &framework_path)?;
        let source = require_str(framework, CONF_SOURCE, &framework_path)?;

        let version = version_number(&version, &framework_path.join(CONF_VERSION))?;

        Ok(PlatformConfig {
            board,
            framework: ResolvedFramework { version, source },
        })
    }
}

fn require_str(map: &Map<String, Value>, key: &str, path: &ConfigPath) -> Result<String, ConfigError> {
    match map.get(key) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(other) => Err(ConfigError::InvalidType {
            path: path.join(key),
            expected: "a string",
            found: type_name(other),
        }),
        None => Err(ConfigError::MissingKey {
            path: path.clone(),
            key: key.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn root() -> ConfigPath {
        ConfigPath::root().join(PLATFORM_NAME)
    }

    #[test]
    fn test_framework_defaults_to_recommended() {
        let map = config_schema()
            .validate(&json!({"board": "generic-bk7231n"}), &root())
            .unwrap();

        assert_eq!(map["framework"], json!({"version": "0.4.0", "source": "~0.4.0"}));
    }

    #[test]
    fn test_framework_explicit_version_and_source() {
        let map = config_schema()
            .validate(
                &json!({
                    "board": "wb2l",
                    "framework": {"version": "0.5.2", "source": "custom@1.0"}
                }),
                &root(),
            )
            .unwrap();

        let config = PlatformConfig::from_validated(&map, &root()).unwrap();
        assert_eq!(config.board, "wb2l");
        assert_eq!(config.framework.version.to_string(), "0.5.2");
        assert_eq!(config.framework.source, "custom@1.0");
    }

    #[test]
    fn test_board_required() {
        let err = config_schema()
            .validate(&json!({"framework": {}}), &root())
            .unwrap_err();

        assert!(matches!(err, ConfigError::MissingKey { ref key, .. } if key == "board"));
    }

    #[test]
    fn test_board_must_be_string() {
        let err = config_schema()
            .validate(&json!({"board": 7231}), &root())
            .unwrap_err();

        assert_eq!(err.path().to_string(), "libretuya -> board");
        assert!(matches!(err, ConfigError::InvalidType { .. }));
    }

    #[test]
    fn test_unknown_framework_key() {
        let err = config_schema()
            .validate(
                &json!({"board": "wb2l", "framework": {"branch": "main"}}),
                &root(),
            )
            .unwrap_err();

        assert_eq!(err.path().to_string(), "libretuya -> framework");
        assert!(matches!(err, ConfigError::UnknownKey { .. }));
    }

    #[test]
    fn test_dev_alias_keeps_its_source() {
        let map = config_schema()
            .validate(&json!({"board": "wb2l", "framework": {"version": "dev"}}), &root())
            .unwrap();

        let config = PlatformConfig::from_validated(&map, &root()).unwrap();
        assert_eq!(config.framework.source, "https://github.com/kuba2k2/libretuya.git");
    }
}
