//! Configuration error types and diagnostics.

use miette::Diagnostic as MietteDiagnostic;
use thiserror::Error;

use crate::schema::ConfigPath;
use crate::util::diagnostic::Diagnostic;

/// Error raised while validating or emitting the platform configuration.
///
/// Every variant is fatal for the configuration pass: nothing derived from a
/// rejected configuration is written to the build context or the sink.
#[derive(Debug, Error, MietteDiagnostic)]
pub enum ConfigError {
    #[error("required key `{key}` not provided")]
    #[diagnostic(code(libretuya::config::missing_key))]
    MissingKey { path: ConfigPath, key: String },

    #[error("expected {expected}, got {found}")]
    #[diagnostic(
        code(libretuya::config::invalid_type),
        help("did you forget to put quotes around the value?")
    )]
    InvalidType {
        path: ConfigPath,
        expected: &'static str,
        found: &'static str,
    },

    #[error("[{key}] is an invalid option")]
    #[diagnostic(code(libretuya::config::unknown_key))]
    UnknownKey {
        path: ConfigPath,
        key: String,
        allowed: Vec<String>,
    },

    #[error("framework version needs to be explicitly specified when custom source is used")]
    #[diagnostic(
        code(libretuya::config::alias_with_source),
        help("replace the version alias with a concrete version like `0.4.0`")
    )]
    AliasWithSource {
        path: ConfigPath,
        alias: String,
        source_value: String,
    },

    #[error("not a version number: `{value}`")]
    #[diagnostic(
        code(libretuya::config::invalid_version),
        help("use the form `major.minor.patch`, e.g. `0.4.0`")
    )]
    InvalidVersion { path: ConfigPath, value: String },

    #[error("not a valid version constraint: `{value}`")]
    #[diagnostic(code(libretuya::config::invalid_constraint))]
    InvalidConstraint {
        path: ConfigPath,
        value: String,
        item: String,
    },
}

impl ConfigError {
    /// Location of the offending value in the configuration tree.
    pub fn path(&self) -> &ConfigPath {
        match self {
            ConfigError::MissingKey { path, .. }
            | ConfigError::InvalidType { path, .. }
            | ConfigError::UnknownKey { path, .. }
            | ConfigError::AliasWithSource { path, .. }
            | ConfigError::InvalidVersion { path, .. }
            | ConfigError::InvalidConstraint { path, .. } => path,
        }
    }

    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        let mut diag = Diagnostic::error(self.to_string());

        if !self.path().is_root() {
            diag = diag.with_context(format!("in `{}`", self.path()));
        }

        match self {
            ConfigError::MissingKey { key, .. } => diag.with_suggestion(format!(
                "Add `{}` to the configuration block",
                key
            )),

            ConfigError::InvalidType { expected, .. } => diag
                .with_suggestion(format!("Provide {} here", expected))
                .with_suggestion("Quote the value if it looks like a number".to_string()),

            ConfigError::UnknownKey { allowed, .. } => {
                if !allowed.is_empty() {
                    diag = diag.with_context(format!("valid options: {}", allowed.join(", ")));
                }
                diag.with_suggestion("Check the option name for typos".to_string())
            }

            ConfigError::AliasWithSource {
                alias,
                source_value,
                ..
            } => diag
                .with_context(format!(
                    "`{}` is an alias that already selects its own source",
                    alias
                ))
                .with_context(format!("custom source: {}", source_value))
                .with_suggestion("Set `version` to a concrete version number".to_string())
                .with_suggestion("Remove `source` to use the alias".to_string()),

            ConfigError::InvalidVersion { .. } => diag.with_suggestion(
                "Use a version like `0.4.0` or one of: dev, latest, recommended".to_string(),
            ),

            ConfigError::InvalidConstraint { item, .. } => diag
                .with_context(format!("could not parse `{}`", item))
                .with_suggestion(
                    "Use a constraint like `0.4.0`, `~0.4.0` or `>=0.4.0,<0.5.0`".to_string(),
                ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alias_with_source_diagnostic() {
        let err = ConfigError::AliasWithSource {
            path: ConfigPath::root().join("libretuya").join("framework"),
            alias: "dev".to_string(),
            source_value: "custom@1.0".to_string(),
        };

        let output = err.to_diagnostic().format(false);

        assert!(output.contains("error: framework version needs to be explicitly specified"));
        assert!(output.contains("in `libretuya -> framework`"));
        assert!(output.contains("`dev` is an alias"));
        assert!(output.contains("1. Set `version`"));
    }

    #[test]
    fn test_unknown_key_lists_allowed_options() {
        let err = ConfigError::UnknownKey {
            path: ConfigPath::root().join("libretuya"),
            key: "bord".to_string(),
            allowed: vec!["board".to_string(), "framework".to_string()],
        };

        let output = err.to_diagnostic().format(false);

        assert!(output.contains("[bord] is an invalid option"));
        assert!(output.contains("valid options: board, framework"));
    }

    #[test]
    fn test_root_path_is_not_printed() {
        let err = ConfigError::InvalidVersion {
            path: ConfigPath::root(),
            value: "x".to_string(),
        };

        assert!(!err.to_diagnostic().format(false).contains("in `"));
    }
}
