//! Framework version resolution.
//!
//! The framework version in a configuration is either one of the symbolic
//! aliases in [`ARDUINO_VERSIONS`] or an explicit version number. Aliases
//! carry their own package source, so combining one with a custom `source`
//! is rejected.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use semver::Version;
use serde::{Deserialize, Serialize};

use crate::core::errors::ConfigError;
use crate::schema::ConfigPath;

/// Alias used when the configuration does not name a version.
pub const DEFAULT_VERSION: &str = "recommended";

/// A symbolic framework version.
#[derive(Debug, Clone)]
pub struct FrameworkAlias {
    pub name: &'static str,
    pub version: Version,
    /// Package source overriding the default `~x.y.z` constraint.
    pub source: Option<&'static str>,
}

// When bumping the recommended version, also update the platform pin used
// by the project templates.
pub static ARDUINO_VERSIONS: [FrameworkAlias; 3] = [
    FrameworkAlias {
        name: "dev",
        version: Version::new(0, 4, 0),
        source: Some("https://github.com/kuba2k2/libretuya.git"),
    },
    FrameworkAlias {
        name: "latest",
        version: Version::new(0, 4, 0),
        source: None,
    },
    FrameworkAlias {
        name: "recommended",
        version: Version::new(0, 4, 0),
        source: None,
    },
];

/// Look up a symbolic version by name.
pub fn find_alias(name: &str) -> Option<&'static FrameworkAlias> {
    ARDUINO_VERSIONS.iter().find(|a| a.name == name)
}

/// `major.minor.patch`, optionally followed by a discarded suffix like
/// `-dev` or `rc1`.
static VERSION_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+)\.(\d+)\.(\d+)-?\w*$").expect("version regex is valid")
});

/// Parse a version number, dropping any suffix after the patch component.
pub fn parse_version_number(s: &str) -> Option<Version> {
    let caps = VERSION_NUMBER.captures(s)?;
    let major = caps[1].parse().ok()?;
    let minor = caps[2].parse().ok()?;
    let patch = caps[3].parse().ok()?;
    Some(Version::new(major, minor, patch))
}

/// Parse a version number or fail with a config error at `path`.
pub fn version_number(value: &str, path: &ConfigPath) -> Result<Version, ConfigError> {
    parse_version_number(value).ok_or_else(|| ConfigError::InvalidVersion {
        path: path.clone(),
        value: value.to_string(),
    })
}

/// The `~major.minor.patch` constraint used when no source is configured.
pub fn default_source(version: &Version) -> String {
    format!("~{}.{}.{}", version.major, version.minor, version.patch)
}

/// A framework version after alias resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedFramework {
    pub version: Version,
    /// Package location or constraint; never empty.
    pub source: String,
}

impl fmt::Display for ResolvedFramework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.version, self.source)
    }
}

/// Resolve a raw `{version, source?}` pair.
///
/// `path` points at the framework block and is used for error reporting.
pub fn resolve_framework_version(
    version: &str,
    source: Option<&str>,
    path: &ConfigPath,
) -> Result<ResolvedFramework, ConfigError> {
    let (version, source) = match find_alias(version) {
        Some(alias) => {
            if let Some(custom) = source {
                return Err(ConfigError::AliasWithSource {
                    path: path.clone(),
                    alias: alias.name.to_string(),
                    source_value: custom.to_string(),
                });
            }
            (alias.version.clone(), alias.source.map(str::to_string))
        }
        None => {
            let parsed = version_number(version, &path.join("version"))?;
            (parsed, source.map(str::to_string))
        }
    };

    let source = source
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| default_source(&version));

    Ok(ResolvedFramework { version, source })
}

/// Operators accepted in front of each constraint item. Longer operators
/// come first so `>=` is not read as `>`.
const CONSTRAINT_OPERATORS: [&str; 7] = ["^", "~", ">=", ">", "<=", "<", "!="];

/// Check that `value` is a package version constraint such as `0.4.0`,
/// `~0.4.0` or `>=0.4.0,<0.5.0`.
pub fn validate_version_constraint(value: &str, path: &ConfigPath) -> Result<(), ConfigError> {
    for raw in value.split(',') {
        let item = raw.trim();
        let rest = CONSTRAINT_OPERATORS
            .iter()
            .find_map(|op| item.strip_prefix(op))
            .unwrap_or(item)
            .trim_start();

        if parse_version_number(rest).is_none() {
            return Err(ConfigError::InvalidConstraint {
                path: path.clone(),
                value: value.to_string(),
                item: item.to_string(),
            });
        }
    }
    Ok(())
}
