//! Shared build context.
//!
//! The build context collects platform and framework identification for
//! later build stages. It is created by the caller at the start of a
//! configuration pass and passed explicitly to each platform integration.

use std::collections::BTreeMap;

use semver::Version;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Target identification shared by every component of a build.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoreData {
    /// Platform the firmware is built for (e.g. `libretuya`)
    pub target_platform: Option<String>,

    /// Application framework (e.g. `arduino`)
    pub target_framework: Option<String>,

    /// Resolved framework version
    pub framework_version: Option<Version>,
}

/// Build-wide state written during the configuration pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BuildContext {
    /// Target identification
    pub core: CoreData,

    /// Per-platform values, keyed by platform name and then by value name
    #[serde(default)]
    pub platforms: BTreeMap<String, BTreeMap<String, Value>>,
}

impl BuildContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the namespace of `platform` with an empty one and return it.
    pub fn reset_platform(&mut self, platform: &str) -> &mut BTreeMap<String, Value> {
        let ns = self.platforms.entry(platform.to_string()).or_default();
        ns.clear();
        ns
    }

    /// Get the namespace of `platform`, if it was written.
    pub fn platform(&self, platform: &str) -> Option<&BTreeMap<String, Value>> {
        self.platforms.get(platform)
    }

    /// Get a single value from a platform namespace.
    pub fn platform_value(&self, platform: &str, key: &str) -> Option<&Value> {
        self.platform(platform).and_then(|ns| ns.get(key))
    }
}
