//! Configuration file support for the `libretuya` tool.
//!
//! Two locations are read:
//! - Global: `~/.libretuya/config.toml` - User-wide defaults
//! - Project: `.libretuya/config.toml` - Project-specific overrides
//!
//! Project config takes precedence over global config. Command-line flags
//! take precedence over both.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Tool configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Output settings for `libretuya generate`
    pub generate: GenerateConfig,
}

/// Where and how generated files are written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerateConfig {
    /// Name of the `[env:<name>]` section in platformio.ini
    pub env_name: String,

    /// Path of platformio.ini, relative to the output directory
    pub ini_path: PathBuf,

    /// Path of the defines header, relative to the output directory
    pub defines_path: PathBuf,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        GenerateConfig {
            env_name: "libretuya".to_string(),
            ini_path: PathBuf::from("platformio.ini"),
            defines_path: PathBuf::from("src/esphome/core/defines.h"),
        }
    }
}

/// Partial configuration as written in a file. Unset keys do not override.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    generate: GenerateFile,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct GenerateFile {
    env_name: Option<String>,
    ini_path: Option<PathBuf>,
    defines_path: Option<PathBuf>,
}

impl Config {
    /// Apply the keys set in the file at `path` on top of this config.
    pub fn merge_file(&mut self, path: &Path) -> Result<()> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;

        let file: ConfigFile = toml::from_str(&contents)
            .with_context(|| format!("failed to parse config: {}", path.display()))?;

        if let Some(env_name) = file.generate.env_name {
            self.generate.env_name = env_name;
        }
        if let Some(ini_path) = file.generate.ini_path {
            self.generate.ini_path = ini_path;
        }
        if let Some(defines_path) = file.generate.defines_path {
            self.generate.defines_path = defines_path;
        }
        Ok(())
    }

    /// Like [`merge_file`](Self::merge_file), but a missing file is skipped
    /// and a broken one is reported and skipped.
    fn merge_file_or_warn(&mut self, path: &Path) {
        if !path.exists() {
            return;
        }
        if let Err(e) = self.merge_file(path) {
            tracing::warn!("Failed to load config from {}: {:#}", path.display(), e);
        }
    }
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (.libretuya/config.toml)
/// 2. Global config (~/.libretuya/config.toml)
/// 3. Defaults
pub fn load_config(global_path: Option<&Path>, project_path: &Path) -> Config {
    let mut config = Config::default();

    if let Some(global) = global_path {
        config.merge_file_or_warn(global);
    }
    config.merge_file_or_warn(project_path);

    config
}

/// Get the global config path (~/.libretuya/config.toml).
pub fn global_config_path() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(".libretuya").join("config.toml"))
}

/// Get the project config path (.libretuya/config.toml).
pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(".libretuya").join("config.toml")
}
