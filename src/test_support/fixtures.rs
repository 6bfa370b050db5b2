//! Test fixtures for common test scenarios.
//!
//! Sample build descriptions in both supported formats.

use std::path::{Path, PathBuf};

/// Minimal YAML description using the default `recommended` framework.
pub const YAML_RECOMMENDED: &str = r#"esphome:
  name: kitchen-plug

libretuya:
  board: generic-bk7231n
  framework: {}
"#;

/// TOML description with an explicit version and custom source.
pub const TOML_CUSTOM_SOURCE: &str = r#"[esphome]
name = "kitchen-plug"

[libretuya]
board = "wb2l"

[libretuya.framework]
version = "0.5.2"
source = "custom@1.0"
"#;

/// YAML description mixing an alias with a custom source.
pub const YAML_ALIAS_WITH_SOURCE: &str = r#"libretuya:
  board: wb2l
  framework:
    version: dev
    source: https://example.com/libretuya.git
"#;

/// Fixture for a build description on disk.
#[derive(Debug, Clone)]
pub struct DescriptionFixture {
    /// File name, including the extension that selects the format.
    pub file_name: String,
    /// File content.
    pub content: String,
}

impl DescriptionFixture {
    pub fn new(file_name: impl Into<String>, content: impl Into<String>) -> Self {
        DescriptionFixture {
            file_name: file_name.into(),
            content: content.into(),
        }
    }

    /// A YAML description with only a board.
    pub fn board(board: &str) -> Self {
        Self::new(
            "device.yaml",
            format!("libretuya:\n  board: {}\n", board),
        )
    }

    /// Write the fixture into `base_path` and return the file path.
    pub fn write_to(&self, base_path: &Path) -> std::io::Result<PathBuf> {
        std::fs::create_dir_all(base_path)?;
        let path = base_path.join(&self.file_name);
        std::fs::write(&path, &self.content)?;
        Ok(path)
    }
}
