//! Loading of build description files.
//!
//! Build descriptions are YAML (`.yaml`, `.yml`) or TOML (`.toml`) documents
//! whose top-level `libretuya` key holds the platform block.

use std::path::Path;

use anyhow::{bail, Context, Result};
use serde_json::Value;
use tracing::{debug, info};

use crate::core::config::PLATFORM_NAME;
use crate::util::diagnostic::suggestions;

/// File format of a build description.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DescriptionFormat {
    Yaml,
    Toml,
}

impl DescriptionFormat {
    /// Pick the format from the file extension. Unknown extensions are read
    /// as YAML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => DescriptionFormat::Toml,
            _ => DescriptionFormat::Yaml,
        }
    }
}

/// Parse a build description into a generic value tree.
pub fn parse_description(content: &str, format: DescriptionFormat) -> Result<Value> {
    let doc = match format {
        DescriptionFormat::Toml => {
            toml::from_str::<Value>(content).context("failed to parse TOML build description")?
        }
        DescriptionFormat::Yaml => serde_yaml::from_str::<Value>(content)
            .context("failed to parse YAML build description")?,
    };
    Ok(doc)
}

/// Read and parse the build description at `path`.
pub fn load_description(path: &Path) -> Result<Value> {
    let format = DescriptionFormat::from_path(path);
    info!(path = %path.display(), ?format, "loading build description");

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read build description: {}", path.display()))?;

    parse_description(&content, format)
        .with_context(|| format!("in {}", path.display()))
}

/// Extract the platform block from a parsed build description.
///
/// An empty block (`libretuya:` with no value) is returned as `null` and is
/// rejected later by validation.
pub fn platform_block(doc: &Value) -> Result<&Value> {
    let Some(root) = doc.as_object() else {
        bail!("build description must be a mapping at the top level");
    };

    match root.get(PLATFORM_NAME) {
        Some(block) => {
            debug!(platform = PLATFORM_NAME, "found platform block");
            Ok(block)
        }
        None => bail!(
            "no `{}` section in build description\n{}",
            PLATFORM_NAME,
            suggestions::NO_PLATFORM_BLOCK
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::fixtures;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_parse_yaml_description() {
        let doc = parse_description(fixtures::YAML_RECOMMENDED, DescriptionFormat::Yaml).unwrap();
        let block = platform_block(&doc).unwrap();

        assert_eq!(block["board"], json!("generic-bk7231n"));
        assert_eq!(block["framework"], json!({}));
    }

    #[test]
    fn test_parse_toml_description() {
        let doc = parse_description(fixtures::TOML_CUSTOM_SOURCE, DescriptionFormat::Toml).unwrap();
        let block = platform_block(&doc).unwrap();

        assert_eq!(block["framework"]["source"], json!("custom@1.0"));
    }

    #[test]
    fn test_yaml_unquoted_number_stays_a_number() {
        let doc = parse_description("libretuya:\n  board: 7231\n", DescriptionFormat::Yaml).unwrap();
        assert!(platform_block(&doc).unwrap()["board"].is_number());
    }

    #[test]
    fn test_missing_platform_block() {
        let doc = parse_description("esphome:\n  name: test\n", DescriptionFormat::Yaml).unwrap();
        let err = platform_block(&doc).unwrap_err();
        assert!(err.to_string().contains("no `libretuya` section"));
    }

    #[test]
    fn test_load_description_from_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("device.toml");
        std::fs::write(&path, fixtures::TOML_CUSTOM_SOURCE).unwrap();

        let doc = load_description(&path).unwrap();
        assert!(platform_block(&doc).is_ok());
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(DescriptionFormat::from_path(Path::new("a.toml")), DescriptionFormat::Toml);
        assert_eq!(DescriptionFormat::from_path(Path::new("a.yml")), DescriptionFormat::Yaml);
        assert_eq!(DescriptionFormat::from_path(Path::new("a")), DescriptionFormat::Yaml);
    }
}
