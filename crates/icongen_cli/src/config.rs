//! icongen configuration file handling
//!
//! An optional `icongen.toml` provides defaults for every command-line flag:
//!
//! ```toml
//! [convert]
//! src = "icons/src"
//! out = "docs/icons"
//! extensions = ["kt"]
//! exclude = ["Icons.kt"]
//!
//! [theme]
//! light = "#000000"
//! dark = "#FFFFFF"
//! preserve_colors = false
//! ```

use anyhow::{Context, Result};
use icongen::convert::{DEFAULT_EXCLUDE, DEFAULT_EXTENSIONS};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// File name looked up in the working directory when `--config` is not given
pub const CONFIG_FILE: &str = "icongen.toml";

/// Contents of icongen.toml
#[derive(Debug, Default, Deserialize)]
pub struct IconGenConfig {
    #[serde(default)]
    pub convert: ConvertConfig,
    #[serde(default)]
    pub theme: ThemeConfig,
}

/// Input selection and output location
#[derive(Debug, Deserialize)]
pub struct ConvertConfig {
    /// Root directory to scan
    #[serde(default)]
    pub src: Option<PathBuf>,
    /// Root directory to write SVGs into
    #[serde(default)]
    pub out: Option<PathBuf>,
    /// Source file extensions, without the dot
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
    /// File names to skip
    #[serde(default = "default_exclude")]
    pub exclude: Vec<String>,
}

fn default_extensions() -> Vec<String> {
    DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect()
}

fn default_exclude() -> Vec<String> {
    DEFAULT_EXCLUDE.iter().map(|s| s.to_string()).collect()
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            src: None,
            out: None,
            extensions: default_extensions(),
            exclude: default_exclude(),
        }
    }
}

/// Color scheme of the emitted documents
#[derive(Debug, Deserialize)]
pub struct ThemeConfig {
    #[serde(default = "default_light")]
    pub light: String,
    #[serde(default = "default_dark")]
    pub dark: String,
    #[serde(default)]
    pub preserve_colors: bool,
}

fn default_light() -> String {
    "#000000".to_string()
}

fn default_dark() -> String {
    "#FFFFFF".to_string()
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            light: default_light(),
            dark: default_dark(),
            preserve_colors: false,
        }
    }
}

impl IconGenConfig {
    /// Load configuration from an explicit file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        toml::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Load icongen.toml from a directory, if there is one
    pub fn load_from_dir(path: &Path) -> Result<Option<Self>> {
        let config_path = path.join(CONFIG_FILE);
        if !config_path.exists() {
            return Ok(None);
        }
        Self::load_from_file(&config_path).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: IconGenConfig = toml::from_str("").unwrap();
        assert!(config.convert.src.is_none());
        assert_eq!(config.convert.extensions, ["kt"]);
        assert_eq!(config.convert.exclude, ["Icons.kt"]);
        assert_eq!(config.theme.light, "#000000");
        assert_eq!(config.theme.dark, "#FFFFFF");
        assert!(!config.theme.preserve_colors);
    }

    #[test]
    fn test_partial_config() {
        let config: IconGenConfig = toml::from_str(
            r##"
            [convert]
            src = "icons"
            exclude = []

            [theme]
            dark = "#EEEEEE"
            preserve_colors = true
            "##,
        )
        .unwrap();
        assert_eq!(config.convert.src, Some(PathBuf::from("icons")));
        assert!(config.convert.out.is_none());
        assert!(config.convert.exclude.is_empty());
        assert_eq!(config.theme.light, "#000000");
        assert_eq!(config.theme.dark, "#EEEEEE");
        assert!(config.theme.preserve_colors);
    }

    #[test]
    fn test_load_from_dir() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        assert!(IconGenConfig::load_from_dir(temp_dir.path()).unwrap().is_none());

        fs::write(
            temp_dir.path().join(CONFIG_FILE),
            "[convert]\nout = \"svg\"\n",
        )
        .unwrap();
        let config = IconGenConfig::load_from_dir(temp_dir.path())
            .unwrap()
            .unwrap();
        assert_eq!(config.convert.out, Some(PathBuf::from("svg")));
    }

    #[test]
    fn test_invalid_config_reports_path() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let path = temp_dir.path().join(CONFIG_FILE);
        fs::write(&path, "[theme]\npreserve_colors = \"maybe\"\n").unwrap();
        let err = IconGenConfig::load_from_file(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse"));
    }
}
