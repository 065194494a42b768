//! CLI configuration (config.toml)
//!
//! ```toml
//! [data]
//! locations = "data/locations.json"
//! assets = "data/assets.json"
//!
//! [display]
//! show_ids = true
//! ascii = false
//! ```
//!
//! Relative data paths resolve against the config file's directory.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CliConfig {
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

/// Default record files
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataConfig {
    pub locations: Option<PathBuf>,
    pub assets: Option<PathBuf>,
}

/// Text rendering options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default)]
    pub show_ids: bool,
    #[serde(default)]
    pub ascii: bool,
}

impl CliConfig {
    /// Get the default config file path
    fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("AssetTree").join("config.toml"))
    }

    /// Load the explicit config file, or the default one if it exists.
    ///
    /// A missing default file yields the default config; a missing explicit
    /// file is an error.
    pub fn load(explicit: Option<&Path>) -> anyhow::Result<Self> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => match Self::default_path() {
                Some(path) if path.is_file() => path,
                _ => return Ok(Self::default()),
            },
        };

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let mut config = Self::from_toml(&content)
            .with_context(|| format!("Invalid config {}", path.display()))?;

        if let Some(base) = path.parent() {
            config.data.resolve_relative_to(base);
        }

        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}

impl DataConfig {
    fn resolve_relative_to(&mut self, base: &Path) {
        for path in [&mut self.locations, &mut self.assets].into_iter().flatten() {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
    }
}
