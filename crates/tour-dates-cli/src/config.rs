//! Optional TOML configuration supplying defaults for command-line flags.
//!
//! ```toml
//! [defaults]
//! dataset = "tour.json"
//! country = "ALL"
//! order = "asc"
//! show_history = true
//! timezone = "Europe/Paris"
//! ```
//!
//! Flags always win over file values.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default)]
    pub defaults: Defaults,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Defaults {
    pub dataset: Option<PathBuf>,
    pub country: Option<String>,
    pub order: Option<String>,
    pub show_history: Option<bool>,
    pub timezone: Option<String>,
}

impl FileConfig {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        toml::from_str(s).context("invalid configuration")
    }

    /// Read a config file. A relative `dataset` path is resolved against the
    /// directory containing the config file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("cannot read config '{}'", path.display()))?;
        let mut config = Self::from_toml_str(&text)
            .with_context(|| format!("in config '{}'", path.display()))?;

        let dir = path.parent().unwrap_or(Path::new(""));
        config.defaults.dataset = config
            .defaults
            .dataset
            .take()
            .map(|dataset| {
                if dataset.is_relative() {
                    dir.join(dataset)
                } else {
                    dataset
                }
            });
        Ok(config)
    }

    /// Load `path` if given, otherwise use empty defaults.
    pub fn load_optional(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }
}
