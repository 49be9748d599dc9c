//! Configuration file handling.
//!
//! All keys are optional; a missing file means defaults.
//!
//! ```toml
//! pipeline = "en_literary"
//! pipes = ["coref", "characters"]
//!
//! [coref]
//! max_sentence_distance = 3
//! link_first_person = true
//!
//! [output]
//! format = "json"
//! ```
//!
//! Lookup order: explicit path, `$LITCOREF_CONFIG`, then
//! `<config_dir>/litcoref/config.toml`.

use crate::components::coref::CorefConfig;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable naming a config file.
pub const CONFIG_ENV: &str = "LITCOREF_CONFIG";

/// How results are rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable chain listing
    #[default]
    Text,
    /// JSON document
    Json,
}

/// Output settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Output format
    pub format: OutputFormat,
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Pipeline preset to load
    pub pipeline: String,
    /// Extra pipes appended after the preset's own
    pub pipes: Vec<String>,
    /// Coreference settings
    pub coref: CorefConfig,
    /// Output settings
    pub output: OutputConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pipeline: crate::DEFAULT_PIPELINE.to_string(),
            pipes: vec!["coref".to_string()],
            coref: CorefConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl Config {
    /// Parse configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| Error::config(e.to_string()))
    }

    /// Read configuration from a file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| Error::config(format!("failed to read {}: {}", path.display(), e)))?;
        toml::from_str(&text)
            .map_err(|e| Error::config(format!("{}: {}", path.display(), e)))
    }

    /// Default config file location, if the platform has a config directory.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("litcoref").join("config.toml"))
    }

    /// Resolve and load configuration.
    ///
    /// An explicit path or `$LITCOREF_CONFIG` must exist. The default
    /// location is only read when present.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            log::info!("loading config from {}", path.display());
            return Self::from_file(path);
        }
        if let Some(path) = std::env::var_os(CONFIG_ENV).filter(|v| !v.is_empty()) {
            let path = PathBuf::from(path);
            log::info!("loading config from ${} = {}", CONFIG_ENV, path.display());
            return Self::from_file(&path);
        }
        match Self::default_path() {
            Some(path) if path.is_file() => {
                log::info!("loading config from {}", path.display());
                Self::from_file(&path)
            }
            _ => {
                log::debug!("no config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Serialize to TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::config(e.to_string()))
    }
}
