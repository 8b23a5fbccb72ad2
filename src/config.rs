//! Run configuration
//!
//! Read from YAML, by default at `<config dir>/taxotag/config.yaml`:
//!
//! ```yaml
//! threshold: 95
//! selected_facts: [dei:EntityRegistrantName, dei:EntityFileNumber]
//! non_dimensional: true
//! taxonomy: /data/us-gaap-2023.json
//! output: json_lines
//! ```
//!
//! Every key is optional. Command-line flags override file values.

use crate::error::{TaggerError, TaggerResult};
use crate::fuzzy::FuzzyMatcher;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// How tag collections are written out
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// One pretty-printed JSON object keyed by tag id
    #[default]
    Json,
    /// One JSON object per line
    JsonLines,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaggerConfig {
    /// Minimum WRatio score for a match
    pub threshold: f64,
    /// Firm-specific facts whose reference values feed the fact lookup
    pub selected_facts: Vec<String>,
    /// Ignore dimensionally-qualified facts when extracting
    pub non_dimensional: bool,
    /// Concept metadata: a JSON/YAML catalog or a folder of XSD files
    pub taxonomy: Option<PathBuf>,
    pub output: OutputFormat,
}

impl Default for TaggerConfig {
    fn default() -> Self {
        Self {
            threshold: FuzzyMatcher::DEFAULT_THRESHOLD,
            selected_facts: Vec::new(),
            non_dimensional: false,
            taxonomy: None,
            output: OutputFormat::default(),
        }
    }
}

impl TaggerConfig {
    pub fn from_yaml_str(source: &str) -> TaggerResult<Self> {
        if source.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> TaggerResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|e| TaggerError::io(path, e))?;
        Self::from_yaml_str(&source)
            .map_err(|e| TaggerError::Config(format!("{}: {}", path.display(), e)))
    }

    /// `<config dir>/taxotag/config.yaml`, when the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("taxotag").join("config.yaml"))
    }

    /// Load the default config file, or defaults when there is none.
    pub fn load_default() -> TaggerResult<Self> {
        match Self::default_path() {
            Some(path) if path.exists() => {
                debug!(path = %path.display(), "loading config");
                Self::load(path)
            }
            _ => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> TaggerResult<()> {
        if !(0.0..=100.0).contains(&self.threshold) {
            return Err(TaggerError::Config(format!(
                "threshold must be between 0 and 100, got {}",
                self.threshold
            )));
        }
        Ok(())
    }
}
