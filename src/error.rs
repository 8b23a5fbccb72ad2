//! Error type shared by every tagging stage

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading inputs or tagging a document
#[derive(Debug, Error)]
pub enum TaggerError {
    #[error("IO error reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Markup error: {0}")]
    Markup(String),

    #[error("Failed to load reference document: {0}")]
    ReferenceDocument(String),

    #[error("Failed to load target document: {0}")]
    TargetDocument(String),

    #[error("Taxonomy error: {0}")]
    Taxonomy(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Tagging cancelled")]
    Cancelled,
}

impl TaggerError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for tagging operations
pub type TaggerResult<T> = Result<T, TaggerError>;
