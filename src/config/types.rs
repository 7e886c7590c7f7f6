//! Configuration type definitions.

use crate::constants::{DEFAULT_CONFIDENCE_THRESHOLD, DEFAULT_TOP_K};
use crate::inference::TaxonFilter;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Default settings.
    #[serde(default)]
    pub defaults: DefaultsConfig,

    /// Optional subtree filter applied to every classification.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<TaxonFilter>,
}

/// Default resolution settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    /// Taxonomy file used when `--taxonomy` is not given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub taxonomy: Option<PathBuf>,

    /// Confidence threshold for descending the tree.
    pub confidence_threshold: f64,

    /// Number of top leaf predictions to report.
    pub top_k: usize,

    /// Output format.
    pub format: OutputFormat,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            taxonomy: None,
            confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
            top_k: DEFAULT_TOP_K,
            format: OutputFormat::Json,
        }
    }
}

/// Supported output formats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// JSON document with best prediction, branch and top leaves.
    #[default]
    Json,
    /// CSV table of the branch.
    Csv,
    /// Human-readable text.
    Text,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Csv => write!(f, "csv"),
            Self::Text => write!(f, "text"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            "text" | "txt" => Ok(Self::Text),
            other => Err(format!("unknown output format: {other}")),
        }
    }
}
