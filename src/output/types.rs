//! Output type definitions.

use crate::inference::Classification;
use std::path::PathBuf;

/// Classification result for one score vector file.
#[derive(Debug, Clone)]
pub struct ClassifiedInput {
    /// Path to the score vector file.
    pub source: PathBuf,
    /// Threshold used for resolution.
    pub threshold: f64,
    /// The classification itself.
    pub classification: Classification,
}
