//! Classification of raw score vectors against a taxonomy.

mod classifier;
pub mod filter;

pub use classifier::TaxonClassifier;
pub use filter::{FilterMode, LeafMask, TaxonFilter};

use crate::taxonomy::PredictionRecord;
use serde::{Deserialize, Serialize};

/// Per-instance settings for a [`TaxonClassifier`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassifierSettings {
    /// Minimum aggregated score needed to descend to a more specific taxon.
    pub threshold: f64,
    /// Number of top leaf predictions to report.
    pub top_k: usize,
    /// Optional subtree filter applied before aggregation.
    pub filter: Option<TaxonFilter>,
}

/// Result of one classification call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    /// Single best guess.
    pub best: PredictionRecord,
    /// Root-to-best path.
    pub branch: Vec<PredictionRecord>,
    /// Highest-scoring leaves, best first.
    pub top_leaves: Vec<PredictionRecord>,
}
