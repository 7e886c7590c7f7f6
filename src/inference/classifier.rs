//! Taxonomy-aware wrapper around raw classifier outputs.

use crate::constants::{MAX_PREDICTIONS, confidence};
use crate::error::{Error, Result};
use crate::inference::filter::LeafMask;
use crate::inference::{Classification, ClassifierSettings};
use crate::taxonomy::TaxonomyIndex;
use tracing::{debug, info, warn};

/// Turns classifier score vectors into taxonomic predictions.
///
/// Owns the taxonomy and the settings chosen at construction. `classify`
/// takes `&self` and keeps no state between calls, so one instance can be
/// shared across threads.
#[derive(Debug)]
pub struct TaxonClassifier {
    index: TaxonomyIndex,
    settings: ClassifierSettings,
    mask: Option<LeafMask>,
}

impl TaxonClassifier {
    /// Bind a built taxonomy to classification settings.
    pub fn new(index: TaxonomyIndex, settings: ClassifierSettings) -> Result<Self> {
        if !(confidence::MIN..=confidence::MAX).contains(&settings.threshold) {
            return Err(Error::InvalidThreshold {
                value: settings.threshold,
            });
        }
        if settings.top_k > MAX_PREDICTIONS {
            warn!(
                "top_k {} exceeds maximum, capping at {}",
                settings.top_k, MAX_PREDICTIONS
            );
        }

        let mask = settings
            .filter
            .map(|filter| LeafMask::new(&index, filter))
            .transpose()?;

        info!(
            "Loaded taxonomy: {} taxa, {} leaves, root '{}', threshold {:.3}",
            index.len(),
            index.leaf_count(),
            index.root_node().name(),
            settings.threshold
        );

        Ok(Self {
            index,
            settings,
            mask,
        })
    }

    /// The underlying taxonomy.
    pub fn taxonomy(&self) -> &TaxonomyIndex {
        &self.index
    }

    /// Settings this classifier was built with.
    pub fn settings(&self) -> &ClassifierSettings {
        &self.settings
    }

    /// Expected length of each score vector.
    pub fn input_len(&self) -> usize {
        self.index.leaf_count()
    }

    /// Resolve one score vector using the configured threshold.
    pub fn classify(&self, scores: &[f32]) -> Result<Classification> {
        self.classify_with_threshold(scores, self.settings.threshold)
    }

    /// Resolve one score vector with an explicit threshold.
    pub fn classify_with_threshold(&self, scores: &[f32], threshold: f64) -> Result<Classification> {
        let scores = match &self.mask {
            Some(mask) => mask.apply(scores),
            None => scores.into(),
        };
        let table = self.index.aggregate(&scores)?;

        let branch = self.index.branch(&table, threshold)?;
        let best = self.index.resolve(&table, threshold)?;
        let top_leaves = match &self.mask {
            Some(mask) => {
                self.index
                    .top_leaves_where(&table, self.settings.top_k, |leaf| mask.keeps(leaf))
            }
            None => self.index.top_leaves(&table, self.settings.top_k),
        };

        debug!(
            "Resolved to '{}' (score {:.4}, depth {}) at threshold {:.3}",
            best.node.name(),
            best.score,
            branch.len() - 1,
            threshold
        );

        Ok(Classification {
            best: best.to_record(),
            branch: branch.iter().map(|p| p.to_record()).collect(),
            top_leaves: top_leaves.iter().map(|p| p.to_record()).collect(),
        })
    }
}
