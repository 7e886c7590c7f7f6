//! Per-call aggregation of leaf scores up the tree.

use crate::error::{Error, Result};
use crate::taxonomy::{NodeId, TaxonomyIndex};

/// Aggregated score of every node for one classification call.
///
/// Allocated fresh per call and keyed by [`NodeId`]; the shared tree is
/// never written to.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreTable {
    scores: Vec<f64>,
}

impl ScoreTable {
    /// Aggregated score of a node; 0.0 for ids outside this table.
    pub fn get(&self, id: NodeId) -> f64 {
        self.scores.get(id.0).copied().unwrap_or(0.0)
    }

    /// Number of nodes covered.
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    /// Whether the table covers no nodes.
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

impl TaxonomyIndex {
    /// Sum leaf scores into every ancestor.
    ///
    /// `scores[i]` is the classifier output for the leaf bound to index `i`;
    /// the slice must have exactly [`leaf_count`](Self::leaf_count) entries,
    /// each finite and non-negative.
    pub fn aggregate(&self, scores: &[f32]) -> Result<ScoreTable> {
        if scores.len() != self.leaf_count() {
            return Err(Error::DimensionMismatch {
                expected: self.leaf_count(),
                actual: scores.len(),
            });
        }
        if let Some((index, &value)) = scores
            .iter()
            .enumerate()
            .find(|(_, v)| !v.is_finite() || **v < 0.0)
        {
            return Err(Error::InvalidScore { index, value });
        }

        let mut table = vec![0.0_f64; self.len()];
        for (leaf, &score) in self.leaves().iter().zip(scores) {
            table[leaf.0] = f64::from(score);
        }
        for &id in self.post_order() {
            let node = self.node(id);
            if !node.is_leaf() {
                let sum: f64 = node.children().iter().map(|c| table[c.0]).sum();
                table[id.0] = sum;
            }
        }

        Ok(ScoreTable { scores: table })
    }
}
