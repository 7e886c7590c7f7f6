//! Threshold resolution, branch building and leaf ranking.

use crate::constants::{MAX_PREDICTIONS, confidence};
use crate::error::{Error, Result};
use crate::taxonomy::{NodeId, ScoreTable, TaxonNode, TaxonomyIndex};
use serde::{Deserialize, Serialize};

/// A node paired with its aggregated score for one call.
///
/// Borrows the node from the index; predictions never outlive the tree and
/// are discarded after each call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction<'a> {
    /// The predicted taxon.
    pub node: &'a TaxonNode,
    /// Aggregated score in `[0, 1]` for well-formed inputs.
    pub score: f64,
    /// 1-based position in the result list.
    pub position: usize,
}

impl Prediction<'_> {
    /// Owned, serializable copy of this prediction.
    pub fn to_record(&self) -> PredictionRecord {
        PredictionRecord {
            taxon_id: self.node.taxon_id(),
            name: self.node.name().to_string(),
            rank: self.node.rank(),
            score: self.score,
            position: self.position,
        }
    }
}

/// Output shape of a prediction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRecord {
    /// Taxon id.
    pub taxon_id: u64,
    /// Display name.
    pub name: String,
    /// Rank level of the taxon.
    pub rank: f32,
    /// Aggregated score.
    pub score: f64,
    /// 1-based position in the result list.
    pub position: usize,
}

impl TaxonomyIndex {
    /// Single best guess for `threshold`.
    ///
    /// Starting at the root, repeatedly steps into the highest-scoring child
    /// (first declared wins ties) while that child's score is at least
    /// `threshold`. Never fails for a valid table and threshold: when no
    /// child qualifies the root itself is returned.
    pub fn resolve(&self, table: &ScoreTable, threshold: f64) -> Result<Prediction<'_>> {
        let path = self.descend(table, threshold)?;
        let id = path.last().copied().unwrap_or(self.root());
        Ok(Prediction {
            node: self.node(id),
            score: table.get(id),
            position: 1,
        })
    }

    /// Root-to-resolved path, each entry with its own score.
    ///
    /// The root is position 1 and the node [`resolve`](Self::resolve) picks
    /// is last.
    pub fn branch(&self, table: &ScoreTable, threshold: f64) -> Result<Vec<Prediction<'_>>> {
        Ok(self
            .descend(table, threshold)?
            .into_iter()
            .enumerate()
            .map(|(i, id)| Prediction {
                node: self.node(id),
                score: table.get(id),
                position: i + 1,
            })
            .collect())
    }

    /// Highest-scoring leaves, best first.
    ///
    /// Ties keep classifier output order. `k` is capped at
    /// [`MAX_PREDICTIONS`].
    pub fn top_leaves(&self, table: &ScoreTable, k: usize) -> Vec<Prediction<'_>> {
        self.top_leaves_where(table, k, |_| true)
    }

    /// Like [`top_leaves`](Self::top_leaves), limited to the leaves whose
    /// output index passes `keep`.
    pub fn top_leaves_where(
        &self,
        table: &ScoreTable,
        k: usize,
        keep: impl Fn(usize) -> bool,
    ) -> Vec<Prediction<'_>> {
        let mut ranked: Vec<(NodeId, f64)> = self
            .leaves()
            .iter()
            .enumerate()
            .filter(|&(leaf_index, _)| keep(leaf_index))
            .map(|(_, &id)| (id, table.get(id)))
            .collect();
        // Stable sort: equal scores stay in output-index order.
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));

        ranked
            .into_iter()
            .take(k.min(MAX_PREDICTIONS))
            .enumerate()
            .map(|(i, (id, score))| Prediction {
                node: self.node(id),
                score,
                position: i + 1,
            })
            .collect()
    }

    fn descend(&self, table: &ScoreTable, threshold: f64) -> Result<Vec<NodeId>> {
        if !(confidence::MIN..=confidence::MAX).contains(&threshold) {
            return Err(Error::InvalidThreshold { value: threshold });
        }
        if table.len() != self.len() {
            return Err(Error::DimensionMismatch {
                expected: self.len(),
                actual: table.len(),
            });
        }

        let mut path = Vec::with_capacity(self.depth() + 1);
        let mut current = self.root();
        path.push(current);

        while let Some(best) = best_child(self.node(current).children(), table) {
            if table.get(best) < threshold {
                break;
            }
            current = best;
            path.push(current);
        }

        Ok(path)
    }
}

/// Child with the strictly highest score; the earliest wins ties.
fn best_child(children: &[NodeId], table: &ScoreTable) -> Option<NodeId> {
    let mut best: Option<(NodeId, f64)> = None;
    for &child in children {
        let score = table.get(child);
        match best {
            Some((_, top)) if score <= top => {}
            _ => best = Some((child, score)),
        }
    }
    best.map(|(id, _)| id)
}
