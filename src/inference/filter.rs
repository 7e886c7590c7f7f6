//! Restrict classifier outputs to (or away from) one subtree.

use crate::error::{Error, Result};
use crate::taxonomy::TaxonomyIndex;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use tracing::debug;

/// Whether the filter keeps or drops the subtree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterMode {
    /// Keep only leaves beneath the taxon.
    #[default]
    Include,
    /// Drop leaves beneath the taxon.
    Exclude,
}

/// Subtree filter applied to raw scores before aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxonFilter {
    /// Root of the filtered subtree.
    pub taxon_id: u64,
    /// Keep or drop that subtree.
    #[serde(default)]
    pub mode: FilterMode,
}

/// Filter compiled against one taxonomy: a keep-flag per leaf index.
#[derive(Debug, Clone)]
pub struct LeafMask {
    keep: Vec<bool>,
}

impl LeafMask {
    /// Compile `filter` against `index`.
    pub fn new(index: &TaxonomyIndex, filter: TaxonFilter) -> Result<Self> {
        let ancestor = index
            .by_taxon_id(filter.taxon_id)
            .ok_or(Error::UnknownTaxon {
                taxon_id: filter.taxon_id,
            })?;

        let keep: Vec<bool> = index
            .leaves()
            .iter()
            .map(|&leaf| {
                let inside = index.is_descendant_of(leaf, ancestor);
                match filter.mode {
                    FilterMode::Include => inside,
                    FilterMode::Exclude => !inside,
                }
            })
            .collect();

        debug!(
            "Taxon filter {} ({:?}): keeping {} of {} leaves",
            filter.taxon_id,
            filter.mode,
            keep.iter().filter(|k| **k).count(),
            keep.len()
        );

        Ok(Self { keep })
    }

    /// Zero the scores of masked-out leaves.
    ///
    /// Borrows `scores` unchanged when its length does not match, so the
    /// aggregator reports the dimension error.
    pub fn apply<'a>(&self, scores: &'a [f32]) -> Cow<'a, [f32]> {
        if scores.len() != self.keep.len() {
            return Cow::Borrowed(scores);
        }
        Cow::Owned(
            scores
                .iter()
                .zip(&self.keep)
                .map(|(&score, &keep)| if keep { score } else { 0.0 })
                .collect(),
        )
    }

    /// Whether the leaf at `leaf_index` passes the filter.
    pub fn keeps(&self, leaf_index: usize) -> bool {
        self.keep.get(leaf_index).copied().unwrap_or(false)
    }
}
