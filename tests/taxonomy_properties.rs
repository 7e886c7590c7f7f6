//! Property tests for aggregation and resolution over random trees.

#![allow(clippy::unwrap_used, clippy::cast_possible_truncation)]

use proptest::prelude::*;
use taxonomer::constants::life;
use taxonomer::taxonomy::{TaxonRecord, TaxonomyIndex};

/// Random forest as parent links: node `i` hangs under an earlier node or
/// starts a new top-level tree.
fn parents() -> impl Strategy<Value = Vec<Option<usize>>> {
    prop::collection::vec((prop::bool::weighted(0.1), any::<prop::sample::Index>()), 1..40).prop_map(
        |choices| {
            choices
                .into_iter()
                .enumerate()
                .map(|(i, (detached, pick))| {
                    if i == 0 || detached {
                        None
                    } else {
                        Some(pick.index(i))
                    }
                })
                .collect()
        },
    )
}

fn records(parents: &[Option<usize>]) -> (Vec<TaxonRecord>, usize) {
    let mut has_children = vec![false; parents.len()];
    for parent in parents.iter().flatten() {
        has_children[*parent] = true;
    }

    let mut leaf_ids = vec![None; parents.len()];
    let mut leaf_count = 0;
    for (i, leaf_id) in leaf_ids.iter_mut().enumerate() {
        if !has_children[i] {
            *leaf_id = Some(leaf_count);
            leaf_count += 1;
        }
    }

    // Children come before their parents to exercise forward references.
    let records = (0..parents.len())
        .rev()
        .map(|i| {
            let mut record = TaxonRecord::new(i as u64 + 1, format!("taxon-{i}"), 10.0);
            if let Some(parent) = parents[i] {
                record = record.with_parent(parent as u64 + 1);
            }
            if let Some(leaf_id) = leaf_ids[i] {
                record = record.with_leaf(leaf_id);
            }
            record
        })
        .collect();
    (records, leaf_count)
}

/// Tree plus a normalized score vector of matching length.
fn tree_and_scores() -> impl Strategy<Value = (Vec<TaxonRecord>, Vec<f32>)> {
    parents().prop_flat_map(|parents| {
        let (records, leaf_count) = records(&parents);
        (
            Just(records),
            prop::collection::vec(0.0f32..1.0, leaf_count).prop_map(normalize),
        )
    })
}

fn normalize(mut scores: Vec<f32>) -> Vec<f32> {
    let sum: f32 = scores.iter().sum();
    if sum <= f32::EPSILON {
        scores.iter_mut().for_each(|s| *s = 0.0);
        scores[0] = 1.0;
    } else {
        scores.iter_mut().for_each(|s| *s /= sum);
    }
    scores
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_single_parentless_node((records, _) in tree_and_scores()) {
        let index = TaxonomyIndex::build(&records).unwrap();
        let roots = index.iter().filter(|(_, node)| node.parent().is_none()).count();
        prop_assert_eq!(roots, 1);
        prop_assert_eq!(index.len(), records.len() + 1);

        // Every top-level record hangs directly under a synthetic Life root.
        let root = index.root_node();
        prop_assert_eq!(root.taxon_id(), life::TAXON_ID);
        let top_level = records.iter().filter(|r| r.parent_taxon_id.is_none()).count();
        prop_assert_eq!(root.children().len(), top_level);
    }

    #[test]
    fn prop_root_collects_all_mass((records, scores) in tree_and_scores()) {
        let index = TaxonomyIndex::build(&records).unwrap();
        let table = index.aggregate(&scores).unwrap();
        prop_assert!((table.get(index.root()) - 1.0).abs() < 1e-4);
    }

    #[test]
    fn prop_internal_node_is_sum_of_children((records, scores) in tree_and_scores()) {
        let index = TaxonomyIndex::build(&records).unwrap();
        let table = index.aggregate(&scores).unwrap();
        for (id, node) in index.iter() {
            if node.is_leaf() {
                continue;
            }
            let children: f64 = node.children().iter().map(|&c| table.get(c)).sum();
            prop_assert!((table.get(id) - children).abs() < 1e-9);
        }
    }

    #[test]
    fn prop_resolution_is_deterministic(
        (records, scores) in tree_and_scores(),
        threshold in 0.0f64..=1.0,
    ) {
        let index = TaxonomyIndex::build(&records).unwrap();
        let first = index.resolve(&index.aggregate(&scores).unwrap(), threshold).unwrap().to_record();
        let second = index.resolve(&index.aggregate(&scores).unwrap(), threshold).unwrap().to_record();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_zero_threshold_reaches_leaf((records, scores) in tree_and_scores()) {
        let index = TaxonomyIndex::build(&records).unwrap();
        let table = index.aggregate(&scores).unwrap();
        let best = index.resolve(&table, 0.0).unwrap();
        prop_assert!(best.node.is_leaf());
    }

    #[test]
    fn prop_branch_ends_at_resolved_taxon(
        (records, scores) in tree_and_scores(),
        threshold in 0.0f64..=1.0,
    ) {
        let index = TaxonomyIndex::build(&records).unwrap();
        let table = index.aggregate(&scores).unwrap();
        let best = index.resolve(&table, threshold).unwrap();
        let branch = index.branch(&table, threshold).unwrap();

        prop_assert_eq!(branch[0].node.taxon_id(), index.root_node().taxon_id());
        prop_assert_eq!(branch.last().map(|p| p.node.taxon_id()), Some(best.node.taxon_id()));
        for (i, prediction) in branch.iter().enumerate().skip(1) {
            prop_assert!(prediction.score >= threshold);
            prop_assert_eq!(prediction.position, i + 1);
            prop_assert_eq!(prediction.node.depth(), i + branch[0].node.depth());
        }
    }
}
