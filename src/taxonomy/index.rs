//! Tree construction and lookup.

use crate::constants::life;
use crate::error::TaxonomyError;
use crate::taxonomy::{NodeId, TaxonNode, TaxonRecord};
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use tracing::debug;

/// Immutable taxonomy tree built once from flat records.
///
/// Nodes live in a single arena; parent and child links are [`NodeId`]s.
/// The index holds no per-call state, so a shared reference can serve any
/// number of concurrent classification calls.
#[derive(Debug, Clone)]
pub struct TaxonomyIndex {
    nodes: Vec<TaxonNode>,
    root: NodeId,
    by_taxon_id: HashMap<u64, NodeId>,
    /// Leaf node for each classifier output index.
    leaves: Vec<NodeId>,
    /// Every node, children before parents.
    post_order: Vec<NodeId>,
    max_depth: usize,
}

impl TaxonomyIndex {
    /// Build the tree from records supplied in any order.
    ///
    /// Children are attached in record order. Every record without a parent
    /// hangs under the "Life" root: the record with the Life taxon id when
    /// one is declared (orphans follow its own children), otherwise a
    /// synthetic Life node.
    pub fn build(records: &[TaxonRecord]) -> Result<Self, TaxonomyError> {
        if records.is_empty() {
            return Err(TaxonomyError::EmptyTaxonomy);
        }

        // Pass 1: one node per record.
        let mut nodes = Vec::with_capacity(records.len() + 1);
        let mut by_taxon_id = HashMap::with_capacity(records.len() + 1);
        for (index, record) in records.iter().enumerate() {
            let node = TaxonNode::from_record(index, record)?;
            match by_taxon_id.entry(node.taxon_id()) {
                Entry::Occupied(_) => {
                    return Err(TaxonomyError::DuplicateTaxonId {
                        taxon_id: node.taxon_id(),
                    });
                }
                Entry::Vacant(slot) => {
                    slot.insert(NodeId(index));
                }
            }
            nodes.push(node);
        }

        // Pass 2: link children to parents.
        let mut top_level = Vec::new();
        for index in 0..nodes.len() {
            let child = NodeId(index);
            let taxon_id = nodes[index].taxon_id();
            let Some(parent_taxon_id) = nodes[index].parent_taxon_id() else {
                top_level.push(child);
                continue;
            };
            let parent = *by_taxon_id
                .get(&parent_taxon_id)
                .ok_or(TaxonomyError::DanglingParent {
                    taxon_id,
                    parent_taxon_id,
                })?;
            if parent == child {
                return Err(TaxonomyError::Cycle { taxon_id });
            }
            nodes[parent.0].children.push(child);
            nodes[index].parent = Some(parent);
        }

        if top_level.is_empty() {
            return Err(TaxonomyError::Cycle {
                taxon_id: nodes[0].taxon_id(),
            });
        }

        let declared = top_level
            .iter()
            .position(|&id| nodes[id.0].taxon_id() == life::TAXON_ID);
        let root = match declared {
            Some(position) => {
                let root = top_level.remove(position);
                adopt(&mut nodes, root, top_level);
                root
            }
            None => {
                // A Life record that has a parent of its own.
                if by_taxon_id.contains_key(&life::TAXON_ID) {
                    return Err(TaxonomyError::DuplicateTaxonId {
                        taxon_id: life::TAXON_ID,
                    });
                }
                let root = NodeId(nodes.len());
                by_taxon_id.insert(life::TAXON_ID, root);
                nodes.push(TaxonNode::life());
                adopt(&mut nodes, root, top_level);
                root
            }
        };

        let (post_order, max_depth) = walk_from_root(&mut nodes, root)?;
        let leaves = bind_leaves(&nodes)?;

        debug!(
            "Built taxonomy: {} nodes, {} leaves, depth {}",
            nodes.len(),
            leaves.len(),
            max_depth
        );

        Ok(Self {
            nodes,
            root,
            by_taxon_id,
            leaves,
            post_order,
            max_depth,
        })
    }

    /// The canonical root of this tree.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// The root node itself.
    pub fn root_node(&self) -> &TaxonNode {
        &self.nodes[self.root.0]
    }

    /// Look up a node by id.
    ///
    /// # Panics
    ///
    /// Ids are only meaningful for the index that produced them. Panics if
    /// `id` lies outside this arena; use [`get`](Self::get) for ids that may
    /// come from another index.
    pub fn node(&self, id: NodeId) -> &TaxonNode {
        &self.nodes[id.0]
    }

    /// Look up a node by id, `None` if `id` lies outside this arena.
    pub fn get(&self, id: NodeId) -> Option<&TaxonNode> {
        self.nodes.get(id.0)
    }

    /// Find a node by taxon id.
    pub fn by_taxon_id(&self, taxon_id: u64) -> Option<NodeId> {
        self.by_taxon_id.get(&taxon_id).copied()
    }

    /// Find the leaf bound to a classifier output index.
    pub fn by_leaf_index(&self, leaf_index: usize) -> Option<NodeId> {
        self.leaves.get(leaf_index).copied()
    }

    /// Leaves ordered by classifier output index.
    pub fn leaves(&self) -> &[NodeId] {
        &self.leaves
    }

    /// Number of leaves, which is the expected classifier output length.
    pub fn leaf_count(&self) -> usize {
        self.leaves.len()
    }

    /// Total number of nodes, including any synthetic root.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false; an index holds at least one node.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Greatest node depth (root is 0).
    pub fn depth(&self) -> usize {
        self.max_depth
    }

    /// Iterate over all nodes with their ids, in arena order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &TaxonNode)> {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId(i), n))
    }

    /// Nodes ordered children-before-parents.
    pub(crate) fn post_order(&self) -> &[NodeId] {
        &self.post_order
    }

    /// Path from the root down to `id`, inclusive.
    ///
    /// # Panics
    ///
    /// Panics if `id` lies outside this arena.
    pub fn path_to(&self, id: NodeId) -> Vec<NodeId> {
        let mut path = vec![id];
        let mut current = id;
        while let Some(parent) = self.nodes[current.0].parent {
            path.push(parent);
            current = parent;
        }
        path.reverse();
        path
    }

    /// Whether `id` is `ancestor` or lies beneath it.
    ///
    /// # Panics
    ///
    /// Panics if `id` lies outside this arena.
    pub fn is_descendant_of(&self, id: NodeId, ancestor: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(node) = current {
            if node == ancestor {
                return true;
            }
            current = self.nodes[node.0].parent;
        }
        false
    }
}

/// Attach top-level taxa under `root`, after any children it already has.
fn adopt(nodes: &mut [TaxonNode], root: NodeId, orphans: Vec<NodeId>) {
    if orphans.is_empty() {
        return;
    }
    debug!(
        "Attaching {} top-level taxa under '{}'",
        orphans.len(),
        nodes[root.0].name()
    );
    for &child in &orphans {
        nodes[child.0].parent = Some(root);
    }
    nodes[root.0].children.extend(orphans);
}

/// Depth-first walk from the root: assigns depths, rejects unreachable
/// nodes and returns a children-before-parents ordering.
fn walk_from_root(
    nodes: &mut [TaxonNode],
    root: NodeId,
) -> Result<(Vec<NodeId>, usize), TaxonomyError> {
    let mut pre_order = Vec::with_capacity(nodes.len());
    let mut visited = vec![false; nodes.len()];
    let mut stack = vec![root];
    let mut max_depth = 0;

    nodes[root.0].depth = 0;
    while let Some(id) = stack.pop() {
        visited[id.0] = true;
        pre_order.push(id);
        let depth = nodes[id.0].depth + 1;
        for i in (0..nodes[id.0].children.len()).rev() {
            let child = nodes[id.0].children[i];
            nodes[child.0].depth = depth;
            max_depth = max_depth.max(depth);
            stack.push(child);
        }
    }

    // Each node has at most one parent, so anything the root cannot reach
    // sits on a parent cycle.
    if let Some(unreached) = visited.iter().position(|seen| !seen) {
        return Err(TaxonomyError::Cycle {
            taxon_id: nodes[unreached].taxon_id(),
        });
    }

    pre_order.reverse();
    Ok((pre_order, max_depth))
}

/// Map classifier output indices to leaves, checking that they cover
/// `0..leaf_count` exactly once.
fn bind_leaves(nodes: &[TaxonNode]) -> Result<Vec<NodeId>, TaxonomyError> {
    let mut slots: Vec<Option<NodeId>> = Vec::new();

    for (i, node) in nodes.iter().enumerate() {
        match (node.is_leaf(), node.output_index()) {
            (true, Some(leaf_index)) => {
                if leaf_index >= slots.len() {
                    slots.resize(leaf_index + 1, None);
                }
                if let Some(first) = slots[leaf_index] {
                    return Err(TaxonomyError::DuplicateLeafId {
                        leaf_index,
                        first: nodes[first.0].taxon_id(),
                        second: node.taxon_id(),
                    });
                }
                slots[leaf_index] = Some(NodeId(i));
            }
            (true, None) => {
                return Err(TaxonomyError::InvalidLeaf {
                    taxon_id: node.taxon_id(),
                    reason: "leaf has no classifier output index",
                });
            }
            (false, Some(_)) => {
                return Err(TaxonomyError::InvalidLeaf {
                    taxon_id: node.taxon_id(),
                    reason: "internal node carries a classifier output index",
                });
            }
            (false, None) => {}
        }
    }

    let leaf_count = slots.len();
    slots
        .into_iter()
        .enumerate()
        .map(|(missing, slot)| slot.ok_or(TaxonomyError::LeafIndexGap { missing, leaf_count }))
        .collect()
}
