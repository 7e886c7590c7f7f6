//! Taxon nodes stored in the taxonomy arena.

use crate::error::TaxonomyError;
use crate::taxonomy::TaxonRecord;
use serde::Serialize;

/// Index of a node inside its [`TaxonomyIndex`](crate::taxonomy::TaxonomyIndex) arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Position of the node in the arena.
    pub fn index(self) -> usize {
        self.0
    }
}

/// A single taxon in the tree.
///
/// Children are owned by the arena and listed here by [`NodeId`] in
/// construction order. `parent` is a back-reference for walking towards the
/// root and carries no ownership.
#[derive(Debug, Clone, PartialEq)]
pub struct TaxonNode {
    taxon_id: u64,
    name: String,
    rank: f32,
    parent_taxon_id: Option<u64>,
    leaf_id: Option<usize>,
    class_id: Option<usize>,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) depth: usize,
}

impl TaxonNode {
    /// Build a detached node from a record at position `index`.
    pub fn from_record(index: usize, record: &TaxonRecord) -> Result<Self, TaxonomyError> {
        let missing = |field| TaxonomyError::InvalidRecord { index, field };

        Ok(Self {
            taxon_id: record.taxon_id.ok_or_else(|| missing("taxon_id"))?,
            name: record.name.clone().ok_or_else(|| missing("name"))?,
            rank: record
                .rank
                .filter(|rank| rank.is_finite() && *rank >= 0.0)
                .ok_or_else(|| missing("rank"))?,
            parent_taxon_id: record.parent_taxon_id,
            leaf_id: record.leaf_id,
            class_id: record.class_id,
            parent: None,
            children: Vec::new(),
            depth: 0,
        })
    }

    /// Synthetic root used when the records declare no Life taxon.
    pub(crate) fn life() -> Self {
        use crate::constants::life;

        Self {
            taxon_id: life::TAXON_ID,
            name: life::NAME.to_string(),
            rank: life::RANK,
            parent_taxon_id: None,
            leaf_id: None,
            class_id: None,
            parent: None,
            children: Vec::new(),
            depth: 0,
        }
    }

    /// Stable taxon identifier.
    pub fn taxon_id(&self) -> u64 {
        self.taxon_id
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rank level; may be fractional for intermediate ranks.
    pub fn rank(&self) -> f32 {
        self.rank
    }

    /// Parent taxon id as declared by the input record.
    pub fn parent_taxon_id(&self) -> Option<u64> {
        self.parent_taxon_id
    }

    /// Leaf id as declared by the input record.
    pub fn leaf_id(&self) -> Option<usize> {
        self.leaf_id
    }

    /// Class id as declared by the input record.
    pub fn class_id(&self) -> Option<usize> {
        self.class_id
    }

    /// Classifier output index bound to this node: `leaf_id`, else `class_id`.
    pub fn output_index(&self) -> Option<usize> {
        self.leaf_id.or(self.class_id)
    }

    /// Parent node, `None` for the root.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Children in construction order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Distance from the root (root is 0).
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Whether this node has no children.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_record_complete() {
        let record = TaxonRecord::new(47157, "Lepidoptera", 40.0)
            .with_parent(47158)
            .with_leaf(2);
        let node = TaxonNode::from_record(0, &record);
        assert!(node.is_ok());
        let node = node.ok();
        let node = node.as_ref();
        assert_eq!(node.map(TaxonNode::taxon_id), Some(47157));
        assert_eq!(node.map(TaxonNode::name), Some("Lepidoptera"));
        assert_eq!(node.and_then(TaxonNode::output_index), Some(2));
        assert_eq!(node.and_then(TaxonNode::parent_taxon_id), Some(47158));
    }

    #[test]
    fn test_from_record_missing_name() {
        let record = TaxonRecord {
            taxon_id: Some(1),
            rank: Some(10.0),
            ..TaxonRecord::default()
        };
        assert_eq!(
            TaxonNode::from_record(7, &record),
            Err(TaxonomyError::InvalidRecord {
                index: 7,
                field: "name"
            })
        );
    }

    #[test]
    fn test_from_record_missing_taxon_id() {
        let record = TaxonRecord {
            name: Some("Aves".to_string()),
            rank: Some(50.0),
            ..TaxonRecord::default()
        };
        assert!(matches!(
            TaxonNode::from_record(0, &record),
            Err(TaxonomyError::InvalidRecord {
                field: "taxon_id",
                ..
            })
        ));
    }

    #[test]
    fn test_from_record_nan_rank() {
        let record = TaxonRecord::new(1, "Aves", f32::NAN);
        assert!(matches!(
            TaxonNode::from_record(3, &record),
            Err(TaxonomyError::InvalidRecord {
                index: 3,
                field: "rank"
            })
        ));
    }

    #[test]
    fn test_output_index_prefers_leaf_id() {
        let record = TaxonRecord {
            class_id: Some(9),
            ..TaxonRecord::new(5, "Apis mellifera", 10.0).with_leaf(4)
        };
        let node = TaxonNode::from_record(0, &record).ok();
        assert_eq!(node.and_then(|n| n.output_index()), Some(4));

        let record = TaxonRecord {
            class_id: Some(9),
            ..TaxonRecord::new(5, "Apis mellifera", 10.0)
        };
        let node = TaxonNode::from_record(0, &record).ok();
        assert_eq!(node.and_then(|n| n.output_index()), Some(9));
    }
}
