//! Taxonomy tree and score resolution.
//!
//! A [`TaxonomyIndex`] is built once from flat [`TaxonRecord`]s and is
//! read-only afterwards. Each classification call aggregates a score vector
//! into its own [`ScoreTable`] and resolves it against a threshold:
//!
//! ```
//! use taxonomer::taxonomy::{TaxonRecord, TaxonomyIndex};
//!
//! let index = TaxonomyIndex::build(&[
//!     TaxonRecord::new(1, "Insecta", 50.0),
//!     TaxonRecord::new(2, "Coleoptera", 40.0).with_parent(1).with_leaf(0),
//!     TaxonRecord::new(3, "Lepidoptera", 40.0).with_parent(1).with_leaf(1),
//! ])?;
//! let table = index.aggregate(&[0.1, 0.9])?;
//! let best = index.resolve(&table, 0.8)?;
//! assert_eq!(best.node.name(), "Lepidoptera");
//! # Ok::<(), taxonomer::Error>(())
//! ```

mod index;
mod node;
mod record;
mod resolve;
mod score;

pub use index::TaxonomyIndex;
pub use node::{NodeId, TaxonNode};
pub use record::TaxonRecord;
pub use resolve::{Prediction, PredictionRecord};
pub use score::ScoreTable;
