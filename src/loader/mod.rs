//! Reading taxonomy and score files from disk.

mod scores;
mod taxonomy;

pub use scores::{parse_scores_json, parse_scores_text, read_scores};
pub use taxonomy::{load_taxonomy, parse_taxonomy_csv, parse_taxonomy_json, read_taxonomy};
