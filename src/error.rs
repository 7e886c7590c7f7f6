//! Error types for taxonomer.

/// Result type alias for taxonomer operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Failures while building a taxonomy tree.
///
/// Any of these aborts construction; a partially built tree is never exposed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TaxonomyError {
    /// No records were supplied.
    #[error("taxonomy contains no records")]
    EmptyTaxonomy,

    /// A record is missing a required field.
    #[error("taxonomy record {index} is missing required field '{field}'")]
    InvalidRecord {
        /// Position of the record in the input sequence.
        index: usize,
        /// Name of the missing field.
        field: &'static str,
    },

    /// Two records share a taxon id.
    #[error("duplicate taxon id {taxon_id}")]
    DuplicateTaxonId {
        /// The repeated taxon id.
        taxon_id: u64,
    },

    /// Two leaves map to the same classifier output index.
    #[error("leaf index {leaf_index} is used by taxa {first} and {second}")]
    DuplicateLeafId {
        /// The repeated output index.
        leaf_index: usize,
        /// Taxon that claimed the index first.
        first: u64,
        /// Taxon that claimed it again.
        second: u64,
    },

    /// A record references a parent that does not exist.
    #[error("taxon {taxon_id} references unknown parent {parent_taxon_id}")]
    DanglingParent {
        /// The child taxon.
        taxon_id: u64,
        /// The missing parent id.
        parent_taxon_id: u64,
    },

    /// The parent graph contains a cycle.
    #[error("taxon {taxon_id} is part of a parent cycle")]
    Cycle {
        /// A taxon on the cycle.
        taxon_id: u64,
    },

    /// A leaf has no output index, or an internal node carries one.
    #[error("taxon {taxon_id}: {reason}")]
    InvalidLeaf {
        /// The offending taxon.
        taxon_id: u64,
        /// What is wrong with it.
        reason: &'static str,
    },

    /// Leaf indices do not cover `0..leaf_count` contiguously.
    #[error("no leaf is bound to classifier output index {missing} (leaf count {leaf_count})")]
    LeafIndexGap {
        /// First index without a leaf.
        missing: usize,
        /// Number of leaves in the taxonomy.
        leaf_count: usize,
    },
}

/// Top-level error type for taxonomer.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Taxonomy tree construction failed.
    #[error("invalid taxonomy: {0}")]
    Taxonomy(#[from] TaxonomyError),

    /// Score vector length does not match the number of leaves.
    #[error("score vector has {actual} entries, taxonomy has {expected} leaves")]
    DimensionMismatch {
        /// Number of leaves in the taxonomy.
        expected: usize,
        /// Length of the supplied vector.
        actual: usize,
    },

    /// Score vector contains a negative or non-finite entry.
    #[error("invalid score {value} at index {index}")]
    InvalidScore {
        /// Position of the offending entry.
        index: usize,
        /// The offending value.
        value: f32,
    },

    /// Confidence threshold outside `[0, 1]`.
    #[error("invalid confidence threshold: {value} (must be 0.0 to 1.0)")]
    InvalidThreshold {
        /// The rejected threshold.
        value: f64,
    },

    /// Filter references a taxon that is not in the taxonomy.
    #[error("taxon {taxon_id} not found in taxonomy")]
    UnknownTaxon {
        /// The missing taxon id.
        taxon_id: u64,
    },

    /// Configuration directory could not be determined.
    #[error("could not determine configuration directory for this platform")]
    ConfigDirNotFound,

    /// Failed to read configuration file.
    #[error("failed to read config file '{path}'")]
    ConfigRead {
        /// Path to the config file.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse configuration file.
    #[error("failed to parse config file '{path}'")]
    ConfigParse {
        /// Path to the config file.
        path: std::path::PathBuf,
        /// Underlying parse error.
        #[source]
        source: toml::de::Error,
    },

    /// Configuration validation failed.
    #[error("configuration validation failed: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    /// Failed to write configuration file.
    #[error("failed to write config file '{path}'")]
    ConfigWrite {
        /// Path to the config file.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to serialize configuration.
    #[error("failed to serialize config")]
    ConfigSerialize {
        /// Underlying serialization error.
        #[source]
        source: toml::ser::Error,
    },

    /// No taxonomy file given on the command line or in the config.
    #[error("no taxonomy specified (use --taxonomy or set defaults.taxonomy in config)")]
    TaxonomyNotSpecified,

    /// Failed to read a taxonomy file.
    #[error("failed to read taxonomy file '{path}'")]
    TaxonomyRead {
        /// Path to the taxonomy file.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse a taxonomy file.
    #[error("failed to parse taxonomy file '{path}'")]
    TaxonomyParse {
        /// Path to the taxonomy file.
        path: std::path::PathBuf,
        /// Underlying parse error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Failed to read a score vector file.
    #[error("failed to read scores file '{path}'")]
    ScoresRead {
        /// Path to the scores file.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse a score vector file.
    #[error("failed to parse scores file '{path}': {message}")]
    ScoresParse {
        /// Path to the scores file.
        path: std::path::PathBuf,
        /// Description of the parse failure.
        message: String,
    },

    /// Failed to write JSON output.
    #[error("failed to write JSON output")]
    JsonWrite {
        /// Underlying serialization error.
        #[source]
        source: serde_json::Error,
    },

    /// Failed to write CSV output.
    #[error("failed to write CSV output")]
    CsvWrite {
        /// Underlying CSV error.
        #[source]
        source: csv::Error,
    },

    /// Some score files could not be resolved.
    #[error("{failed} of {total} score file(s) failed")]
    InputsFailed {
        /// Number of files that failed.
        failed: usize,
        /// Number of files given.
        total: usize,
    },
}
