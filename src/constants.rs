//! Application-wide constants.
//!
//! All magic numbers and strings are defined here to ensure consistency
//! and make changes easy to track.

/// Application name used for config directories and user-facing messages.
pub const APP_NAME: &str = "taxonomer";

/// Default confidence threshold used by the CLI when none is configured.
///
/// The resolver itself has no default; callers always pass a threshold.
pub const DEFAULT_CONFIDENCE_THRESHOLD: f64 = 0.7;

/// Default number of top leaf predictions to report.
pub const DEFAULT_TOP_K: usize = 5;

/// Upper bound on leaf predictions returned by a single call.
pub const MAX_PREDICTIONS: usize = 30;

/// Root of every taxonomy; synthesized when the records do not declare it.
pub mod life {
    /// Taxon id of the Life root.
    pub const TAXON_ID: u64 = 48460;
    /// Display name of the synthetic root.
    pub const NAME: &str = "Life";
    /// Rank level of the synthetic root.
    pub const RANK: f32 = 100.0;
}

/// Confidence value bounds.
pub mod confidence {
    /// Minimum valid confidence value.
    pub const MIN: f64 = 0.0;
    /// Maximum valid confidence value.
    pub const MAX: f64 = 1.0;
    /// Decimal places for score formatting.
    pub const DECIMAL_PLACES: usize = 4;
}

/// File extensions recognised by the loaders.
pub mod file_extensions {
    /// JSON taxonomy or score vector.
    pub const JSON: &str = "json";
    /// CSV taxonomy table with a header row.
    pub const CSV: &str = "csv";
}
