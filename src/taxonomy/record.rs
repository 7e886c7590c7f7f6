//! Flat taxonomy records as supplied by a taxonomy file.

use serde::{Deserialize, Deserializer, Serialize};

/// One row of taxonomy input, before tree construction.
///
/// Every field is optional at this level so that a missing `taxon_id`,
/// `name` or `rank` surfaces as a construction error with the record's
/// position instead of an opaque parse failure. Field names accept the
/// long form (`taxonId` / `taxon_id`) and the compact single-letter keys
/// used by mobile taxonomy exports (`k`, `n`, `r`, `p`, `l`, `c`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaxonRecord {
    /// Stable unique taxon identifier.
    #[serde(
        default,
        alias = "taxonId",
        alias = "k",
        deserialize_with = "opt_integral"
    )]
    pub taxon_id: Option<u64>,

    /// Display name.
    #[serde(default, alias = "n", deserialize_with = "opt_text")]
    pub name: Option<String>,

    /// Rank level. Intermediate levels such as 33.5 are kept as given.
    #[serde(
        default,
        alias = "r",
        alias = "rank_level",
        deserialize_with = "opt_rank"
    )]
    pub rank: Option<f32>,

    /// Parent taxon id; absent for top-level taxa.
    #[serde(
        default,
        alias = "parentTaxonId",
        alias = "p",
        deserialize_with = "opt_integral"
    )]
    pub parent_taxon_id: Option<u64>,

    /// Classifier output index (leaves only).
    #[serde(
        default,
        alias = "leafId",
        alias = "l",
        alias = "leaf_class_id",
        deserialize_with = "opt_integral"
    )]
    pub leaf_id: Option<usize>,

    /// Alternate classifier output index (leaves only).
    #[serde(
        default,
        alias = "classId",
        alias = "c",
        deserialize_with = "opt_integral"
    )]
    pub class_id: Option<usize>,
}

impl TaxonRecord {
    /// Create a complete record; mostly useful for building taxonomies in code.
    pub fn new(taxon_id: u64, name: impl Into<String>, rank: f32) -> Self {
        Self {
            taxon_id: Some(taxon_id),
            name: Some(name.into()),
            rank: Some(rank),
            ..Self::default()
        }
    }

    /// Set the parent taxon id.
    #[must_use]
    pub fn with_parent(mut self, parent_taxon_id: u64) -> Self {
        self.parent_taxon_id = Some(parent_taxon_id);
        self
    }

    /// Set the classifier output index, making this record a leaf.
    #[must_use]
    pub fn with_leaf(mut self, leaf_id: usize) -> Self {
        self.leaf_id = Some(leaf_id);
        self
    }
}

/// Numbers arrive as JSON numbers, numeric strings, or CSV cells (`"70.0"`).
#[derive(Deserialize)]
#[serde(untagged)]
enum RawNumber {
    Int(u64),
    Float(f64),
    Text(String),
}

impl RawNumber {
    fn into_u64<E: serde::de::Error>(self) -> Result<Option<u64>, E> {
        match self {
            Self::Int(v) => Ok(Some(v)),
            Self::Float(v) => float_to_u64(v).map(Some),
            Self::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return Ok(None);
                }
                if let Ok(v) = trimmed.parse::<u64>() {
                    return Ok(Some(v));
                }
                parse_float(trimmed).and_then(float_to_u64).map(Some)
            }
        }
    }

    #[allow(clippy::cast_precision_loss)]
    fn into_f64<E: serde::de::Error>(self) -> Result<Option<f64>, E> {
        match self {
            Self::Int(v) => Ok(Some(v as f64)),
            Self::Float(v) => Ok(Some(v)),
            Self::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return Ok(None);
                }
                parse_float(trimmed).map(Some)
            }
        }
    }
}

fn parse_float<E: serde::de::Error>(text: &str) -> Result<f64, E> {
    text.parse::<f64>()
        .map_err(|_| E::custom(format!("'{text}' is not a valid number")))
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss,
    clippy::float_cmp
)]
fn float_to_u64<E: serde::de::Error>(v: f64) -> Result<u64, E> {
    if v.is_finite() && v >= 0.0 && v.fract() == 0.0 && v <= u64::MAX as f64 {
        Ok(v as u64)
    } else {
        Err(E::custom(format!(
            "expected a non-negative integer, got {v}"
        )))
    }
}

fn opt_integral<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: TryFrom<u64>,
{
    let Some(raw) = Option::<RawNumber>::deserialize(deserializer)? else {
        return Ok(None);
    };
    raw.into_u64::<D::Error>()?
        .map(|v| {
            T::try_from(v)
                .map_err(|_| serde::de::Error::custom(format!("value {v} is out of range")))
        })
        .transpose()
}

#[allow(clippy::cast_possible_truncation)]
fn opt_rank<'de, D>(deserializer: D) -> Result<Option<f32>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = Option::<RawNumber>::deserialize(deserializer)? else {
        return Ok(None);
    };
    raw.into_f64::<D::Error>()?
        .map(|v| {
            if v.is_finite() && v >= 0.0 && v <= f64::from(f32::MAX) {
                Ok(v as f32)
            } else {
                Err(serde::de::Error::custom(format!(
                    "expected a non-negative rank level, got {v}"
                )))
            }
        })
        .transpose()
}

fn opt_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.filter(|s| !s.trim().is_empty()))
}
