//! Score vector file reading.

use crate::constants::file_extensions;
use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Classifier output as saved by an inference run.
#[derive(Deserialize)]
#[serde(untagged)]
enum ScoresDocument {
    Flat(Vec<f32>),
    /// Batch-of-one output shape, `[[s0, s1, ...]]`.
    Batched(Vec<Vec<f32>>),
}

/// Read a classifier score vector from a file.
///
/// # File Format
/// - `.json`: an array of numbers, or a single-row nested array
/// - anything else: numbers separated by whitespace and/or commas;
///   lines starting with `#` are ignored
pub fn read_scores(path: &Path) -> Result<Vec<f32>> {
    let content = std::fs::read_to_string(path).map_err(|e| Error::ScoresRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(file_extensions::JSON));

    let parsed = if is_json {
        parse_scores_json(&content)
    } else {
        parse_scores_text(&content)
    };

    parsed.map_err(|message| Error::ScoresParse {
        path: path.to_path_buf(),
        message,
    })
}

/// Parse a JSON score vector.
pub fn parse_scores_json(content: &str) -> std::result::Result<Vec<f32>, String> {
    match serde_json::from_str::<ScoresDocument>(content).map_err(|e| e.to_string())? {
        ScoresDocument::Flat(scores) => Ok(scores),
        ScoresDocument::Batched(mut rows) => {
            if rows.len() == 1 {
                Ok(rows.swap_remove(0))
            } else {
                Err(format!("expected a single row of scores, found {}", rows.len()))
            }
        }
    }
}

/// Parse whitespace- or comma-separated scores.
pub fn parse_scores_text(content: &str) -> std::result::Result<Vec<f32>, String> {
    content
        .lines()
        .filter(|line| !line.trim_start().starts_with('#'))
        .flat_map(|line| line.split(|c: char| c == ',' || c.is_whitespace()))
        .filter(|token| !token.is_empty())
        .enumerate()
        .map(|(i, token)| {
            token
                .parse::<f32>()
                .map_err(|_| format!("entry {i}: '{token}' is not a valid number"))
        })
        .collect()
}
