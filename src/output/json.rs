//! JSON output format writer.

use crate::error::{Error, Result};
use crate::inference::Classification;
use crate::output::{ClassifiedInput, OutputWriter};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Path, PathBuf};

/// JSON result document structure.
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonResultFile {
    /// Taxonomy file the scores were resolved against.
    pub taxonomy: PathBuf,
    /// Resolution timestamp.
    pub generated_at: DateTime<Utc>,
    /// One entry per input file.
    pub results: Vec<JsonResult>,
}

/// Resolution settings recorded with each result.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct JsonSettings {
    /// Threshold used to descend the tree.
    pub threshold: f64,
}

/// Single input's result in JSON format.
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonResult {
    /// Score vector file.
    pub source: PathBuf,
    /// Settings used.
    pub settings: JsonSettings,
    /// Classification output.
    #[serde(flatten)]
    pub classification: Classification,
}

/// Writer collecting results into one JSON document.
pub struct JsonResultWriter {
    sink: Box<dyn Write>,
    taxonomy: PathBuf,
    results: Vec<JsonResult>,
}

impl JsonResultWriter {
    /// Create a new JSON writer over `sink`.
    pub fn new(sink: Box<dyn Write>, taxonomy: &Path) -> Self {
        Self {
            sink,
            taxonomy: taxonomy.to_path_buf(),
            results: Vec::new(),
        }
    }
}

impl OutputWriter for JsonResultWriter {
    fn write_header(&mut self) -> Result<()> {
        // Whole document is written at finalize
        Ok(())
    }

    fn write_result(&mut self, result: &ClassifiedInput) -> Result<()> {
        self.results.push(JsonResult {
            source: result.source.clone(),
            settings: JsonSettings {
                threshold: result.threshold,
            },
            classification: result.classification.clone(),
        });
        Ok(())
    }

    fn finalize(&mut self) -> Result<()> {
        let document = JsonResultFile {
            taxonomy: self.taxonomy.clone(),
            generated_at: Utc::now(),
            results: std::mem::take(&mut self.results),
        };

        serde_json::to_writer_pretty(&mut self.sink, &document)
            .map_err(|e| Error::JsonWrite { source: e })?;
        writeln!(self.sink)?;
        self.sink.flush()?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::taxonomy::PredictionRecord;
    use std::fs::File;
    use tempfile::NamedTempFile;

    fn sample() -> ClassifiedInput {
        let life = PredictionRecord {
            taxon_id: 48460,
            name: "Life".to_string(),
            rank: 100.0,
            score: 1.0,
            position: 1,
        };
        let aves = PredictionRecord {
            taxon_id: 3,
            name: "Aves".to_string(),
            rank: 50.0,
            score: 0.9,
            position: 2,
        };
        ClassifiedInput {
            source: PathBuf::from("scores/clip-01.json"),
            threshold: 0.8,
            classification: Classification {
                best: aves.clone(),
                branch: vec![life, aves.clone()],
                top_leaves: vec![PredictionRecord { position: 1, ..aves }],
            },
        }
    }

    #[test]
    fn test_json_writer_document() {
        let file = NamedTempFile::new().unwrap();
        let sink = Box::new(File::create(file.path()).unwrap());
        let mut writer = JsonResultWriter::new(sink, Path::new("taxonomy.csv"));

        writer.write_header().unwrap();
        writer.write_result(&sample()).unwrap();
        writer.finalize().unwrap();

        let contents = std::fs::read_to_string(file.path()).unwrap();
        let parsed: JsonResultFile = serde_json::from_str(&contents).unwrap();
        assert_eq!(parsed.taxonomy, PathBuf::from("taxonomy.csv"));
        assert_eq!(parsed.results.len(), 1);

        let result = &parsed.results[0];
        assert_eq!(result.settings.threshold, 0.8);
        assert_eq!(result.classification.best.name, "Aves");
        assert_eq!(result.classification.branch.len(), 2);
    }

    #[test]
    fn test_json_writer_empty() {
        let file = NamedTempFile::new().unwrap();
        let sink = Box::new(File::create(file.path()).unwrap());
        let mut writer = JsonResultWriter::new(sink, Path::new("t.json"));
        writer.finalize().unwrap();

        let contents = std::fs::read_to_string(file.path()).unwrap();
        assert!(contents.contains("\"results\": []"));
    }
}
