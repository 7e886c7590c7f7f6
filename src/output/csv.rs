//! CSV output format writer.

use crate::constants::confidence::DECIMAL_PLACES;
use crate::error::{Error, Result};
use crate::output::{ClassifiedInput, OutputWriter};
use std::io::Write;

const HEADER: [&str; 7] = [
    "source",
    "position",
    "taxon_id",
    "name",
    "rank",
    "score",
    "best",
];

/// CSV writer emitting one row per branch entry.
pub struct CsvWriter {
    writer: csv::Writer<Box<dyn Write>>,
}

impl CsvWriter {
    /// Create a new CSV writer over `sink`.
    pub fn new(sink: Box<dyn Write>) -> Self {
        Self {
            writer: csv::WriterBuilder::new().has_headers(false).from_writer(sink),
        }
    }
}

impl OutputWriter for CsvWriter {
    fn write_header(&mut self) -> Result<()> {
        self.writer
            .write_record(HEADER)
            .map_err(|e| Error::CsvWrite { source: e })
    }

    fn write_result(&mut self, result: &ClassifiedInput) -> Result<()> {
        let source = result.source.display().to_string();
        let best_id = result.classification.best.taxon_id;

        for entry in &result.classification.branch {
            let row: [String; 7] = [
                source.clone(),
                entry.position.to_string(),
                entry.taxon_id.to_string(),
                entry.name.clone(),
                entry.rank.to_string(),
                format!("{:.decimal$}", entry.score, decimal = DECIMAL_PLACES),
                (entry.taxon_id == best_id).to_string(),
            ];
            self.writer
                .write_record(&row)
                .map_err(|e| Error::CsvWrite { source: e })?;
        }
        Ok(())
    }

    fn finalize(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
