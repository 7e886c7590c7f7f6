//! Output writer trait definition.

use crate::config::OutputFormat;
use crate::error::Result;
use crate::output::{ClassifiedInput, CsvWriter, JsonResultWriter, TextWriter};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Trait for writing classification results.
pub trait OutputWriter {
    /// Write the file header (if applicable).
    fn write_header(&mut self) -> Result<()>;

    /// Write the result for a single input.
    fn write_result(&mut self, result: &ClassifiedInput) -> Result<()>;

    /// Finalize the output (flush, close, etc.).
    fn finalize(&mut self) -> Result<()>;
}

/// Create a writer for `format`, targeting `path` or stdout when `None`.
pub fn create_writer(
    format: OutputFormat,
    path: Option<&Path>,
    taxonomy: &Path,
) -> Result<Box<dyn OutputWriter>> {
    let sink: Box<dyn Write> = match path {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(std::io::stdout().lock()),
    };

    Ok(match format {
        OutputFormat::Json => Box::new(JsonResultWriter::new(sink, taxonomy)),
        OutputFormat::Csv => Box::new(CsvWriter::new(sink)),
        OutputFormat::Text => Box::new(TextWriter::new(sink)),
    })
}
