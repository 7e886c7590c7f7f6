//! Human-readable text output.

use crate::constants::confidence::DECIMAL_PLACES;
use crate::error::Result;
use crate::output::{ClassifiedInput, OutputWriter};
use std::io::Write;

/// Plain text writer: the branch as an indented tree, then the top leaves.
pub struct TextWriter {
    sink: Box<dyn Write>,
    written: usize,
}

impl TextWriter {
    /// Create a new text writer over `sink`.
    pub fn new(sink: Box<dyn Write>) -> Self {
        Self { sink, written: 0 }
    }
}

impl OutputWriter for TextWriter {
    fn write_header(&mut self) -> Result<()> {
        Ok(())
    }

    fn write_result(&mut self, result: &ClassifiedInput) -> Result<()> {
        if self.written > 0 {
            writeln!(self.sink)?;
        }
        self.written += 1;

        let classification = &result.classification;
        writeln!(
            self.sink,
            "{} (threshold {})",
            result.source.display(),
            result.threshold
        )?;
        writeln!(
            self.sink,
            "  best: {} [{}] rank {} score {:.decimal$}",
            classification.best.name,
            classification.best.taxon_id,
            classification.best.rank,
            classification.best.score,
            decimal = DECIMAL_PLACES,
        )?;

        writeln!(self.sink, "  branch:")?;
        for (depth, entry) in classification.branch.iter().enumerate() {
            writeln!(
                self.sink,
                "    {:indent$}{} [{}] {:.decimal$}",
                "",
                entry.name,
                entry.taxon_id,
                entry.score,
                indent = depth * 2,
                decimal = DECIMAL_PLACES,
            )?;
        }

        if !classification.top_leaves.is_empty() {
            writeln!(self.sink, "  top leaves:")?;
            for leaf in &classification.top_leaves {
                writeln!(
                    self.sink,
                    "    {}. {} [{}] {:.decimal$}",
                    leaf.position,
                    leaf.name,
                    leaf.taxon_id,
                    leaf.score,
                    decimal = DECIMAL_PLACES,
                )?;
            }
        }
        Ok(())
    }

    fn finalize(&mut self) -> Result<()> {
        self.sink.flush()?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::inference::Classification;
    use crate::taxonomy::PredictionRecord;
    use std::fs::File;
    use std::path::PathBuf;
    use tempfile::NamedTempFile;

    #[test]
    fn test_text_writer_layout() {
        let file = NamedTempFile::new().unwrap();
        let sink = Box::new(File::create(file.path()).unwrap());
        let mut writer = TextWriter::new(sink);

        let life = PredictionRecord {
            taxon_id: 48460,
            name: "Life".to_string(),
            rank: 100.0,
            score: 1.0,
            position: 1,
        };
        let input = ClassifiedInput {
            source: PathBuf::from("a.txt"),
            threshold: 0.99,
            classification: Classification {
                best: life.clone(),
                branch: vec![life],
                top_leaves: vec![],
            },
        };

        writer.write_result(&input).unwrap();
        writer.write_result(&input).unwrap();
        writer.finalize().unwrap();

        let contents = std::fs::read_to_string(file.path()).unwrap();
        assert!(contents.contains("best: Life [48460] rank 100 score 1.0000"));
        assert!(contents.contains("    Life [48460] 1.0000"));
        assert!(!contents.contains("top leaves"));
        assert_eq!(contents.matches("a.txt").count(), 2);
    }
}
