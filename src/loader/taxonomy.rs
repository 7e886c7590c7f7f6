//! Taxonomy file reading.

use crate::constants::file_extensions;
use crate::error::{Error, Result};
use crate::taxonomy::{TaxonRecord, TaxonomyIndex};
use std::io::Read;
use std::path::Path;
use tracing::info;

/// Read taxonomy records from a file.
///
/// # File Format
/// - `.csv`: header row with `taxon_id,name,rank,parent_taxon_id,leaf_id,class_id`
///   (`rank_level` and `leaf_class_id` are accepted as column names; extra
///   columns are ignored)
/// - anything else: JSON array of record objects, long or compact keys
///
/// Records may appear in any order. Rank levels may be fractional (`33.5`).
pub fn read_taxonomy(path: &Path) -> Result<Vec<TaxonRecord>> {
    let is_csv = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(file_extensions::CSV));

    let parse_error = |source: Box<dyn std::error::Error + Send + Sync>| Error::TaxonomyParse {
        path: path.to_path_buf(),
        source,
    };

    if is_csv {
        let file = std::fs::File::open(path).map_err(|e| Error::TaxonomyRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        parse_taxonomy_csv(file).map_err(|e| parse_error(Box::new(e)))
    } else {
        let content = std::fs::read_to_string(path).map_err(|e| Error::TaxonomyRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        parse_taxonomy_json(&content).map_err(|e| parse_error(Box::new(e)))
    }
}

/// Parse a JSON array of taxonomy records.
pub fn parse_taxonomy_json(content: &str) -> serde_json::Result<Vec<TaxonRecord>> {
    serde_json::from_str(content)
}

/// Parse CSV taxonomy records with a header row.
pub fn parse_taxonomy_csv<R: Read>(reader: R) -> csv::Result<Vec<TaxonRecord>> {
    csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader)
        .deserialize()
        .collect()
}

/// Read a taxonomy file and build its tree.
pub fn load_taxonomy(path: &Path) -> Result<TaxonomyIndex> {
    let records = read_taxonomy(path)?;
    info!(
        "Read {} taxonomy records from {}",
        records.len(),
        path.display()
    );
    Ok(TaxonomyIndex::build(&records)?)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::error::TaxonomyError;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_json_mixed_keys() {
        let records = parse_taxonomy_json(
            r#"[
                {"k": 3, "n": "Lepidoptera", "r": 40, "p": 2, "l": 0},
                {"taxonId": 2, "name": "Insecta", "rank": 50}
            ]"#,
        )
        .unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].parent_taxon_id, Some(2));
        assert_eq!(records[1].name.as_deref(), Some("Insecta"));
    }

    #[test]
    fn test_parse_csv() {
        let data = "\
parent_taxon_id,taxon_id,rank_level,leaf_class_id,iconic_class_id,name
,1,70,,,Animalia
1,47158,50,,3,Insecta
47158,47157,40.0,0,3,Lepidoptera
47158,372739,33.5,1,3,Cucujiformia
";
        let records = parse_taxonomy_csv(data.as_bytes()).unwrap();
        assert_eq!(records.len(), 4);
        assert_eq!(records[0].parent_taxon_id, None);
        assert_eq!(records[0].leaf_id, None);
        assert_eq!(records[2].rank, Some(40.0));
        assert_eq!(records[3].rank, Some(33.5));
        assert_eq!(records[2].leaf_id, Some(0));
        assert_eq!(records[2].name.as_deref(), Some("Lepidoptera"));
    }

    #[test]
    fn test_read_csv_file_by_extension() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "taxon_id,name,rank,parent_taxon_id,leaf_id").unwrap();
        writeln!(file, "1,Insecta,50,,").unwrap();
        writeln!(file, "2,Coleoptera,40,1,0").unwrap();
        file.flush().unwrap();

        let records = read_taxonomy(file.path()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].leaf_id, Some(0));
    }

    #[test]
    fn test_load_json_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[
                {{"taxon_id": 2, "name": "Coleoptera", "rank": 40, "parent_taxon_id": 1, "leaf_id": 0}},
                {{"taxon_id": 1, "name": "Insecta", "rank": 50}}
            ]"#
        )
        .unwrap();
        file.flush().unwrap();

        let index = load_taxonomy(file.path()).unwrap();
        let root = index.root_node();
        assert_eq!(root.name(), "Life");
        assert_eq!(root.children().len(), 1);
        assert_eq!(index.node(root.children()[0]).name(), "Insecta");
        assert_eq!(index.leaf_count(), 1);
    }

    #[test]
    fn test_load_invalid_taxonomy() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"[{{"taxon_id": 1, "rank": 50}}]"#).unwrap();
        file.flush().unwrap();

        let result = load_taxonomy(file.path());
        assert!(matches!(
            result,
            Err(Error::Taxonomy(TaxonomyError::InvalidRecord {
                index: 0,
                field: "name"
            }))
        ));
    }

    #[test]
    fn test_malformed_json() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        file.flush().unwrap();
        assert!(matches!(
            read_taxonomy(file.path()),
            Err(Error::TaxonomyParse { .. })
        ));
    }

    #[test]
    fn test_missing_file() {
        let result = read_taxonomy(Path::new("/nonexistent/taxonomy.json"));
        assert!(matches!(result, Err(Error::TaxonomyRead { .. })));
    }
}
