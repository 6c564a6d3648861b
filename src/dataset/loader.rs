//! CSV loading.
//!
//! The whole file is read into memory before parsing. Columns are matched
//! by header name, so extra columns are ignored and column order does not
//! matter.

use super::LoadError;
use crate::models::{RawRecord, COLUMNS};
use csv::{ReaderBuilder, StringRecord, Trim};
use std::path::Path;
use tracing::{debug, info};

/// Column that identifies a repository. A dataset without it cannot be
/// deduplicated and is rejected.
const ID_COLUMN: &str = "repositories";

/// Reject header rows that cannot describe the dataset.
fn check_headers(headers: &StringRecord) -> Result<(), LoadError> {
    if headers.iter().all(|h| h.is_empty()) {
        return Err(LoadError::MissingHeader);
    }

    if !headers.iter().any(|h| h == ID_COLUMN) {
        return Err(LoadError::MissingColumn(ID_COLUMN));
    }

    for column in COLUMNS {
        if !headers.iter().any(|h| h == column) {
            debug!("Column `{}` not present, values default to empty", column);
        }
    }

    Ok(())
}

/// Read and parse a dataset file.
pub fn load_dataset(path: &Path) -> Result<Vec<RawRecord>, LoadError> {
    info!("Loading dataset from {}", path.display());

    let bytes = std::fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    parse_csv(&bytes)
}

/// Parse CSV bytes into raw rows.
///
/// Rows may be shorter or longer than the header; missing cells become
/// empty strings.
pub fn parse_csv(data: &[u8]) -> Result<Vec<RawRecord>, LoadError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::Headers)
        .from_reader(data);

    let headers = reader.headers()?.clone();
    check_headers(&headers)?;

    let mut rows = Vec::new();
    for result in reader.records() {
        let mut record = result?;
        // Deserializing needs a cell for every header
        while record.len() < headers.len() {
            record.push_field("");
        }
        rows.push(record.deserialize::<RawRecord>(Some(&headers))?);
    }

    debug!("Parsed {} raw rows", rows.len());
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const HEADER: &str =
        "repositories,stars_count,forks_count,issues_count,pull_requests,contributors,language";

    #[test]
    fn test_parse_basic_rows() {
        let data = format!("{HEADER}\nowner/a,10,2,5,1,3,Rust\nowner/b,NULL,x,7,0,NULL,NULL\n");
        let rows = parse_csv(data.as_bytes()).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].repositories, "owner/a");
        assert_eq!(rows[0].stars_count, "10");
        assert_eq!(rows[0].language, "Rust");
        assert_eq!(rows[1].contributors, "NULL");
        assert_eq!(rows[1].forks_count, "x");
    }

    #[test]
    fn test_parse_reordered_and_extra_columns() {
        let data = "language,extra,repositories,stars_count\nGo,zzz,owner/c,42\n";
        let rows = parse_csv(data.as_bytes()).unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].repositories, "owner/c");
        assert_eq!(rows[0].stars_count, "42");
        assert_eq!(rows[0].language, "Go");
        assert_eq!(rows[0].issues_count, "");
    }

    #[test]
    fn test_parse_short_row() {
        let data = format!("{HEADER}\nowner/a,10\n");
        let rows = parse_csv(data.as_bytes()).unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].stars_count, "10");
        assert_eq!(rows[0].forks_count, "");
        assert_eq!(rows[0].language, "");
    }

    #[test]
    fn test_parse_padded_headers() {
        let data = " repositories , stars_count ,language\nowner/d,3,Zig\n";
        let rows = parse_csv(data.as_bytes()).unwrap();

        assert_eq!(rows[0].repositories, "owner/d");
        assert_eq!(rows[0].stars_count, "3");
        assert_eq!(rows[0].language, "Zig");
    }

    #[test]
    fn test_parse_header_only() {
        let rows = parse_csv(HEADER.as_bytes()).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_empty_input_is_missing_header() {
        let err = parse_csv(b"").unwrap_err();
        assert!(matches!(err, LoadError::MissingHeader));
    }

    #[test]
    fn test_missing_id_column() {
        let err = parse_csv(b"name,stars_count\nfoo,1\n").unwrap_err();
        assert!(matches!(err, LoadError::MissingColumn("repositories")));
    }

    #[test]
    fn test_load_dataset_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{HEADER}").unwrap();
        writeln!(file, "owner/a,1,2,3,4,5,Python").unwrap();

        let rows = load_dataset(file.path()).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].language, "Python");
    }

    #[test]
    fn test_load_dataset_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_dataset(&dir.path().join("missing.csv")).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
        assert!(err.to_string().contains("missing.csv"));
    }
}
