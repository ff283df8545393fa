/*!
# CSV Reading

Reads a delimited file into a [`CsvTable`]: normalized headers plus rows of
optional strings, where `None` marks a missing value. Values stay as text here;
typing is left to the loader.
*/

use crate::{
    errors::{CsvError, CsvResult},
    headers::normalize_headers,
};
use csv::{ReaderBuilder, Trim};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Field values treated as missing (the pandas default NA set)
pub const DEFAULT_NULL_MARKERS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

const UTF8_BOM: char = '\u{feff}';

/// Options controlling how field values are read
#[derive(Debug, Clone, PartialEq)]
pub struct ReadOptions {
    /// Exact (post-trim) field values that become `None`
    pub null_markers: Vec<String>,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            null_markers: DEFAULT_NULL_MARKERS.iter().map(|m| m.to_string()).collect(),
        }
    }
}

impl ReadOptions {
    pub fn is_null(&self, field: &str) -> bool {
        self.null_markers.iter().any(|marker| marker == field)
    }
}

/// A CSV file read into memory
#[derive(Debug, Clone, PartialEq)]
pub struct CsvTable {
    pub source: PathBuf,
    pub delimiter: u8,
    /// Normalized, identifier-safe column names
    pub headers: Vec<String>,
    /// Header cells as they appeared in the file
    pub raw_headers: Vec<String>,
    /// Data rows, each exactly `headers.len()` long
    pub rows: Vec<Vec<Option<String>>>,
}

impl CsvTable {
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// No headers or no data rows: nothing worth loading
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty() || self.rows.is_empty()
    }
}

/// Read the CSV file at `path` with the given delimiter.
///
/// Returns `Ok(None)` for a file without a header row.
pub fn read_csv_table<P: AsRef<Path>>(
    path: P,
    delimiter: u8,
    options: &ReadOptions,
) -> CsvResult<Option<CsvTable>> {
    let path = path.as_ref();
    let file = File::open(path)?;
    read_csv_from_reader(file, path, delimiter, options)
}

/// Same as [`read_csv_table`] for any reader; `source` is recorded on the table.
pub fn read_csv_from_reader<R: Read>(
    reader: R,
    source: &Path,
    delimiter: u8,
    options: &ReadOptions,
) -> CsvResult<Option<CsvTable>> {
    let mut rdr = ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let mut raw_headers: Vec<String> = rdr
        .byte_headers()?
        .iter()
        .map(|h| String::from_utf8_lossy(h).into_owned())
        .collect();

    if raw_headers.is_empty() {
        return Ok(None);
    }
    if let Some(first) = raw_headers.first_mut() {
        if first.starts_with(UTF8_BOM) {
            *first = first.trim_start_matches(UTF8_BOM).trim().to_string();
        }
    }

    let headers = normalize_headers(raw_headers.iter().map(String::as_str));
    let width = headers.len();

    let mut rows = Vec::new();
    for result in rdr.byte_records() {
        let record = result?;
        if record.len() > width {
            let line = record.position().map(|p| p.line()).unwrap_or(0);
            return Err(CsvError::MalformedRow {
                line,
                expected: width,
                found: record.len(),
            });
        }

        let mut row: Vec<Option<String>> = record
            .iter()
            .map(|field| {
                let field = String::from_utf8_lossy(field);
                if options.is_null(&field) {
                    None
                } else {
                    Some(field.into_owned())
                }
            })
            .collect();
        row.resize(width, None);
        rows.push(row);
    }

    Ok(Some(CsvTable {
        source: source.to_path_buf(),
        delimiter,
        headers,
        raw_headers,
        rows,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn read_str(data: &str, delimiter: u8) -> CsvResult<Option<CsvTable>> {
        read_csv_from_reader(
            data.as_bytes(),
            Path::new("test.csv"),
            delimiter,
            &ReadOptions::default(),
        )
    }

    #[test]
    fn test_reads_headers_and_rows() {
        let table = read_str("id_player;Player Name;goals\n1;Raphinha;13\n2;Guirassy;13\n", b';')
            .unwrap()
            .unwrap();

        assert_eq!(table.headers, vec!["id_player", "player_name", "goals"]);
        assert_eq!(table.raw_headers[1], "Player Name");
        assert_eq!(table.row_count(), 2);
        assert_eq!(
            table.rows[0],
            vec![
                Some("1".to_string()),
                Some("Raphinha".to_string()),
                Some("13".to_string())
            ]
        );
    }

    #[test]
    fn test_missing_values_become_none() {
        let table = read_str("a,b,c\n1,,NaN\nN/A, x ,null\n", b',')
            .unwrap()
            .unwrap();

        assert_eq!(table.rows[0], vec![Some("1".to_string()), None, None]);
        assert_eq!(table.rows[1], vec![None, Some("x".to_string()), None]);
    }

    #[test]
    fn test_custom_null_markers() {
        let options = ReadOptions {
            null_markers: vec!["-".to_string()],
        };
        let table = read_csv_from_reader(
            "a,b\n-,NA\n".as_bytes(),
            Path::new("t.csv"),
            b',',
            &options,
        )
        .unwrap()
        .unwrap();

        assert_eq!(table.rows[0], vec![None, Some("NA".to_string())]);
    }

    #[test]
    fn test_short_rows_are_padded() {
        let table = read_str("a,b,c\n1\n", b',').unwrap().unwrap();
        assert_eq!(table.rows[0], vec![Some("1".to_string()), None, None]);
    }

    #[test]
    fn test_long_rows_are_malformed() {
        let err = read_str("a,b\n1,2\n1,2,3\n", b',').unwrap_err();
        match err {
            CsvError::MalformedRow {
                line,
                expected,
                found,
            } => {
                assert_eq!(line, 3);
                assert_eq!(expected, 2);
                assert_eq!(found, 3);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_input() {
        assert!(read_str("", b',').unwrap().is_none());

        let header_only = read_str("a,b\n", b',').unwrap().unwrap();
        assert!(header_only.is_empty());
        assert_eq!(header_only.column_count(), 2);
    }

    #[test]
    fn test_bom_is_stripped() {
        let table = read_str("\u{feff}id,name\n1,x\n", b',').unwrap().unwrap();
        assert_eq!(table.headers[0], "id");
    }

    #[test]
    fn test_read_csv_table_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "club\tage").unwrap();
        writeln!(file, "Inter\t29.4").unwrap();

        let table = read_csv_table(file.path(), b'\t', &ReadOptions::default())
            .unwrap()
            .unwrap();
        assert_eq!(table.source, file.path());
        assert_eq!(table.delimiter, b'\t');
        assert_eq!(table.headers, vec!["club", "age"]);
        assert_eq!(table.rows.len(), 1);
    }
}
