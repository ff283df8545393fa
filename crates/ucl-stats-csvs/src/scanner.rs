/*!
# CSV Directory Scanner

Lists the `.csv` files of a directory and hands them out one at a time. Nothing
is opened until an entry is read.
*/

use crate::{
    errors::{CsvError, CsvResult},
    headers::sanitize_identifier,
    reader::{read_csv_table, CsvTable, ReadOptions},
    sniff::detect_delimiter,
};
use std::fs;
use std::path::{Path, PathBuf};
use std::vec::IntoIter;

/// A CSV file found in the scanned directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvFileEntry {
    pub path: PathBuf,
    /// Destination table name derived from the file stem
    pub table_name: String,
}

impl CsvFileEntry {
    pub fn new(path: PathBuf) -> Self {
        let table_name = table_name_for(&path);
        Self { path, table_name }
    }

    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Sniff the delimiter and read the file.
    ///
    /// `Ok(None)` means the file has no header row and should be skipped.
    pub fn read(&self, options: &ReadOptions) -> CsvResult<Option<CsvTable>> {
        let delimiter = detect_delimiter(&self.path);
        read_csv_table(&self.path, delimiter, options)
    }
}

/// Table name for a CSV path: lowercased, sanitized file stem
pub fn table_name_for(path: &Path) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    sanitize_identifier(&stem)
}

/// Iterator over the CSV files of one directory, in file-name order
#[derive(Debug)]
pub struct CsvScanner {
    paths: IntoIter<PathBuf>,
}

impl Iterator for CsvScanner {
    type Item = CsvFileEntry;

    fn next(&mut self) -> Option<Self::Item> {
        self.paths.next().map(CsvFileEntry::new)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.paths.size_hint()
    }
}

impl ExactSizeIterator for CsvScanner {}

/// Scan `dir` for regular files with a `csv` extension (any case)
pub fn scan_csv_dir<P: AsRef<Path>>(dir: P) -> CsvResult<CsvScanner> {
    let dir = dir.as_ref();
    if !dir.is_dir() {
        return Err(CsvError::InvalidDirectory(format!(
            "Not a directory: {}",
            dir.display()
        )));
    }

    let mut paths = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && has_csv_extension(&path) {
            paths.push(path);
        }
    }
    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    Ok(CsvScanner {
        paths: paths.into_iter(),
    })
}

fn has_csv_extension(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("csv"))
        .unwrap_or(false)
}
