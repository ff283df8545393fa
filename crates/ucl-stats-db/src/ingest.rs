/*!
# Directory Ingestion

Scan → sniff → read → infer → recreate → insert, for every CSV file in a
directory. Each file is its own unit of work: a failure is logged and recorded,
and the next file is processed.
*/

use crate::{database::StatsDatabase, loader::LoadedTable, DbError, DbResult};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};
use ucl_stats_csvs::{scan_csv_dir, CsvFileEntry, ReadOptions};

/// A file that could not be loaded
#[derive(Debug, Clone, PartialEq)]
pub struct FailedFile {
    pub path: PathBuf,
    pub table_name: String,
    pub error: String,
}

/// Summary of one ingestion run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IngestReport {
    pub loaded: Vec<LoadedTable>,
    /// Files with no header or no data rows
    pub skipped: Vec<PathBuf>,
    pub failed: Vec<FailedFile>,
}

impl IngestReport {
    pub fn total_rows(&self) -> usize {
        self.loaded.iter().map(|t| t.rows).sum()
    }

    pub fn files_seen(&self) -> usize {
        self.loaded.len() + self.skipped.len() + self.failed.len()
    }

    pub fn has_failures(&self) -> bool {
        !self.failed.is_empty()
    }
}

/// Load every CSV file in `dir` into `db`.
///
/// Only an unreadable directory fails the whole run.
pub fn ingest_directory(
    db: &mut StatsDatabase,
    dir: &Path,
    options: &ReadOptions,
) -> DbResult<IngestReport> {
    let scanner = scan_csv_dir(dir)?;
    info!("Found {} CSV file(s) in {}", scanner.len(), dir.display());

    let mut report = IngestReport::default();
    // Table name -> file it was loaded from during this run
    let mut claimed: HashMap<String, PathBuf> = HashMap::new();

    for entry in scanner {
        info!("Processing {}...", entry.file_name());

        let outcome = match claimed.get(&entry.table_name) {
            Some(loaded_from) => Err(DbError::DuplicateTable {
                table: entry.table_name.clone(),
                loaded_from: loaded_from.clone(),
            }),
            None => ingest_file(db, &entry, options),
        };

        match outcome {
            Ok(Some(loaded)) => {
                info!(
                    "Table {} created and filled ({} rows, {} columns)",
                    loaded.table_name,
                    loaded.rows,
                    loaded.schema.columns.len()
                );
                claimed.insert(loaded.table_name.clone(), loaded.source.clone());
                report.loaded.push(loaded);
            }
            Ok(None) => {
                warn!("Skipping {}, no data", entry.file_name());
                report.skipped.push(entry.path);
            }
            Err(e) => {
                error!("Error loading {}: {}", entry.file_name(), e);
                report.failed.push(FailedFile {
                    path: entry.path,
                    table_name: entry.table_name,
                    error: e.to_string(),
                });
            }
        }
    }

    Ok(report)
}

/// Load one entry; `Ok(None)` when there is nothing to load
pub fn ingest_file(
    db: &mut StatsDatabase,
    entry: &CsvFileEntry,
    options: &ReadOptions,
) -> DbResult<Option<LoadedTable>> {
    let Some(table) = entry.read(options)? else {
        return Ok(None);
    };
    if table.is_empty() {
        return Ok(None);
    }

    db.load_table(&table, &entry.table_name).map(Some)
}
