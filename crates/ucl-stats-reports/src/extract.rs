use crate::errors::ReportResult;
use csv::Writer;
use std::path::{Path, PathBuf};
use ucl_stats_db::QueryResult;

/// Write a query result to `<dir>/<name>.csv`; nulls become empty fields
pub fn write_extract(dir: &Path, name: &str, result: &QueryResult) -> ReportResult<PathBuf> {
    let path = dir.join(format!("{}.csv", name));
    let mut wtr = Writer::from_path(&path)?;

    wtr.write_record(&result.columns)?;
    for row in &result.rows {
        wtr.write_record(row.iter().map(|value| value.to_string()))?;
    }

    wtr.flush()?;
    Ok(path)
}
