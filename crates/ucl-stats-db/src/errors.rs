use std::path::PathBuf;
use thiserror::Error;

pub type DbResult<T> = Result<T, DbError>;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("CSV error: {0}")]
    Csv(#[from] ucl_stats_csvs::CsvError),

    #[error("Type mismatch in {table}.{column} at data row {row}: '{value}' is not numeric")]
    TypeMismatch {
        table: String,
        column: String,
        row: usize,
        value: String,
    },

    #[error("Table '{table}' was already loaded from {}", .loaded_from.display())]
    DuplicateTable { table: String, loaded_from: PathBuf },
}
