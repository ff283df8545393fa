use thiserror::Error;

pub type ReportResult<T> = Result<T, ReportError>;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Database error: {0}")]
    Db(#[from] ucl_stats_db::DbError),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Chart rendering failed: {0}")]
    Chart(String),

    #[error("Column '{column}' missing from result of '{query}'")]
    MissingColumn { query: String, column: String },

    #[error("Unknown query: {0}")]
    UnknownQuery(String),
}
