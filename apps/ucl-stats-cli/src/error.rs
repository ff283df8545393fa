use thiserror::Error;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("{0}")]
    Db(#[from] ucl_stats_db::DbError),

    #[error("{0}")]
    Csvs(#[from] ucl_stats_csvs::CsvError),

    #[error("{0}")]
    Report(#[from] ucl_stats_reports::ReportError),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Logging setup failed: {0}")]
    Logging(String),
}
