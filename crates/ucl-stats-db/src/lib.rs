/*!
# UCL Stats Database

SQLite storage for the football statistics tables.

## Responsibilities

- **Connection**: [`StatsDatabase`] wraps the single connection used for a run
- **Schema inference**: [`infer_schema`] types each column from the first data
  row (`DOUBLE` for numbers, `VARCHAR(255)` otherwise)
- **Loading**: [`StatsDatabase::load_table`] drops, recreates and fills a table
  in one transaction
- **Ingestion**: [`ingest_directory`] loads a whole directory, recording
  per-file failures instead of aborting
- **Querying**: [`StatsDatabase::query`] materializes a `SELECT` as a
  [`QueryResult`]
*/

pub mod database;
pub mod errors;
pub mod ingest;
pub mod loader;
pub mod query;
pub mod schema;
pub mod value;

// Re-export main types for convenience
pub use database::{quote_identifier, StatsDatabase};
pub use errors::{DbError, DbResult};
pub use ingest::{ingest_directory, ingest_file, FailedFile, IngestReport};
pub use loader::{LoadedTable, MAX_BIND_PARAMS};
pub use query::QueryResult;
pub use schema::{infer_schema, recreate_table, ColumnDef, ColumnType, TableSchema};
pub use value::{parse_number, Value};
