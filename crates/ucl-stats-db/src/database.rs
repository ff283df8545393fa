/*!
# Database Operations

A single SQLite connection shared by loading and reporting. It is opened once
per run and dropped at exit.
*/

use crate::{DbError, DbResult};
use rusqlite::{Connection, OpenFlags};
use std::path::Path;

/// Quote a name for use as an SQL identifier
pub fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Connection wrapper for the statistics database
pub struct StatsDatabase {
    pub(crate) conn: Connection,
}

impl StatsDatabase {
    /// Open an existing database file; a missing file is a connection error
    pub fn open(path: &Path) -> DbResult<Self> {
        if !path.exists() {
            return Err(DbError::Connection(format!(
                "Database file does not exist: {}",
                path.display()
            )));
        }

        let conn = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_WRITE)
            .map_err(|e| DbError::Connection(format!("Failed to open database: {}", e)))?;

        Ok(Self { conn })
    }

    /// Open a database file, creating it if needed
    pub fn open_or_create(path: &Path) -> DbResult<Self> {
        let conn = Connection::open(path).map_err(|e| {
            DbError::Connection(format!(
                "Failed to open or create database {}: {}",
                path.display(),
                e
            ))
        })?;

        Ok(Self { conn })
    }

    /// Create a new, empty in-memory database
    pub fn create_in_memory() -> DbResult<Self> {
        let conn = Connection::open_in_memory().map_err(|e| {
            DbError::Connection(format!("Failed to create in-memory database: {}", e))
        })?;

        Ok(Self { conn })
    }

    /// Get underlying connection for advanced operations
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Names of all user tables, sorted
    pub fn table_names(&self) -> DbResult<Vec<String>> {
        let mut stmt = self.conn.prepare(
            "SELECT name FROM sqlite_master \
             WHERE type = 'table' AND name NOT LIKE 'sqlite_%' \
             ORDER BY name",
        )?;
        let names = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(names)
    }

    pub fn table_exists(&self, table: &str) -> DbResult<bool> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
            [table],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    pub fn row_count(&self, table: &str) -> DbResult<u64> {
        let sql = format!("SELECT COUNT(*) FROM {}", quote_identifier(table));
        let count: i64 = self.conn.query_row(&sql, [], |row| row.get(0))?;
        Ok(count as u64)
    }

    /// Declared `(column, type)` pairs of a table, in column order
    pub fn column_types(&self, table: &str) -> DbResult<Vec<(String, String)>> {
        let sql = format!("PRAGMA table_info({})", quote_identifier(table));
        let mut stmt = self.conn.prepare(&sql)?;
        let columns = stmt
            .query_map([], |row| Ok((row.get::<_, String>(1)?, row.get::<_, String>(2)?)))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(columns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_quote_identifier() {
        assert_eq!(quote_identifier("goals"), "\"goals\"");
        assert_eq!(quote_identifier("we\"ird"), "\"we\"\"ird\"");
    }

    #[test]
    fn test_open_missing_file_is_connection_error() {
        let dir = TempDir::new().unwrap();
        let result = StatsDatabase::open(&dir.path().join("missing.db"));
        assert!(matches!(result, Err(DbError::Connection(_))));
    }

    #[test]
    fn test_open_or_create_then_open() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("stats.db");

        {
            let db = StatsDatabase::open_or_create(&path).unwrap();
            db.connection()
                .execute_batch("CREATE TABLE players_data (player_name TEXT)")
                .unwrap();
        }

        let db = StatsDatabase::open(&path).unwrap();
        assert_eq!(db.table_names().unwrap(), vec!["players_data"]);
        assert!(db.table_exists("players_data").unwrap());
        assert!(!db.table_exists("goals_data").unwrap());
        assert_eq!(db.row_count("players_data").unwrap(), 0);
    }

    #[test]
    fn test_open_or_create_in_missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        let result = StatsDatabase::open_or_create(&dir.path().join("nope/stats.db"));
        assert!(matches!(result, Err(DbError::Connection(_))));
    }
}
