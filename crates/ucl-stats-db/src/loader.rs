/*!
# Bulk Loader

Loads one [`CsvTable`] into its destination table. The drop, create and insert
all run in a single transaction, so a file either lands completely or leaves
the previous table untouched.
*/

use crate::{
    database::StatsDatabase,
    schema::{infer_schema, recreate_table, ColumnType, TableSchema},
    value::parse_number,
    DbError, DbResult,
};
use rusqlite::{params_from_iter, types::Value as SqlValue, Connection};
use std::path::PathBuf;
use tracing::debug;
use ucl_stats_csvs::CsvTable;

/// SQLite's default `SQLITE_MAX_VARIABLE_NUMBER`
pub const MAX_BIND_PARAMS: usize = 32766;

/// Outcome of loading one CSV file
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedTable {
    pub table_name: String,
    pub source: PathBuf,
    pub delimiter: u8,
    pub rows: usize,
    pub schema: TableSchema,
}

impl StatsDatabase {
    /// Recreate `table_name` from `table` and insert all of its rows
    pub fn load_table(&mut self, table: &CsvTable, table_name: &str) -> DbResult<LoadedTable> {
        let schema = infer_schema(table_name, table);

        // Convert first so a bad value never touches the database
        let rows = bind_rows(&schema, table)?;

        let tx = self.conn.transaction()?;
        recreate_table(&tx, &schema)?;
        let inserted = insert_rows(&tx, &schema, &rows)?;
        tx.commit()?;

        Ok(LoadedTable {
            table_name: schema.name.clone(),
            source: table.source.clone(),
            delimiter: table.delimiter,
            rows: inserted,
            schema,
        })
    }
}

/// Turn CSV fields into SQL values according to the column types
fn bind_rows(schema: &TableSchema, table: &CsvTable) -> DbResult<Vec<Vec<SqlValue>>> {
    table
        .rows
        .iter()
        .enumerate()
        .map(|(row_idx, row)| {
            schema
                .columns
                .iter()
                .zip(row)
                .map(|(column, field)| match (column.column_type, field) {
                    (_, None) => Ok(SqlValue::Null),
                    (ColumnType::Text, Some(text)) => Ok(SqlValue::Text(text.clone())),
                    (ColumnType::Numeric, Some(text)) => parse_number(text)
                        .map(SqlValue::Real)
                        .ok_or_else(|| DbError::TypeMismatch {
                            table: schema.name.clone(),
                            column: column.name.clone(),
                            row: row_idx + 1,
                            value: text.clone(),
                        }),
                })
                .collect()
        })
        .collect()
}

/// Insert rows as multi-row statements, as few as the parameter limit allows
fn insert_rows(conn: &Connection, schema: &TableSchema, rows: &[Vec<SqlValue>]) -> DbResult<usize> {
    let width = schema.columns.len();
    if rows.is_empty() || width == 0 {
        return Ok(0);
    }

    let rows_per_statement = (MAX_BIND_PARAMS / width).max(1);
    let mut inserted = 0;

    for chunk in rows.chunks(rows_per_statement) {
        let sql = schema.insert_sql(chunk.len());
        let mut stmt = conn.prepare_cached(&sql)?;
        inserted += stmt.execute(params_from_iter(chunk.iter().flatten()))?;
    }

    debug!(
        "Inserted {} rows into {} in {} statement(s)",
        inserted,
        schema.name,
        rows.len().div_ceil(rows_per_statement)
    );

    Ok(inserted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Value;
    use std::path::Path;
    use ucl_stats_csvs::{read_csv_from_reader, ReadOptions};

    fn csv(data: &str) -> CsvTable {
        read_csv_from_reader(
            data.as_bytes(),
            Path::new("goals_data.csv"),
            b',',
            &ReadOptions::default(),
        )
        .unwrap()
        .unwrap()
    }

    #[test]
    fn test_load_table_inserts_every_row() {
        let mut db = StatsDatabase::create_in_memory().unwrap();
        let table = csv("id_player,player_name,goals\n1,Raphinha,13\n2,Guirassy,13\n3,Kane,11\n");

        let loaded = db.load_table(&table, "goals_data").unwrap();

        assert_eq!(loaded.rows, 3);
        assert_eq!(loaded.table_name, "goals_data");
        assert_eq!(db.row_count("goals_data").unwrap(), 3);
        assert_eq!(
            db.column_types("goals_data").unwrap(),
            vec![
                ("id_player".to_string(), "DOUBLE".to_string()),
                ("player_name".to_string(), "VARCHAR(255)".to_string()),
                ("goals".to_string(), "DOUBLE".to_string()),
            ]
        );
    }

    #[test]
    fn test_missing_values_are_null() {
        let mut db = StatsDatabase::create_in_memory().unwrap();
        let table = csv("id_player,club\n1,Inter\n2,\n,NaN\n");
        db.load_table(&table, "players").unwrap();

        let result = db
            .query("SELECT id_player, club FROM players ORDER BY rowid")
            .unwrap();
        assert_eq!(result.rows[1][1], Value::Null);
        assert_eq!(result.rows[2], vec![Value::Null, Value::Null]);

        let placeholders: i64 = db
            .connection()
            .query_row(
                "SELECT COUNT(*) FROM players WHERE club IN ('', 'NaN', 'None', 'nan')",
                [],
                |r| r.get(0),
            )
            .unwrap();
        assert_eq!(placeholders, 0);
    }

    #[test]
    fn test_text_column_keeps_later_numbers_as_text() {
        let mut db = StatsDatabase::create_in_memory().unwrap();
        let table = csv("shirt\nten\n10\n");
        db.load_table(&table, "shirts").unwrap();

        let result = db.query("SELECT shirt FROM shirts ORDER BY rowid").unwrap();
        assert_eq!(result.rows[1][0], Value::Text("10".to_string()));
    }

    #[test]
    fn test_type_mismatch_rolls_back() {
        let mut db = StatsDatabase::create_in_memory().unwrap();
        db.load_table(&csv("goals\n1\n2\n"), "goals_data").unwrap();

        let err = db
            .load_table(&csv("goals\n5\nmany\n"), "goals_data")
            .unwrap_err();
        match err {
            DbError::TypeMismatch {
                table,
                column,
                row,
                value,
            } => {
                assert_eq!(table, "goals_data");
                assert_eq!(column, "goals");
                assert_eq!(row, 2);
                assert_eq!(value, "many");
            }
            other => panic!("unexpected error: {other}"),
        }

        // Previous contents survive
        assert_eq!(db.row_count("goals_data").unwrap(), 2);
    }

    #[test]
    fn test_large_file_spans_statements() {
        let mut db = StatsDatabase::create_in_memory().unwrap();
        let mut data = String::from("a,b,c\n");
        let rows = MAX_BIND_PARAMS / 3 + 25;
        for i in 0..rows {
            data.push_str(&format!("{},{},x{}\n", i, i * 2, i));
        }

        let loaded = db.load_table(&csv(&data), "wide").unwrap();
        assert_eq!(loaded.rows, rows);
        assert_eq!(db.row_count("wide").unwrap(), rows as u64);
    }
}
