use crate::{database::StatsDatabase, value::Value, DbResult};

/// Materialized result of a `SELECT`
#[derive(Debug, Clone, PartialEq, Default)]
pub struct QueryResult {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

impl QueryResult {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Values of the named column, top to bottom
    pub fn column(&self, name: &str) -> Option<Vec<&Value>> {
        let idx = self.column_index(name)?;
        Some(self.rows.iter().map(|row| &row[idx]).collect())
    }
}

impl StatsDatabase {
    /// Run a query and collect every row
    pub fn query(&self, sql: &str) -> DbResult<QueryResult> {
        let mut stmt = self.conn.prepare(sql)?;
        let columns: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();
        let width = columns.len();

        let rows = stmt
            .query_map([], |row| {
                (0..width)
                    .map(|i| row.get_ref(i).map(Value::from))
                    .collect::<Result<Vec<_>, _>>()
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(QueryResult { columns, rows })
    }

    /// Every row of a table in insertion order
    pub fn table_rows(&self, table: &str) -> DbResult<QueryResult> {
        self.query(&format!(
            "SELECT * FROM {} ORDER BY rowid",
            crate::database::quote_identifier(table)
        ))
    }
}
