/*!
# Schema Inference & DDL

Column types are decided from the first non-missing value of each column: a
finite number there makes the column `DOUBLE`, anything else makes it
`VARCHAR(255)`, as does a column with no values at all. Later values never
change the decision.
*/

use crate::{database::quote_identifier, value::parse_number, DbResult};
use rusqlite::Connection;
use ucl_stats_csvs::CsvTable;

/// Coarse column type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Numeric,
    Text,
}

impl ColumnType {
    /// Type of a column whose first value is `sample`
    pub fn infer(sample: Option<&str>) -> Self {
        match sample.and_then(parse_number) {
            Some(_) => ColumnType::Numeric,
            None => ColumnType::Text,
        }
    }

    pub fn sql_type(&self) -> &'static str {
        match self {
            ColumnType::Numeric => "DOUBLE",
            ColumnType::Text => "VARCHAR(255)",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDef {
    pub name: String,
    pub column_type: ColumnType,
}

/// Destination table layout for one CSV file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSchema {
    pub name: String,
    pub columns: Vec<ColumnDef>,
}

impl TableSchema {
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn drop_table_sql(&self) -> String {
        format!("DROP TABLE IF EXISTS {}", quote_identifier(&self.name))
    }

    pub fn create_table_sql(&self) -> String {
        let columns: Vec<String> = self
            .columns
            .iter()
            .map(|c| format!("{} {}", quote_identifier(&c.name), c.column_type.sql_type()))
            .collect();

        format!(
            "CREATE TABLE {} ({})",
            quote_identifier(&self.name),
            columns.join(", ")
        )
    }

    /// Multi-row insert with placeholders for `rows` rows
    pub fn insert_sql(&self, rows: usize) -> String {
        let columns: Vec<String> = self
            .columns
            .iter()
            .map(|c| quote_identifier(&c.name))
            .collect();
        let tuple = format!("({})", vec!["?"; self.columns.len()].join(", "));
        let values = vec![tuple.as_str(); rows].join(", ");

        format!(
            "INSERT INTO {} ({}) VALUES {}",
            quote_identifier(&self.name),
            columns.join(", "),
            values
        )
    }
}

/// Derive a table schema from a CSV table's headers and first values
pub fn infer_schema(table_name: &str, table: &CsvTable) -> TableSchema {
    let columns = table
        .headers
        .iter()
        .enumerate()
        .map(|(i, header)| ColumnDef {
            name: header.clone(),
            column_type: ColumnType::infer(first_value(table, i)),
        })
        .collect();

    TableSchema {
        name: table_name.to_string(),
        columns,
    }
}

/// First non-missing value of column `idx`
fn first_value(table: &CsvTable, idx: usize) -> Option<&str> {
    table
        .rows
        .iter()
        .find_map(|row| row.get(idx).and_then(|v| v.as_deref()))
}

/// Drop the table if it exists and create it afresh
pub fn recreate_table(conn: &Connection, schema: &TableSchema) -> DbResult<()> {
    conn.execute(&schema.drop_table_sql(), [])?;
    conn.execute(&schema.create_table_sql(), [])?;
    Ok(())
}
