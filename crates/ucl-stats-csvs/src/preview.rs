//! Plain-text previews of loaded CSV tables.

use crate::reader::CsvTable;

const NULL_DISPLAY: &str = "NULL";
const MAX_CELL_WIDTH: usize = 24;

/// Render the headers and first `rows` rows of a table as aligned columns
pub fn preview(table: &CsvTable, rows: usize) -> String {
    let body: Vec<Vec<String>> = table
        .rows
        .iter()
        .take(rows)
        .map(|row| {
            row.iter()
                .map(|cell| cell.as_deref().unwrap_or(NULL_DISPLAY).to_string())
                .collect()
        })
        .collect();

    render_grid(&table.headers, &body)
}

/// Align a header row and body rows into a text grid
pub fn render_grid(headers: &[String], body: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| display_width(h)).collect();
    for row in body {
        for (i, cell) in row.iter().enumerate() {
            if let Some(width) = widths.get_mut(i) {
                *width = (*width).max(display_width(cell));
            }
        }
    }

    let mut out = String::new();
    push_line(&mut out, headers, &widths);
    for row in body {
        push_line(&mut out, row, &widths);
    }
    out
}

fn display_width(cell: &str) -> usize {
    cell.chars().count().min(MAX_CELL_WIDTH)
}

fn push_line(out: &mut String, cells: &[String], widths: &[usize]) {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| {
            let clipped: String = cell.chars().take(MAX_CELL_WIDTH).collect();
            format!("{:<width$}", clipped, width = width)
        })
        .collect();
    out.push_str(line.join("  ").trim_end());
    out.push('\n');
}
