/*!
# UCL Stats CSV Scanning

Everything needed to turn a directory of football-statistics CSV exports into
in-memory tables ready for loading:

- **Scanning**: [`scan_csv_dir`] lists `*.csv` files in name order
- **Sniffing**: [`detect_delimiter`] picks one of `,` `;` tab `|`
- **Headers**: [`normalize_headers`] replaces unnamed cells with `colN` and
  sanitizes names into SQL identifiers
- **Reading**: [`read_csv_table`] yields rows of optional strings, mapping the
  pandas NA markers to `None`

## Usage

```rust,no_run
use ucl_stats_csvs::{scan_csv_dir, CsvResult, ReadOptions};

fn example() -> CsvResult<()> {
    let options = ReadOptions::default();
    for entry in scan_csv_dir("csv")? {
        match entry.read(&options)? {
            Some(table) if !table.is_empty() => {
                println!("{}: {} rows", entry.table_name, table.row_count());
            }
            _ => println!("skipping {}", entry.file_name()),
        }
    }
    Ok(())
}
```
*/

pub mod errors;
pub mod headers;
pub mod preview;
pub mod reader;
pub mod scanner;
pub mod sniff;

// Re-export main types for convenience
pub use errors::{CsvError, CsvResult};
pub use headers::{is_unnamed, normalize_headers, sanitize_identifier};
pub use preview::{preview, render_grid};
pub use reader::{read_csv_from_reader, read_csv_table, CsvTable, ReadOptions, DEFAULT_NULL_MARKERS};
pub use scanner::{scan_csv_dir, table_name_for, CsvFileEntry, CsvScanner};
pub use sniff::{detect_delimiter, sniff_delimiter, DEFAULT_DELIMITER};
