use crate::config::AppConfig;
use crate::error::CliResult;
use ucl_stats_csvs::{preview, scan_csv_dir};

/// Print each CSV file's delimiter, headers and first rows
pub fn execute(config: &AppConfig) -> CliResult<()> {
    let options = config.read_options();

    for entry in scan_csv_dir(&config.csv_dir)? {
        println!("📂 Reading {}", entry.path.display());

        match entry.read(&options) {
            Ok(Some(table)) => {
                println!(
                    "   table: {}, delimiter: {:?}, {} rows x {} columns",
                    entry.table_name,
                    table.delimiter as char,
                    table.row_count(),
                    table.column_count()
                );
                println!("{}", preview(&table, config.preview_rows));
            }
            Ok(None) => println!("⚠️  Empty file\n"),
            Err(e) => println!("❌ {}\n", e),
        }
    }

    Ok(())
}
