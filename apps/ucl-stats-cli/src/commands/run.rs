use crate::commands::{load, report};
use crate::config::AppConfig;
use crate::error::CliResult;
use ucl_stats_db::StatsDatabase;
use ucl_stats_reports::select_queries;

/// Load then report over a single connection
pub fn execute(config: &AppConfig, queries: &[String]) -> CliResult<()> {
    let selected = select_queries(queries)?;

    let mut db = StatsDatabase::open_or_create(&config.database_path)?;
    println!("🔄 Connected to {}", config.database_path.display());

    println!("\n=== Loading CSV files from {} ===\n", config.csv_dir.display());
    load::ingest(&mut db, config)?;

    println!("\n=== Running {} report(s) ===", selected.len());
    report::report(&db, &selected, config)?;

    Ok(())
}
