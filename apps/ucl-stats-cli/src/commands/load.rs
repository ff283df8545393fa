use crate::config::AppConfig;
use crate::error::CliResult;
use ucl_stats_db::{ingest_directory, IngestReport, StatsDatabase};

pub fn execute(config: &AppConfig) -> CliResult<()> {
    let mut db = StatsDatabase::open_or_create(&config.database_path)?;
    println!(
        "🔄 Connected to {}. Loading CSV files from {}...\n",
        config.database_path.display(),
        config.csv_dir.display()
    );

    ingest(&mut db, config)?;
    Ok(())
}

/// Ingest the configured directory and print a summary
pub(crate) fn ingest(db: &mut StatsDatabase, config: &AppConfig) -> CliResult<IngestReport> {
    let report = ingest_directory(db, &config.csv_dir, &config.read_options())?;
    print_summary(&report);
    Ok(report)
}

fn print_summary(report: &IngestReport) {
    for table in &report.loaded {
        println!(
            "✅ {} ← {} ({} rows, delimiter {:?})",
            table.table_name,
            table.source.display(),
            table.rows,
            table.delimiter as char
        );
    }
    for path in &report.skipped {
        println!("⚠️  Skipped {}, no data", path.display());
    }
    for failed in &report.failed {
        println!("❌ {}: {}", failed.path.display(), failed.error);
    }

    println!("\n📊 Summary:");
    println!("  - Files seen: {}", report.files_seen());
    println!(
        "  - Tables loaded: {} ({} rows)",
        report.loaded.len(),
        report.total_rows()
    );
    println!("  - Skipped: {}", report.skipped.len());
    println!("  - Failed: {}", report.failed.len());

    if report.has_failures() {
        println!("\n⚠️  Some files could not be loaded, see errors above.");
    } else {
        println!("\n🎉 All tables loaded!");
    }
}
