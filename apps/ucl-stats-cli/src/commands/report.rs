use crate::config::AppConfig;
use crate::error::CliResult;
use ucl_stats_db::StatsDatabase;
use ucl_stats_reports::{run_reports, select_queries, QueryOutcome, ReportQuery, ReportSummary};

pub fn execute(config: &AppConfig, queries: &[String]) -> CliResult<()> {
    // Unknown names fail before connecting
    let selected = select_queries(queries)?;

    let db = StatsDatabase::open(&config.database_path)?;
    println!("✅ Connected to {}", config.database_path.display());

    report(&db, &selected, config)?;
    Ok(())
}

/// Run the selected queries and print a summary
pub(crate) fn report(
    db: &StatsDatabase,
    selected: &[&ReportQuery],
    config: &AppConfig,
) -> CliResult<ReportSummary> {
    let summary = run_reports(db, selected, &config.output_dir)?;
    print_summary(&summary, config);
    Ok(summary)
}

fn print_summary(summary: &ReportSummary, config: &AppConfig) {
    println!();
    for query in &summary.queries {
        match &query.outcome {
            QueryOutcome::Rendered { rows, chart, .. } => match chart {
                Some(_) => println!("✅ {}: {} rows, chart written", query.name, rows),
                None => println!("✅ {}: {} rows, nothing to plot", query.name, rows),
            },
            QueryOutcome::Empty => println!("⚠️  {}: no data returned", query.name),
            QueryOutcome::Failed(error) => println!("❌ {}: {}", query.name, error),
        }
    }

    println!(
        "\n📊 {} rendered, {} empty, {} failed. Output in {}",
        summary.rendered(),
        summary.empty(),
        summary.failed(),
        config.output_dir.display()
    );
}
