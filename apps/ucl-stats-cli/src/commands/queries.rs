use crate::error::CliResult;
use ucl_stats_reports::CATALOG;

pub fn execute() -> CliResult<()> {
    for query in CATALOG {
        println!(
            "{:<45} {:<12} {}",
            query.name,
            query.chart.describe(),
            query.title
        );
    }
    Ok(())
}
