/*!
# UCL Stats Reports

Analytical queries over the loaded statistics tables. For every query in the
[`CATALOG`] the runner writes a CSV extract and an SVG bar chart:

```rust,no_run
use std::path::Path;
use ucl_stats_db::StatsDatabase;
use ucl_stats_reports::{run_reports, select_queries, ReportResult};

fn example() -> ReportResult<()> {
    let db = StatsDatabase::open(Path::new("uefa_champions_league_2025.db"))?;
    let summary = run_reports(&db, &select_queries(&[])?, Path::new("charts"))?;
    println!("{} rendered, {} empty", summary.rendered(), summary.empty());
    Ok(())
}
```
*/

pub mod catalog;
pub mod chart;
pub mod errors;
pub mod extract;
pub mod runner;

// Re-export main types for convenience
pub use catalog::{find_query, select_queries, ChartKind, ReportQuery, CATALOG};
pub use chart::{chart_data, render_chart, BarValue, ChartData, CHART_SIZE};
pub use errors::{ReportError, ReportResult};
pub use extract::write_extract;
pub use runner::{run_reports, QueryOutcome, QueryReport, ReportSummary, PREVIEW_ROWS};
