/*!
# Report Runner

Runs catalog queries one after another. Each query is isolated: an SQL error,
an empty result or a rendering failure is logged and recorded, and the runner
moves on to the next query.
*/

use crate::{
    catalog::ReportQuery,
    chart::{chart_data, render_chart},
    errors::ReportResult,
    extract::write_extract,
};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};
use ucl_stats_csvs::render_grid;
use ucl_stats_db::{QueryResult, StatsDatabase};

/// Rows of each result echoed to the log
pub const PREVIEW_ROWS: usize = 10;

#[derive(Debug, Clone, PartialEq)]
pub enum QueryOutcome {
    /// Extract written; `chart` is `None` when nothing was plottable
    Rendered {
        rows: usize,
        extract: PathBuf,
        chart: Option<PathBuf>,
    },
    /// The query returned no rows
    Empty,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct QueryReport {
    pub name: &'static str,
    pub outcome: QueryOutcome,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportSummary {
    pub queries: Vec<QueryReport>,
}

impl ReportSummary {
    pub fn rendered(&self) -> usize {
        self.count(|o| matches!(o, QueryOutcome::Rendered { .. }))
    }

    pub fn empty(&self) -> usize {
        self.count(|o| matches!(o, QueryOutcome::Empty))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, QueryOutcome::Failed(_)))
    }

    pub fn outcome(&self, name: &str) -> Option<&QueryOutcome> {
        self.queries
            .iter()
            .find(|q| q.name == name)
            .map(|q| &q.outcome)
    }

    fn count(&self, pred: impl Fn(&QueryOutcome) -> bool) -> usize {
        self.queries.iter().filter(|q| pred(&q.outcome)).count()
    }
}

/// Run `queries` against `db`, writing extracts and charts into `output_dir`
pub fn run_reports(
    db: &StatsDatabase,
    queries: &[&ReportQuery],
    output_dir: &Path,
) -> ReportResult<ReportSummary> {
    fs::create_dir_all(output_dir)?;

    let mut summary = ReportSummary::default();
    for query in queries {
        info!("=== {} ===", query.name);
        let outcome = run_query(db, query, output_dir);
        summary.queries.push(QueryReport {
            name: query.name,
            outcome,
        });
    }

    Ok(summary)
}

fn run_query(db: &StatsDatabase, query: &ReportQuery, output_dir: &Path) -> QueryOutcome {
    let result = match db.query(query.sql) {
        Ok(result) => result,
        Err(e) => {
            error!("SQL error in '{}': {}", query.name, e);
            return QueryOutcome::Failed(e.to_string());
        }
    };

    if result.is_empty() {
        warn!("No data returned for '{}'", query.name);
        return QueryOutcome::Empty;
    }

    info!("{} row(s)\n{}", result.len(), preview(&result));

    match write_outputs(query, &result, output_dir) {
        Ok(outcome) => outcome,
        Err(e) => {
            error!("Error in '{}': {}", query.name, e);
            QueryOutcome::Failed(e.to_string())
        }
    }
}

fn write_outputs(
    query: &ReportQuery,
    result: &QueryResult,
    output_dir: &Path,
) -> ReportResult<QueryOutcome> {
    let extract = write_extract(output_dir, query.name, result)?;

    let data = chart_data(query, result)?;
    let chart = if data.is_empty() {
        warn!("Nothing to plot for '{}', chart skipped", query.name);
        None
    } else {
        let path = output_dir.join(format!("{}.svg", query.name));
        render_chart(&path, &data)?;
        Some(path)
    };

    Ok(QueryOutcome::Rendered {
        rows: result.len(),
        extract,
        chart,
    })
}

fn preview(result: &QueryResult) -> String {
    let body: Vec<Vec<String>> = result
        .rows
        .iter()
        .take(PREVIEW_ROWS)
        .map(|row| row.iter().map(|v| v.to_string()).collect())
        .collect();
    render_grid(&result.columns, &body)
}
