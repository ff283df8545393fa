/*!
# Charts

A query result is first reduced to [`ChartData`] (categories, series and bar
heights) according to its [`ChartKind`], then drawn as an SVG bar chart.
Repeated `(category, series)` pairs are averaged; rows without a numeric value
are left out.
*/

use crate::{
    catalog::{ChartKind, ReportQuery},
    errors::{ReportError, ReportResult},
};
use plotters::prelude::*;
use std::collections::BTreeMap;
use std::path::Path;
use ucl_stats_db::{QueryResult, Value};

/// Output image size in pixels
pub const CHART_SIZE: (u32, u32) = (1200, 800);

/// Fraction of each category slot covered by bars
const BAR_SPAN: f64 = 0.8;

/// One bar: mean value of a series at a category
#[derive(Debug, Clone, PartialEq)]
pub struct BarValue {
    pub category: usize,
    pub series: usize,
    pub value: f64,
}

/// Plot-ready form of a query result
#[derive(Debug, Clone, PartialEq)]
pub struct ChartData {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub categories: Vec<String>,
    /// Series names; a single unnamed series means no legend
    pub series: Vec<String>,
    pub bars: Vec<BarValue>,
}

impl ChartData {
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    fn has_legend(&self) -> bool {
        self.series.len() > 1 || self.series.iter().any(|s| !s.is_empty())
    }

    /// Value axis range: always includes zero, padded by 10%
    pub fn y_range(&self) -> (f64, f64) {
        let lo = self.bars.iter().map(|b| b.value).fold(0.0_f64, f64::min);
        let hi = self.bars.iter().map(|b| b.value).fold(0.0_f64, f64::max);
        let span = if hi > lo { hi - lo } else { 1.0 };
        let pad = span / 10.0;

        let bottom = if lo < 0.0 { lo - pad } else { 0.0 };
        (bottom, hi + pad)
    }
}

/// Collects values and averages duplicates
#[derive(Default)]
struct BarAccumulator {
    categories: Vec<String>,
    series: Vec<String>,
    cells: BTreeMap<(usize, usize), (f64, usize)>,
}

impl BarAccumulator {
    fn add(&mut self, category: String, series: &str, value: f64) {
        let category = index_of(&mut self.categories, category);
        let series = index_of(&mut self.series, series.to_string());
        let cell = self.cells.entry((category, series)).or_insert((0.0, 0));
        cell.0 += value;
        cell.1 += 1;
    }

    fn finish(self, title: &str, x_label: &str, y_label: &str) -> ChartData {
        let bars = self
            .cells
            .into_iter()
            .map(|((category, series), (sum, count))| BarValue {
                category,
                series,
                value: sum / count as f64,
            })
            .collect();

        ChartData {
            title: title.to_string(),
            x_label: x_label.to_string(),
            y_label: y_label.to_string(),
            categories: self.categories,
            series: self.series,
            bars,
        }
    }
}

fn index_of(items: &mut Vec<String>, item: String) -> usize {
    match items.iter().position(|existing| *existing == item) {
        Some(idx) => idx,
        None => {
            items.push(item);
            items.len() - 1
        }
    }
}

fn column(query: &ReportQuery, result: &QueryResult, name: &str) -> ReportResult<usize> {
    result
        .column_index(name)
        .ok_or_else(|| ReportError::MissingColumn {
            query: query.name.to_string(),
            column: name.to_string(),
        })
}

/// Reduce a query result to chart data following the query's chart kind
pub fn chart_data(query: &ReportQuery, result: &QueryResult) -> ReportResult<ChartData> {
    let mut acc = BarAccumulator::default();

    match query.chart {
        ChartKind::Bar { x, y } => {
            let (xi, yi) = (column(query, result, x)?, column(query, result, y)?);
            for row in &result.rows {
                if let Some(value) = row[yi].as_f64() {
                    acc.add(row[xi].to_string(), "", value);
                }
            }
            Ok(acc.finish(query.title, x, y))
        }

        ChartKind::GroupedBar { x, y, hue } => {
            let xi = column(query, result, x)?;
            let yi = column(query, result, y)?;
            let hi = column(query, result, hue)?;
            for row in &result.rows {
                if let Some(value) = row[yi].as_f64() {
                    acc.add(row[xi].to_string(), &row[hi].to_string(), value);
                }
            }
            Ok(acc.finish(query.title, x, y))
        }

        ChartKind::Melted {
            id,
            values,
            value_label,
        } => {
            let idi = column(query, result, id)?;
            let value_columns = values
                .iter()
                .map(|name| Ok((*name, column(query, result, name)?)))
                .collect::<ReportResult<Vec<_>>>()?;
            for row in &result.rows {
                for (name, vi) in &value_columns {
                    if let Some(value) = row[*vi].as_f64() {
                        acc.add(row[idi].to_string(), name, value);
                    }
                }
            }
            Ok(acc.finish(query.title, id, value_label))
        }

        ChartKind::Ratio {
            x,
            numerator,
            denominator,
            label,
        } => {
            let xi = column(query, result, x)?;
            let ni = column(query, result, numerator)?;
            let denominator_columns = denominator
                .iter()
                .map(|name| column(query, result, name))
                .collect::<ReportResult<Vec<_>>>()?;
            for row in &result.rows {
                if let Some(value) = ratio(row, ni, &denominator_columns) {
                    acc.add(row[xi].to_string(), "", value);
                }
            }
            Ok(acc.finish(query.title, x, label))
        }
    }
}

/// `row[numerator] / sum(row[denominators])`, `None` if anything is missing or zero
fn ratio(row: &[Value], numerator: usize, denominators: &[usize]) -> Option<f64> {
    let top = row[numerator].as_f64()?;
    let bottom = denominators
        .iter()
        .map(|&i| row[i].as_f64())
        .sum::<Option<f64>>()?;

    (bottom != 0.0).then(|| top / bottom)
}

fn chart_err<E: std::fmt::Display>(e: E) -> ReportError {
    ReportError::Chart(e.to_string())
}

/// Draw `data` as an SVG bar chart at `path`
pub fn render_chart(path: &Path, data: &ChartData) -> ReportResult<()> {
    let root = SVGBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(chart_err)?;

    let n = data.categories.len().max(1);
    let (y_min, y_max) = data.y_range();
    let x_range = -0.5..(n as f64 - 0.5);

    let mut chart = ChartBuilder::on(&root)
        .caption(&data.title, ("sans-serif", 28))
        .margin(20)
        .x_label_area_size(180)
        .y_label_area_size(80)
        .build_cartesian_2d(x_range, y_min..y_max)
        .map_err(chart_err)?;

    let categories = &data.categories;
    let label_for = |x: &f64| {
        let idx = x.round();
        if (x - idx).abs() > 1e-6 || idx < 0.0 {
            return String::new();
        }
        categories.get(idx as usize).cloned().unwrap_or_default()
    };

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(n)
        .x_label_formatter(&label_for)
        .x_label_style(
            ("sans-serif", 14)
                .into_font()
                .transform(FontTransform::Rotate90),
        )
        .x_desc(data.x_label.as_str())
        .y_desc(data.y_label.as_str())
        .draw()
        .map_err(chart_err)?;

    for (series_idx, series_name) in data.series.iter().enumerate() {
        let color = Palette99::pick(series_idx).to_rgba();
        let rects: Vec<_> = data
            .bars
            .iter()
            .filter(|bar| bar.series == series_idx)
            .map(|bar| {
                let (x0, x1) = bar_span(data, bar);
                Rectangle::new([(x0, 0.0), (x1, bar.value)], color.filled())
            })
            .collect();

        let drawn = chart.draw_series(rects).map_err(chart_err)?;
        if data.has_legend() {
            drawn.label(series_name.as_str()).legend(move |(x, y)| {
                Rectangle::new([(x, y - 5), (x + 12, y + 5)], color.filled())
            });
        }
    }

    if data.has_legend() {
        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()
            .map_err(chart_err)?;
    }

    root.present().map_err(chart_err)?;
    Ok(())
}

/// Horizontal extent of a bar, dodged among the series present at its category
fn bar_span(data: &ChartData, bar: &BarValue) -> (f64, f64) {
    let present: Vec<usize> = data
        .bars
        .iter()
        .filter(|b| b.category == bar.category)
        .map(|b| b.series)
        .collect();
    let slot = present.iter().position(|&s| s == bar.series).unwrap_or(0);
    let width = BAR_SPAN / present.len().max(1) as f64;

    let left = bar.category as f64 - BAR_SPAN / 2.0 + slot as f64 * width;
    (left, left + width)
}
