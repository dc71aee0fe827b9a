use crate::data::DataError;

use super::model::{parse_cell, AxisSpec, ChartModel, Point, Series};

// ---------------------------------------------------------------------------
// Highlight builder: one selected row across all runs
// ---------------------------------------------------------------------------

/// Build the cross-run series for one selected row: one point per run
/// column, all sharing the row's canonical x, tagged `"Run 1"`, `"Run 2"`…
///
/// When a prior highlight exists, a new point whose tag matches a prior
/// point inherits the prior point's x. That keeps manual per-run x edits
/// alive across re-selection while y always comes from the new row.
pub fn highlight_series(row: &[String], prior: Option<&Series>) -> Result<Series, DataError> {
    let x = parse_cell(&row[0])?;
    let mut series = Series {
        name: row[0].clone(),
        points: Vec::with_capacity(row.len().saturating_sub(1)),
    };
    for c in 1..row.len() {
        series.points.push(Point {
            x,
            y: parse_cell(&row[c])?,
            tag: format!("Run {c}"),
        });
    }

    if let Some(prior) = prior {
        for point in &mut series.points {
            if let Some(old) = prior.points.iter().find(|p| p.tag == point.tag) {
                point.x = old.x;
            }
        }
    }
    Ok(series)
}

/// Wrap a highlight series in its own scatter chart, fitted around the
/// points. `x_label` is the parent line chart's x-axis label.
pub fn highlight_chart(
    row: &[String],
    x_label: &str,
    prior: Option<&Series>,
) -> Result<ChartModel, DataError> {
    let series = highlight_series(row, prior)?;
    let mut chart = ChartModel {
        title: format!("{} {x_label}", row[0]),
        x_axis: AxisSpec::default(),
        y_axis: AxisSpec::default(),
        series: vec![series],
    };
    fit_axis_to_x(&mut chart);
    chart.fit_y_axis();
    Ok(chart)
}

fn fit_axis_to_x(chart: &mut ChartModel) {
    let xs = chart.series.iter().flat_map(|s| s.points.iter().map(|p| p.x));
    let (mut min, mut max) = (f64::INFINITY, f64::NEG_INFINITY);
    for x in xs {
        min = min.min(x);
        max = max.max(x);
    }
    if min > max {
        return;
    }
    let pad = ((max - min) * 0.05).max(1.0);
    chart.x_axis.lower_bound = min - pad;
    chart.x_axis.upper_bound = max + pad;
    chart.x_axis.tick_unit = (chart.x_axis.upper_bound - chart.x_axis.lower_bound) / 10.0;
    chart.x_axis.regenerate_ticks();
}
