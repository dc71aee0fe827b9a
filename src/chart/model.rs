use crate::data::{DataError, Table};

/// Padding applied around the first/last canonical key on the x axis.
const X_BOUND_MARGIN: f64 = 7.0;

/// Upper limit on generated tick marks, to keep a bad tick unit harmless.
const MAX_TICKS: usize = 1000;

// ---------------------------------------------------------------------------
// Chart value types
// ---------------------------------------------------------------------------

/// One chart point. `tag` names the originating run and is the stable key
/// used when manual x overrides are carried across highlight rebuilds.
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub tag: String,
}

/// An ordered run of points under one display name.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Series {
    pub name: String,
    pub points: Vec<Point>,
}

/// One axis: label, bounds, tick increment and the rendered tick positions.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisSpec {
    pub label: String,
    pub lower_bound: f64,
    pub upper_bound: f64,
    pub tick_unit: f64,
    pub tick_values: Vec<f64>,
}

impl Default for AxisSpec {
    fn default() -> Self {
        let mut axis = AxisSpec {
            label: String::new(),
            lower_bound: 0.0,
            upper_bound: 1.0,
            tick_unit: 0.1,
            tick_values: Vec::new(),
        };
        axis.regenerate_ticks();
        axis
    }
}

impl AxisSpec {
    /// Rebuild `tick_values` from the bounds and tick unit.
    pub fn regenerate_ticks(&mut self) {
        self.tick_values.clear();
        if !(self.tick_unit.is_finite() && self.tick_unit > 0.0) {
            return;
        }
        let mut tick = self.lower_bound;
        while tick <= self.upper_bound && self.tick_values.len() < MAX_TICKS {
            self.tick_values.push(tick);
            tick += self.tick_unit;
        }
    }
}

/// A full chart: title, both axes and the positional series list.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChartModel {
    pub title: String,
    pub x_axis: AxisSpec,
    pub y_axis: AxisSpec,
    pub series: Vec<Series>,
}

impl ChartModel {
    /// Set up the line chart for a canonical table: axis labels from the
    /// `"Name:Label"` header cells, x bounds padded around the first and
    /// last canonical key, and one empty series per run column. Points are
    /// filled in later by the background builder.
    pub fn line_chart(title: &str, table: &Table) -> Result<ChartModel, DataError> {
        table.ensure_rectangular()?;
        let header = table.header();
        if header.len() < 2 {
            return Err(DataError::format(
                "table needs a key column and at least one run column",
            ));
        }
        let data = table.data_rows();
        if data.is_empty() {
            return Err(DataError::format("table has no data rows"));
        }

        let mut x_axis = AxisSpec {
            label: axis_label(&header[0])?.to_string(),
            lower_bound: parse_cell(&data[0][0])? - X_BOUND_MARGIN,
            upper_bound: parse_cell(&data[data.len() - 1][0])? + X_BOUND_MARGIN,
            tick_unit: 0.0,
            tick_values: Vec::new(),
        };
        x_axis.tick_unit = (x_axis.upper_bound - x_axis.lower_bound) / 10.0;
        x_axis.regenerate_ticks();

        let y_axis = AxisSpec {
            label: axis_label(&header[1])?.to_string(),
            ..AxisSpec::default()
        };

        let series = (1..header.len())
            .map(|c| Series {
                name: format!("Run {c}"),
                points: Vec::new(),
            })
            .collect();

        Ok(ChartModel {
            title: title.to_string(),
            x_axis,
            y_axis,
            series,
        })
    }

    /// Refit the y axis to the loaded points, with a little headroom.
    pub fn fit_y_axis(&mut self) {
        let ys = self.series.iter().flat_map(|s| s.points.iter().map(|p| p.y));
        let (mut min, mut max) = (f64::INFINITY, f64::NEG_INFINITY);
        for y in ys {
            min = min.min(y);
            max = max.max(y);
        }
        if min > max {
            return; // no points yet
        }
        let pad = ((max - min) * 0.05).max(f64::EPSILON);
        self.y_axis.lower_bound = min - pad;
        self.y_axis.upper_bound = max + pad;
        self.y_axis.tick_unit = (self.y_axis.upper_bound - self.y_axis.lower_bound) / 10.0;
        self.y_axis.regenerate_ticks();
    }

    pub fn point_count(&self) -> usize {
        self.series.iter().map(|s| s.points.len()).sum()
    }
}

/// Display label for an axis-bearing header cell: the part after the colon
/// in a `"Name:Label"` pair.
pub fn axis_label(header_cell: &str) -> Result<&str, DataError> {
    header_cell
        .split_once(':')
        .map(|(_, label)| label)
        .ok_or_else(|| {
            DataError::format(format!("header cell '{header_cell}' is missing a ':' label"))
        })
}

/// Parse one table cell as a number.
pub fn parse_cell(cell: &str) -> Result<f64, DataError> {
    cell.trim()
        .parse::<f64>()
        .map_err(|_| DataError::format(format!("'{cell}' is not a number")))
}
