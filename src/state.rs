use std::path::{Path, PathBuf};

use crate::chart::builder::{self, BuildStatus, ChartBuild};
use crate::chart::editor::GraphEditor;
use crate::chart::{highlight, ChartModel};
use crate::data::{DataError, DatasetStore};

/// Position of the line chart in [`AppState::charts`].
pub const LINE_CHART: usize = 0;
/// Position of the highlight scatter chart, once a key has been selected.
pub const HIGHLIGHT_CHART: usize = 1;

pub const CHART_NAMES: [&str; 2] = ["Line Chart (Left)", "Scatter Plot (Right)"];

// ---------------------------------------------------------------------------
// Requests – the closed set of dataset-mutating operations
// ---------------------------------------------------------------------------

/// Everything the UI can ask the owning context to do, besides editor
/// submits which go through [`GraphEditor`] directly.
#[derive(Debug, Clone)]
pub enum Request {
    /// Load a CSV as-is.
    Load(PathBuf),
    /// Load a latest-run-first export and reshape it first.
    LoadAndTransform(PathBuf),
    /// Save the active dataset. Empty strings fall back to the source
    /// directory and the derived `(Edited)` name.
    Save { dir: String, name: String },
    /// Highlight the row with this canonical-column value.
    SelectKey(String),
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering. This is the single owning
/// context: every chart and store mutation happens here, on the UI thread;
/// the background builder only ever talks to it through its channel.
#[derive(Default)]
pub struct AppState {
    pub store: DatasetStore,

    /// `charts[LINE_CHART]` is the per-run line chart, `charts[HIGHLIGHT_CHART]`
    /// the highlight scatter once a key is selected.
    pub charts: Vec<ChartModel>,

    /// In-flight background build for the line chart, if any.
    build: Option<ChartBuild>,

    /// Canonical-column values offered in the key selector (header cell
    /// dropped).
    pub keys: Vec<String>,
    pub selected_key: Option<String>,

    pub editor: GraphEditor,
    pub editor_open: bool,

    /// Name typed into the save field, consumed by the next save.
    pub save_name: String,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    /// Dispatch one request; failures land in the status line.
    pub fn handle(&mut self, request: Request) {
        let result = match request {
            Request::Load(path) => self.load(&path, false),
            Request::LoadAndTransform(path) => self.load(&path, true),
            Request::Save { dir, name } => self.save(&dir, &name),
            Request::SelectKey(key) => self.select_key(&key),
        };
        if let Err(e) = result {
            log::error!("{e}");
            self.status_message = Some(e.to_string());
        }
    }

    fn load(&mut self, path: &Path, transform: bool) -> Result<(), DataError> {
        let dataset = if transform {
            self.store.load_and_transform(path)?
        } else {
            self.store.load_raw(path)?
        };
        let name = dataset.name.clone();
        let table = dataset.table.clone();

        let chart = ChartModel::line_chart(&name, &table)?;
        self.charts.clear();
        self.charts.push(chart);
        self.editor = GraphEditor::default();
        self.editor_open = false;
        self.selected_key = None;
        self.status_message = None;

        let column = self.store.column_by_index(0)?;
        self.keys = column.into_iter().skip(1).collect();

        log::info!("loaded dataset '{name}' ({} rows)", table.row_count());
        self.build = Some(builder::spawn(table));
        Ok(())
    }

    fn save(&mut self, dir: &str, name: &str) -> Result<(), DataError> {
        let target = self.store.save(dir, name)?;
        self.status_message = Some(format!("CSV saved to {}", target.display()));
        Ok(())
    }

    fn select_key(&mut self, key: &str) -> Result<(), DataError> {
        let row = self.store.row_by_key(key)?.to_vec();
        let x_label = self
            .charts
            .get(LINE_CHART)
            .map(|c| c.x_axis.label.clone())
            .unwrap_or_default();
        let prior = self
            .charts
            .get(HIGHLIGHT_CHART)
            .and_then(|c| c.series.first());

        let chart = highlight::highlight_chart(&row, &x_label, prior)?;
        if self.charts.len() > HIGHLIGHT_CHART {
            self.charts[HIGHLIGHT_CHART] = chart;
        } else {
            self.charts.push(chart);
        }
        self.selected_key = Some(key.to_string());
        Ok(())
    }

    /// Drain the background build's channel; called once per frame.
    ///
    /// On completion the accumulated points are distributed to the line
    /// chart's series by global index modulo the series count, and the y
    /// axis is fitted to the data.
    pub fn pump_build(&mut self) {
        let status = match &mut self.build {
            Some(build) => build.poll(),
            None => return,
        };
        match status {
            Ok(BuildStatus::InProgress) => {}
            Ok(BuildStatus::Finished) => {
                if let Some(build) = self.build.take() {
                    let points = build.into_points();
                    if let Some(chart) = self.charts.get_mut(LINE_CHART) {
                        builder::distribute(points, &mut chart.series);
                        chart.fit_y_axis();
                    }
                }
            }
            Err(e) => {
                log::error!("chart build failed: {e}");
                self.status_message = Some(e.to_string());
                self.build = None;
            }
        }
    }

    pub fn is_building(&self) -> bool {
        self.build.is_some()
    }

    /// Progress of the in-flight build in `0.0..=1.0`.
    pub fn build_progress(&self) -> f64 {
        self.build.as_ref().map(ChartBuild::progress).unwrap_or(1.0)
    }

    pub fn build_message(&self) -> String {
        self.build
            .as_ref()
            .map(ChartBuild::message)
            .unwrap_or_default()
    }

    /// Names of the charts currently available to the editor.
    pub fn chart_names(&self) -> &[&'static str] {
        &CHART_NAMES[..self.charts.len().min(CHART_NAMES.len())]
    }
}
