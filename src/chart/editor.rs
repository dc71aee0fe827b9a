use std::collections::BTreeMap;

use super::model::{ChartModel, Point};

// ---------------------------------------------------------------------------
// Graph editor: one atomic batch of axis/tick/point edits per submit
// ---------------------------------------------------------------------------

/// A numeric entry field. Empty text is the sentinel for "leave unchanged"
/// and is never read as zero.
#[derive(Debug, Clone, Default)]
pub struct NumericField {
    pub text: String,
    accepted: String,
}

impl NumericField {
    /// Parse the field. Empty → `None`. A value that fails to parse pushes a
    /// warning, reverts the text to the last accepted value and drops the
    /// edit; the rest of the batch still applies.
    pub fn value(&mut self, what: &str, warnings: &mut Vec<String>) -> Option<f64> {
        if self.text.is_empty() {
            return None;
        }
        match self.text.trim().parse::<f64>() {
            Ok(v) => {
                self.accepted = self.text.clone();
                Some(v)
            }
            Err(_) => {
                warnings.push(format!(
                    "'{}' is not a valid number for {what}, please reenter a number",
                    self.text
                ));
                self.text = self.accepted.clone();
                None
            }
        }
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }
}

/// Which editing mode the dialog is in. The two modes are mutually
/// exclusive within one submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditorMode {
    /// Axis labels, bounds and tick increments.
    #[default]
    Normal,
    /// Direct overrides of already-rendered tick marks by position index.
    AdvancedTicks,
}

/// Dialog-local state for tests and the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorState {
    Idle,
    ChartSelected(EditorMode),
}

/// Result of one submit.
#[derive(Debug, Default)]
pub struct SubmitOutcome {
    /// False when nothing was applied (no chart selected).
    pub applied: bool,
    /// Recoverable per-field problems; the batch still went through.
    pub warnings: Vec<String>,
}

/// Collects a batch of user edits and applies them to one selected chart on
/// submit. Staged tick and point overrides always refer to the currently
/// selected chart and are discarded when the selection changes.
#[derive(Debug, Default)]
pub struct GraphEditor {
    selected: Option<usize>,
    mode: EditorMode,

    pub title: String,
    pub x_label: String,
    pub y_label: String,
    /// Tick increment in Normal mode, tick value in AdvancedTicks mode.
    pub x_value: NumericField,
    pub y_value: NumericField,
    pub x_lower: NumericField,
    pub x_upper: NumericField,
    pub y_lower: NumericField,
    pub y_upper: NumericField,

    /// Tick snapshot of the selected chart, shown in AdvancedTicks mode.
    pub x_ticks: Vec<f64>,
    pub y_ticks: Vec<f64>,
    pub selected_x_tick: usize,
    pub selected_y_tick: usize,
    staged_x_ticks: BTreeMap<usize, f64>,
    staged_y_ticks: BTreeMap<usize, f64>,

    /// Selected point as (series index, point index) in the selected chart.
    pub selected_point: Option<(usize, usize)>,
    pub point_x: NumericField,
    pub point_y: NumericField,
    staged_point_x: BTreeMap<(usize, usize), f64>,
    staged_point_y: BTreeMap<(usize, usize), f64>,
}

impl GraphEditor {
    pub fn state(&self) -> EditorState {
        match self.selected {
            None => EditorState::Idle,
            Some(_) => EditorState::ChartSelected(self.mode),
        }
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    /// Select the chart to edit. Staged tick/point overrides belong to the
    /// previous selection and are dropped; in AdvancedTicks mode the tick
    /// lists are recomputed from the newly selected chart.
    pub fn select_chart(&mut self, idx: usize, charts: &[ChartModel]) {
        if self.selected == Some(idx) {
            return;
        }
        self.selected = Some(idx);
        self.staged_x_ticks.clear();
        self.staged_y_ticks.clear();
        self.staged_point_x.clear();
        self.staged_point_y.clear();
        self.selected_point = None;
        if self.mode == EditorMode::AdvancedTicks {
            self.reload_ticks(charts);
        }
    }

    /// Toggle advanced tick editing. Turning it off returns to Normal
    /// without discarding unsaved field text.
    pub fn set_advanced(&mut self, on: bool, charts: &[ChartModel], warnings: &mut Vec<String>) {
        if !on {
            self.mode = EditorMode::Normal;
            return;
        }
        if self.selected.is_none() {
            warnings.push("Please select a graph before you check advanced changes".into());
            return;
        }
        self.mode = EditorMode::AdvancedTicks;
        self.reload_ticks(charts);
    }

    fn reload_ticks(&mut self, charts: &[ChartModel]) {
        let Some(chart) = self.selected.and_then(|i| charts.get(i)) else {
            return;
        };
        self.x_ticks = chart.x_axis.tick_values.clone();
        self.y_ticks = chart.y_axis.tick_values.clone();
        self.selected_x_tick = 0;
        self.selected_y_tick = 0;
        self.staged_x_ticks.clear();
        self.staged_y_ticks.clear();
    }

    /// Stage the x-value field for the currently selected X tick.
    pub fn stage_x_tick(&mut self, warnings: &mut Vec<String>) {
        if let Some(v) = self.x_value.value("the X tick", warnings) {
            self.staged_x_ticks.insert(self.selected_x_tick, v);
            self.x_value.clear();
        }
    }

    /// Stage the y-value field for the currently selected Y tick.
    pub fn stage_y_tick(&mut self, warnings: &mut Vec<String>) {
        if let Some(v) = self.y_value.value("the Y tick", warnings) {
            self.staged_y_ticks.insert(self.selected_y_tick, v);
            self.y_value.clear();
        }
    }

    /// Stage whatever sits in the point x/y fields for the selected point.
    pub fn stage_point_edit(&mut self, warnings: &mut Vec<String>) {
        let Some(key) = self.selected_point else {
            return;
        };
        if let Some(v) = self.point_x.value("the point's X", warnings) {
            self.staged_point_x.insert(key, v);
            self.point_x.clear();
        }
        if let Some(v) = self.point_y.value("the point's Y", warnings) {
            self.staged_point_y.insert(key, v);
            self.point_y.clear();
        }
    }

    /// Apply the whole batch to the selected chart.
    ///
    /// With no chart selected nothing is touched and the outcome carries a
    /// warning; the dialog state is unchanged. Otherwise the batch applies
    /// atomically on the owning context: title, point overrides, and either
    /// the Normal-mode axis fields or the staged tick overrides, never both.
    pub fn submit(&mut self, charts: &mut [ChartModel]) -> SubmitOutcome {
        let mut warnings = Vec::new();
        let Some(idx) = self.selected else {
            return SubmitOutcome {
                applied: false,
                warnings: vec!["Please select a chart to change".into()],
            };
        };

        self.stage_point_edit(&mut warnings);
        if self.mode == EditorMode::AdvancedTicks {
            self.stage_x_tick(&mut warnings);
            self.stage_y_tick(&mut warnings);
        }

        let Some(chart) = charts.get_mut(idx) else {
            return SubmitOutcome {
                applied: false,
                warnings: vec![format!("There is no chart at position {idx} loaded")],
            };
        };
        if !self.title.is_empty() {
            chart.title = self.title.clone();
        }

        match self.mode {
            EditorMode::AdvancedTicks => {
                for (&i, &v) in &self.staged_x_ticks {
                    if let Some(tick) = chart.x_axis.tick_values.get_mut(i) {
                        *tick = v;
                    }
                }
                for (&i, &v) in &self.staged_y_ticks {
                    if let Some(tick) = chart.y_axis.tick_values.get_mut(i) {
                        *tick = v;
                    }
                }
            }
            EditorMode::Normal => {
                let mut x_dirty = false;
                if let Some(v) = self.x_value.value("the X-axis increment", &mut warnings) {
                    chart.x_axis.tick_unit = v;
                    x_dirty = true;
                }
                if let Some(v) = self.x_lower.value("the X-axis start", &mut warnings) {
                    chart.x_axis.lower_bound = v;
                    x_dirty = true;
                }
                if let Some(v) = self.x_upper.value("the X-axis end", &mut warnings) {
                    chart.x_axis.upper_bound = v;
                    x_dirty = true;
                }
                if !self.x_label.is_empty() {
                    chart.x_axis.label = self.x_label.clone();
                }
                if x_dirty {
                    chart.x_axis.regenerate_ticks();
                }

                let mut y_dirty = false;
                if let Some(v) = self.y_value.value("the Y-axis increment", &mut warnings) {
                    chart.y_axis.tick_unit = v;
                    y_dirty = true;
                }
                if let Some(v) = self.y_lower.value("the Y-axis start", &mut warnings) {
                    chart.y_axis.lower_bound = v;
                    y_dirty = true;
                }
                if let Some(v) = self.y_upper.value("the Y-axis end", &mut warnings) {
                    chart.y_axis.upper_bound = v;
                    y_dirty = true;
                }
                if !self.y_label.is_empty() {
                    chart.y_axis.label = self.y_label.clone();
                }
                if y_dirty {
                    chart.y_axis.regenerate_ticks();
                }
            }
        }

        for (&(s, p), &v) in &self.staged_point_x {
            if let Some(point) = chart.series.get_mut(s).and_then(|s| s.points.get_mut(p)) {
                point.x = v;
            }
        }
        for (&(s, p), &v) in &self.staged_point_y {
            if let Some(point) = chart.series.get_mut(s).and_then(|s| s.points.get_mut(p)) {
                point.y = v;
            }
        }

        self.reset_after_apply();
        SubmitOutcome {
            applied: true,
            warnings,
        }
    }

    fn reset_after_apply(&mut self) {
        self.title.clear();
        self.x_label.clear();
        self.y_label.clear();
        self.x_value.clear();
        self.y_value.clear();
        self.x_lower.clear();
        self.x_upper.clear();
        self.y_lower.clear();
        self.y_upper.clear();
        self.point_x.clear();
        self.point_y.clear();
        self.staged_x_ticks.clear();
        self.staged_y_ticks.clear();
        self.staged_point_x.clear();
        self.staged_point_y.clear();
    }
}

/// Display identity of a point in the data combo box.
pub fn point_label(point: &Point) -> String {
    format!("({}, {}) {}", point.x, point.y, point.tag)
}

/// Display label for a tick mark entry.
pub fn tick_label(axis: &str, value: f64) -> String {
    format!("{axis} tick at {value}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::model::{AxisSpec, Series};

    fn chart() -> ChartModel {
        let mut x_axis = AxisSpec {
            label: "nm".into(),
            lower_bound: 0.0,
            upper_bound: 100.0,
            tick_unit: 25.0,
            tick_values: Vec::new(),
        };
        x_axis.regenerate_ticks();
        ChartModel {
            title: "scan".into(),
            x_axis,
            y_axis: AxisSpec::default(),
            series: vec![Series {
                name: "Run 1".into(),
                points: vec![
                    Point { x: 10.0, y: 1.0, tag: "Run 1".into() },
                    Point { x: 20.0, y: 2.0, tag: "Run 1".into() },
                ],
            }],
        }
    }

    #[test]
    fn submit_without_a_chart_is_a_warning_and_a_no_op() {
        let mut charts = vec![chart()];
        let before = charts.clone();
        let mut editor = GraphEditor::default();
        assert_eq!(editor.state(), EditorState::Idle);

        let outcome = editor.submit(&mut charts);
        assert!(!outcome.applied);
        assert_eq!(outcome.warnings.len(), 1);
        assert_eq!(charts, before);
        assert_eq!(editor.state(), EditorState::Idle);
    }

    #[test]
    fn all_empty_submit_changes_nothing() {
        let mut charts = vec![chart()];
        let before = charts.clone();
        let mut editor = GraphEditor::default();
        editor.select_chart(0, &charts);

        let outcome = editor.submit(&mut charts);
        assert!(outcome.applied);
        assert!(outcome.warnings.is_empty());
        assert_eq!(charts, before, "empty fields never become zero overrides");
    }

    #[test]
    fn normal_mode_applies_bounds_unit_and_labels() {
        let mut charts = vec![chart()];
        let mut editor = GraphEditor::default();
        editor.select_chart(0, &charts);
        editor.title = "new title".into();
        editor.x_label = "Wavelength (nm)".into();
        editor.x_value.text = "50".into();
        editor.x_lower.text = "0".into();
        editor.x_upper.text = "200".into();

        let outcome = editor.submit(&mut charts);
        assert!(outcome.applied && outcome.warnings.is_empty());
        let x = &charts[0].x_axis;
        assert_eq!(charts[0].title, "new title");
        assert_eq!(x.label, "Wavelength (nm)");
        assert_eq!((x.lower_bound, x.upper_bound, x.tick_unit), (0.0, 200.0, 50.0));
        assert_eq!(x.tick_values, vec![0.0, 50.0, 100.0, 150.0, 200.0]);
    }

    #[test]
    fn bad_field_warns_reverts_and_the_rest_applies() {
        let mut charts = vec![chart()];
        let mut editor = GraphEditor::default();
        editor.select_chart(0, &charts);

        // Accept one value first so there is something to revert to.
        editor.x_lower.text = "5".into();
        editor.submit(&mut charts);
        assert_eq!(charts[0].x_axis.lower_bound, 5.0);

        editor.x_lower.text = "abc".into();
        editor.x_upper.text = "300".into();
        let outcome = editor.submit(&mut charts);
        assert!(outcome.applied);
        assert_eq!(outcome.warnings.len(), 1);
        assert!(outcome.warnings[0].contains("abc"));
        assert_eq!(charts[0].x_axis.lower_bound, 5.0, "bad edit dropped");
        assert_eq!(charts[0].x_axis.upper_bound, 300.0, "rest of the batch applies");
        assert_eq!(editor.x_lower.text, "", "reverted field was cleared on apply");
    }

    #[test]
    fn bad_field_reverts_to_last_accepted_text() {
        let mut warnings = Vec::new();
        let mut field = NumericField::default();
        field.text = "5".into();
        assert_eq!(field.value("x", &mut warnings), Some(5.0));
        field.text = "abc".into();
        assert_eq!(field.value("x", &mut warnings), None);
        assert_eq!(field.text, "5");
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn advanced_mode_overrides_ticks_by_index_only() {
        let mut charts = vec![chart()];
        let mut editor = GraphEditor::default();
        editor.select_chart(0, &charts);

        let mut warnings = Vec::new();
        editor.set_advanced(true, &charts, &mut warnings);
        assert!(warnings.is_empty());
        assert_eq!(editor.state(), EditorState::ChartSelected(EditorMode::AdvancedTicks));
        assert_eq!(editor.x_ticks, vec![0.0, 25.0, 50.0, 75.0, 100.0]);

        editor.selected_x_tick = 2;
        editor.x_value.text = "55".into();
        editor.stage_x_tick(&mut warnings);
        editor.selected_x_tick = 4;
        editor.x_value.text = "99".into();

        // Bounds fields are ignored while tick editing is active.
        editor.x_lower.text = "-1000".into();
        let outcome = editor.submit(&mut charts);
        assert!(outcome.applied && outcome.warnings.is_empty());
        assert_eq!(charts[0].x_axis.tick_values, vec![0.0, 25.0, 55.0, 75.0, 99.0]);
        assert_eq!(charts[0].x_axis.lower_bound, 0.0);
    }

    #[test]
    fn selecting_another_chart_recomputes_ticks_and_drops_staged_edits() {
        let mut second = chart();
        second.x_axis.tick_unit = 10.0;
        second.x_axis.regenerate_ticks();
        let charts = vec![chart(), second];

        let mut editor = GraphEditor::default();
        editor.select_chart(0, &charts);
        let mut warnings = Vec::new();
        editor.set_advanced(true, &charts, &mut warnings);
        editor.x_value.text = "55".into();
        editor.stage_x_tick(&mut warnings);

        editor.select_chart(1, &charts);
        assert_eq!(editor.x_ticks.len(), 11, "tick list comes from the new chart");
        assert!(editor.staged_x_ticks.is_empty(), "stale overrides are dropped");
    }

    #[test]
    fn toggling_advanced_off_keeps_field_text() {
        let charts = vec![chart()];
        let mut editor = GraphEditor::default();
        editor.select_chart(0, &charts);
        let mut warnings = Vec::new();
        editor.set_advanced(true, &charts, &mut warnings);
        editor.x_value.text = "12".into();
        editor.set_advanced(false, &charts, &mut warnings);
        assert_eq!(editor.state(), EditorState::ChartSelected(EditorMode::Normal));
        assert_eq!(editor.x_value.text, "12");
    }

    #[test]
    fn advanced_without_a_chart_warns_and_stays_normal() {
        let charts = vec![chart()];
        let mut editor = GraphEditor::default();
        let mut warnings = Vec::new();
        editor.set_advanced(true, &charts, &mut warnings);
        assert_eq!(warnings.len(), 1);
        assert_eq!(editor.mode(), EditorMode::Normal);
    }

    #[test]
    fn point_overrides_apply_to_the_addressed_point() {
        let mut charts = vec![chart()];
        let mut editor = GraphEditor::default();
        editor.select_chart(0, &charts);
        editor.selected_point = Some((0, 1));
        editor.point_x.text = "21.5".into();

        let outcome = editor.submit(&mut charts);
        assert!(outcome.applied);
        assert_eq!(charts[0].series[0].points[1].x, 21.5);
        assert_eq!(charts[0].series[0].points[1].y, 2.0, "y untouched");
        assert_eq!(charts[0].series[0].points[0].x, 10.0);
    }

    #[test]
    fn point_and_tick_display_labels() {
        let p = Point { x: 1.5, y: 2.0, tag: "Run 3".into() };
        assert_eq!(point_label(&p), "(1.5, 2) Run 3");
        assert_eq!(tick_label("X", 25.0), "X tick at 25");
    }
}
