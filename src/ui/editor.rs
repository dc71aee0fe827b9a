use eframe::egui::{self, Ui};

use crate::chart::editor::{point_label, tick_label, EditorMode};
use crate::state::{AppState, HIGHLIGHT_CHART};

// ---------------------------------------------------------------------------
// "Setting Graph Info" window
// ---------------------------------------------------------------------------

/// Render the graph editor window while it is open.
pub fn editor_window(ctx: &egui::Context, state: &mut AppState) {
    if !state.editor_open {
        return;
    }
    let mut open = true;
    egui::Window::new("Setting Graph Info")
        .open(&mut open)
        .resizable(false)
        .show(ctx, |ui: &mut Ui| {
            ui.label(
                "Text boxes left empty keep whatever the CSV file has labelled. \
                 Only the scatter plot's data points can be changed.",
            );
            ui.separator();

            chart_selector(ui, state);
            ui.separator();

            ui.horizontal(|ui: &mut Ui| {
                ui.label("Graph Title");
                ui.text_edit_singleline(&mut state.editor.title);
                advanced_toggle(ui, state);
            });

            match state.editor.mode() {
                EditorMode::Normal => normal_fields(ui, state),
                EditorMode::AdvancedTicks => tick_fields(ui, state),
            }

            if state.editor.selected() == Some(HIGHLIGHT_CHART) {
                point_fields(ui, state);
            }

            ui.separator();
            if ui.button("Submit").clicked() {
                let outcome = state.editor.submit(&mut state.charts);
                if !outcome.warnings.is_empty() {
                    state.status_message = Some(outcome.warnings.join("; "));
                }
                if outcome.applied {
                    state.editor_open = false;
                }
            }
        });
    if !open {
        state.editor_open = false;
    }
}

fn chart_selector(ui: &mut Ui, state: &mut AppState) {
    let names: Vec<&str> = state.chart_names().to_vec();
    let selected_name = state
        .editor
        .selected()
        .and_then(|i| names.get(i).copied())
        .unwrap_or("Select a chart");

    ui.horizontal(|ui: &mut Ui| {
        egui::ComboBox::from_id_salt("editor_chart")
            .selected_text(selected_name)
            .show_ui(ui, |ui: &mut Ui| {
                for (idx, name) in names.iter().enumerate() {
                    let is_selected = state.editor.selected() == Some(idx);
                    if ui.selectable_label(is_selected, *name).clicked() {
                        state.editor.select_chart(idx, &state.charts);
                    }
                }
            });
        ui.label(format!("Selected: {selected_name}"));
    });
}

fn advanced_toggle(ui: &mut Ui, state: &mut AppState) {
    let mut advanced = state.editor.mode() == EditorMode::AdvancedTicks;
    if ui.checkbox(&mut advanced, "Advanced Changes").changed() {
        let mut warnings = Vec::new();
        state.editor.set_advanced(advanced, &state.charts, &mut warnings);
        if !warnings.is_empty() {
            state.status_message = Some(warnings.join("; "));
        }
    }
}

fn normal_fields(ui: &mut Ui, state: &mut AppState) {
    let editor = &mut state.editor;
    ui.horizontal(|ui: &mut Ui| {
        hinted(ui, &mut editor.x_value.text, "Increment for X-Axis");
        hinted(ui, &mut editor.x_lower.text, "Start X to");
        hinted(ui, &mut editor.x_upper.text, "End X to");
        hinted(ui, &mut editor.x_label, "Title for the X-Axis");
    });
    ui.horizontal(|ui: &mut Ui| {
        hinted(ui, &mut editor.y_value.text, "Increment for Y-Axis");
        hinted(ui, &mut editor.y_lower.text, "Start Y to");
        hinted(ui, &mut editor.y_upper.text, "End Y to");
        hinted(ui, &mut editor.y_label, "Title for the Y-Axis");
    });
}

fn tick_fields(ui: &mut Ui, state: &mut AppState) {
    let x_ticks = state.editor.x_ticks.clone();
    let y_ticks = state.editor.y_ticks.clone();

    ui.horizontal(|ui: &mut Ui| {
        tick_combo(ui, state, "editor_x_tick", "X", &x_ticks, true);
        hinted(ui, &mut state.editor.x_value.text, "Change X-Axis To");
    });
    ui.horizontal(|ui: &mut Ui| {
        tick_combo(ui, state, "editor_y_tick", "Y", &y_ticks, false);
        hinted(ui, &mut state.editor.y_value.text, "Change Y-Axis To");
    });
}

fn tick_combo(
    ui: &mut Ui,
    state: &mut AppState,
    id: &str,
    axis: &str,
    ticks: &[f64],
    is_x: bool,
) {
    let selected = if is_x {
        state.editor.selected_x_tick
    } else {
        state.editor.selected_y_tick
    };
    let selected_text = ticks
        .get(selected)
        .map(|&v| tick_label(axis, v))
        .unwrap_or_default();

    egui::ComboBox::from_id_salt(id.to_string())
        .selected_text(selected_text)
        .show_ui(ui, |ui: &mut Ui| {
            for (idx, &value) in ticks.iter().enumerate() {
                if ui
                    .selectable_label(selected == idx, tick_label(axis, value))
                    .clicked()
                    && idx != selected
                {
                    // Pending text belongs to the previously selected tick.
                    let mut warnings = Vec::new();
                    if is_x {
                        state.editor.stage_x_tick(&mut warnings);
                        state.editor.selected_x_tick = idx;
                    } else {
                        state.editor.stage_y_tick(&mut warnings);
                        state.editor.selected_y_tick = idx;
                    }
                    if !warnings.is_empty() {
                        state.status_message = Some(warnings.join("; "));
                    }
                }
            }
        });
}

fn point_fields(ui: &mut Ui, state: &mut AppState) {
    let Some(chart) = state.charts.get(HIGHLIGHT_CHART) else {
        return;
    };
    let labels: Vec<((usize, usize), String)> = chart
        .series
        .iter()
        .enumerate()
        .flat_map(|(s, series)| {
            series
                .points
                .iter()
                .enumerate()
                .map(move |(p, point)| ((s, p), point_label(point)))
        })
        .collect();

    let selected_text = state
        .editor
        .selected_point
        .and_then(|key| labels.iter().find(|(k, _)| *k == key))
        .map(|(_, label)| label.clone())
        .unwrap_or_else(|| "Select a point".to_string());

    ui.horizontal(|ui: &mut Ui| {
        egui::ComboBox::from_id_salt("editor_point")
            .selected_text(selected_text)
            .show_ui(ui, |ui: &mut Ui| {
                for (key, label) in &labels {
                    let is_selected = state.editor.selected_point == Some(*key);
                    if ui.selectable_label(is_selected, label).clicked() && !is_selected {
                        // Pending text belongs to the previously selected point.
                        let mut warnings = Vec::new();
                        state.editor.stage_point_edit(&mut warnings);
                        state.editor.selected_point = Some(*key);
                        if !warnings.is_empty() {
                            state.status_message = Some(warnings.join("; "));
                        }
                    }
                }
            });
        hinted(ui, &mut state.editor.point_x.text, "Change X-Data to");
        hinted(ui, &mut state.editor.point_y.text, "Change Y-Data to");
    });
}

fn hinted(ui: &mut Ui, text: &mut String, hint: &str) {
    ui.add(
        egui::TextEdit::singleline(text)
            .hint_text(hint)
            .desired_width(120.0),
    );
}
