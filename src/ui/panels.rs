use eframe::egui::{self, Color32, ProgressBar, RichText, Ui};

use crate::state::{AppState, Request, LINE_CHART};

// ---------------------------------------------------------------------------
// Top bar – import, save, key selection
// ---------------------------------------------------------------------------

/// Render the top toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal_wrapped(|ui: &mut Ui| {
        if ui.button("Import & Edit CSV").clicked() {
            if let Some(path) = pick_csv() {
                state.handle(Request::LoadAndTransform(path));
            }
        }
        if ui.button("Import CSV (no Edits)").clicked() {
            if let Some(path) = pick_csv() {
                state.handle(Request::Load(path));
            }
        }

        ui.separator();

        ui.label("Save Name");
        ui.add(
            egui::TextEdit::singleline(&mut state.save_name)
                .hint_text("CSV Name")
                .desired_width(140.0),
        );
        if ui.button("Save CSV To…").clicked() {
            if let Some(dir) = rfd::FileDialog::new()
                .set_title("Choose a Directory")
                .pick_folder()
            {
                let name = std::mem::take(&mut state.save_name);
                state.handle(Request::Save {
                    dir: dir.display().to_string(),
                    name,
                });
            }
        }
        if ui.button("Quick Save CSV").clicked() {
            let name = std::mem::take(&mut state.save_name);
            state.handle(Request::Save {
                dir: String::new(),
                name,
            });
        }

        ui.separator();

        if let Ok(dataset) = state.store.active() {
            ui.label(format!(
                "{} loaded, {} rows",
                dataset.name,
                dataset.table.row_count()
            ));
        }
    });
}

// ---------------------------------------------------------------------------
// Bottom bar – key selector, graph editor, status
// ---------------------------------------------------------------------------

/// Render the bottom bar with the key selector and status line.
pub fn bottom_bar(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal_wrapped(|ui: &mut Ui| {
        let x_label = state
            .charts
            .get(LINE_CHART)
            .map(|c| c.x_axis.label.clone())
            .unwrap_or_default();
        let selected_text = state
            .selected_key
            .clone()
            .unwrap_or_else(|| format!("No {x_label} Selected"));

        let keys = state.keys.clone();
        egui::ComboBox::from_id_salt("key_select")
            .selected_text(selected_text)
            .show_ui(ui, |ui: &mut Ui| {
                for key in &keys {
                    let is_selected = state.selected_key.as_deref() == Some(key.as_str());
                    if ui.selectable_label(is_selected, key).clicked() {
                        state.handle(Request::SelectKey(key.clone()));
                    }
                }
            });

        if ui.button("Change Graph Info").clicked() {
            if state.charts.is_empty() {
                state.status_message = Some("No CSV file loaded, No graph to change".into());
            } else {
                state.editor_open = true;
            }
        }

        ui.separator();

        if state.is_building() {
            ui.add(
                ProgressBar::new(state.build_progress() as f32)
                    .desired_width(160.0)
                    .text(state.build_message()),
            );
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

fn pick_csv() -> Option<std::path::PathBuf> {
    rfd::FileDialog::new()
        .set_title("Open measurement data")
        .add_filter("CSV", &["csv"])
        .pick_file()
}
