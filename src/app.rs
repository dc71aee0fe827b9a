use eframe::egui;

use crate::state::{AppState, HIGHLIGHT_CHART, LINE_CHART};
use crate::ui::{editor, panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct WaveGraphApp {
    pub state: AppState,
}

impl eframe::App for WaveGraphApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Marshal finished rows from the background build onto this context;
        // this is the only place chart series ever gain points.
        self.state.pump_build();
        if self.state.is_building() {
            ctx.request_repaint();
        }

        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        egui::TopBottomPanel::bottom("bottom_bar").show(ctx, |ui| {
            panels::bottom_bar(ui, &mut self.state);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            if self.state.charts.is_empty() {
                ui.centered_and_justified(|ui: &mut egui::Ui| {
                    ui.heading("Import a CSV to view the runs");
                });
                return;
            }
            ui.columns(2, |cols| {
                if let Some(chart) = self.state.charts.get(LINE_CHART) {
                    plot::chart_plot(&mut cols[0], "line_chart", chart, false);
                }
                if let Some(chart) = self.state.charts.get(HIGHLIGHT_CHART) {
                    plot::chart_plot(&mut cols[1], "highlight_chart", chart, true);
                }
            });
        });

        editor::editor_window(ctx, &mut self.state);
    }
}
