use eframe::egui::Ui;
use egui_plot::{GridMark, Legend, Line, Plot, PlotPoints, Points};

use crate::chart::ChartModel;
use crate::color;

// ---------------------------------------------------------------------------
// Chart rendering
// ---------------------------------------------------------------------------

/// Render one chart model. `scatter` draws markers instead of lines.
pub fn chart_plot(ui: &mut Ui, id: &str, chart: &ChartModel, scatter: bool) {
    ui.vertical(|ui: &mut Ui| {
        ui.strong(&chart.title);

        let mut plot = Plot::new(id.to_string())
            .x_axis_label(&chart.x_axis.label)
            .y_axis_label(&chart.y_axis.label)
            .include_x(chart.x_axis.lower_bound)
            .include_x(chart.x_axis.upper_bound)
            .include_y(chart.y_axis.lower_bound)
            .include_y(chart.y_axis.upper_bound)
            .allow_boxed_zoom(true)
            .allow_drag(true)
            .allow_scroll(true)
            .allow_zoom(true);

        if !scatter {
            plot = plot.legend(Legend::default());
        }

        // The chart model owns the tick positions so the editor's tick
        // overrides show up in the rendered grid.
        plot = plot
            .x_grid_spacer(grid_spacer(
                chart.x_axis.tick_values.clone(),
                chart.x_axis.tick_unit,
            ))
            .y_grid_spacer(grid_spacer(
                chart.y_axis.tick_values.clone(),
                chart.y_axis.tick_unit,
            ));

        plot.show(ui, |plot_ui| {
            let total = chart.series.len();
            for (idx, series) in chart.series.iter().enumerate() {
                let points: PlotPoints = series
                    .points
                    .iter()
                    .map(|p| [p.x, p.y])
                    .collect();
                let color = color::run_color(idx, total);
                if scatter {
                    plot_ui.points(
                        Points::new(points)
                            .name(&series.name)
                            .color(color)
                            .radius(4.0),
                    );
                } else {
                    plot_ui.line(Line::new(points).name(&series.name).color(color).width(1.5));
                }
            }
        });
    });
}

fn grid_spacer(
    ticks: Vec<f64>,
    step: f64,
) -> impl Fn(egui_plot::GridInput) -> Vec<GridMark> + 'static {
    move |_input| {
        let step = if step.is_finite() && step > 0.0 { step } else { 1.0 };
        ticks
            .iter()
            .map(|&value| GridMark {
                value,
                step_size: step,
            })
            .collect()
    }
}
