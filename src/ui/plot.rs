use eframe::egui::{Color32, Stroke, Ui};
use egui_plot::{Legend, Line, Plot, PlotPoints, PlotUi, Polygon};
use replica_viewer::color::Color;
use replica_viewer::figure::{BandSeries, Figure, Series};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Figure plots (central panel)
// ---------------------------------------------------------------------------

/// Render every figure of the last run, stacked vertically.
pub fn figures(ui: &mut Ui, state: &AppState) {
    if state.figures.is_empty() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a folder of run files to plot  (File → Open folder…)");
        });
        return;
    }

    let n = state.figures.len() as f32;
    let spacing = ui.spacing().item_spacing.y;
    let height = ((ui.available_height() - spacing * (n - 1.0)) / n).max(120.0);

    for (handle, figure) in state.figures.iter() {
        figure_plot(ui, handle.0, figure, height);
    }
}

fn figure_plot(ui: &mut Ui, index: usize, figure: &Figure, height: f32) {
    let mut plot = Plot::new(("figure", index))
        .height(height)
        .show_grid(figure.grid)
        .x_axis_label(&figure.x_label)
        .y_axis_label(&figure.y_label)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true);
    if !figure.legend.is_empty() {
        plot = plot.legend(Legend::default());
    }
    if let Some((min, max)) = figure.x_limits {
        plot = plot.include_x(min).include_x(max);
    }

    plot.show(ui, |plot_ui| {
        for series in &figure.series {
            // Unlisted series stay out of the legend.
            let name = if figure.legend.iter().any(|n| n == series.name()) {
                series.name()
            } else {
                ""
            };
            match series {
                Series::Line(line) => {
                    let points: PlotPoints = line.points.iter().copied().collect();
                    plot_ui.line(
                        Line::new(points)
                            .name(name)
                            .color(to_color32(line.color))
                            .width(1.5),
                    );
                }
                Series::Band(band) => draw_band(plot_ui, band, name),
            }
        }
    });
}

/// One quadrilateral per iteration step; egui only fills convex shapes.
fn draw_band(plot_ui: &mut PlotUi, band: &BandSeries, name: &str) {
    let fill = band.color.fill_shade();
    let fill = Color32::from_rgba_unmultiplied(fill.red(), fill.green(), fill.blue(), 160);
    let edge = Stroke::new(1.0, to_color32(band.color));

    for i in 1..band.x.len() {
        let corners = vec![
            [band.x[i - 1], band.lower[i - 1]],
            [band.x[i], band.lower[i]],
            [band.x[i], band.upper[i]],
            [band.x[i - 1], band.upper[i - 1]],
        ];
        plot_ui.polygon(
            Polygon::new(PlotPoints::new(corners))
                .name(name)
                .fill_color(fill)
                .stroke(edge),
        );
    }
}

pub fn to_color32(color: Color) -> Color32 {
    Color32::from_rgb(color.red(), color.green(), color.blue())
}
