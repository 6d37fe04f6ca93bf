use eframe::egui::Ui;
use egui_plot::{Legend, Line, Plot, PlotPoints};

use crate::color::series_palette;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Normalized plot (central panel)
// ---------------------------------------------------------------------------

/// Overlay of every normalized series in the stored outcome.
pub fn normalized_plot(ui: &mut Ui, state: &AppState) {
    let outcome = match state.store.snapshot() {
        Some(outcome) if !outcome.result.is_empty() => outcome,
        _ => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading("Add files and press Apply to plot normalized data");
            });
            return;
        }
    };

    let colors = series_palette(outcome.result.len());

    Plot::new("normalized_plot")
        .legend(Legend::default())
        .x_axis_label(state.x_label.as_str())
        .y_axis_label(state.y_label.as_str())
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for ((path, signal), color) in outcome.result.iter().zip(colors) {
                let stem = path
                    .file_stem()
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string());

                let points: PlotPoints = signal.points().collect();
                let line = Line::new(points)
                    .name(format!("{stem}_normalized"))
                    .color(color)
                    .width(1.5);

                plot_ui.line(line);
            }
        });
}
