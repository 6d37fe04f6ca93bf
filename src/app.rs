use eframe::egui;
use rusty_norm::config::AppConfig;

use crate::state::AppState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct RustyNormApp {
    pub state: AppState,
}

impl RustyNormApp {
    pub fn new(config: AppConfig) -> Self {
        Self {
            state: AppState::new(config),
        }
    }
}

impl eframe::App for RustyNormApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Bottom panel: diagnostics of the last run ----
        let has_diagnostics = self
            .state
            .store
            .snapshot()
            .is_some_and(|outcome| !outcome.diagnostics.is_empty());
        if has_diagnostics {
            egui::TopBottomPanel::bottom("diagnostics_panel")
                .resizable(true)
                .default_height(120.0)
                .show(ctx, |ui| {
                    panels::diagnostics_panel(ui, &self.state);
                });
        }

        // ---- Left side panel: inputs and method ----
        egui::SidePanel::left("normalization_panel")
            .default_width(280.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: plot ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::normalized_plot(ui, &self.state);
        });
    }
}
