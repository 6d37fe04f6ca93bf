mod app;
mod color;
mod state;
mod ui;

use std::path::Path;

use app::RustyNormApp;
use eframe::egui;
use rusty_norm::config::{AppConfig, CONFIG_FILE_NAME};

fn main() -> eframe::Result {
    env_logger::init();

    let config = AppConfig::load_or_default(Path::new(CONFIG_FILE_NAME));

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Rusty Norm – Spectral Normalization",
        options,
        Box::new(|_cc| Ok(Box::new(RustyNormApp::new(config)))),
    )
}
