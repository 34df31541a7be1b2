mod app;
mod color;
mod data;
mod state;
mod ui;

use std::path::PathBuf;

use app::Form4App;
use eframe::egui;

/// Default data directory, relative to the working directory.
const DATA_DIR: &str = "data";

fn main() -> eframe::Result {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([700.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "SEC Form 4 Dashboard",
        options,
        Box::new(|_cc| Ok(Box::new(Form4App::new(PathBuf::from(DATA_DIR))))),
    )
}
