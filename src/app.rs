use std::path::PathBuf;

use eframe::egui;

use crate::state::AppState;
use crate::ui::{panels, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct Form4App {
    pub state: AppState,
}

impl Form4App {
    /// Build the app and run the initial session load from `data_dir`.
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            state: AppState::new(data_dir),
        }
    }
}

impl eframe::App for Form4App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar, counts, status ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: filings table ----
        egui::CentralPanel::default().show(ctx, |ui| {
            table::filings_table(ui, &self.state);
        });
    }
}
