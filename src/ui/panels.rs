use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_extras::DatePickerButton;

use crate::data::model::TradeSide;
use crate::state::{AppState, LoadMode};

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    let dataset = match &state.dataset {
        Some(ds) => ds,
        None => {
            ui.label("No filings loaded.");
            return;
        }
    };

    // Clone what we need so we can mutate state inside the widgets.
    let symbols: Vec<String> = dataset.symbols.iter().cloned().collect();
    let date_span = dataset.date_span;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Ticker symbol multi-select ----
            let n_selected = state.criteria.symbols.len();
            let header_text = format!("Ticker Symbol  ({n_selected}/{})", symbols.len());
            egui::CollapsingHeader::new(RichText::new(header_text).strong())
                .id_salt("symbol_filter")
                .default_open(false)
                .show(ui, |ui: &mut Ui| {
                    ui.horizontal(|ui: &mut Ui| {
                        if ui.small_button("All").clicked() {
                            state.select_all_symbols();
                        }
                        if ui.small_button("None").clicked() {
                            state.clear_symbols();
                        }
                    });

                    for symbol in &symbols {
                        let mut checked = state.criteria.symbols.contains(symbol);
                        if ui.checkbox(&mut checked, symbol).changed() {
                            state.toggle_symbol(symbol);
                        }
                    }
                });
            ui.separator();

            // ---- Owner substring ----
            ui.strong("Owner name contains");
            ui.text_edit_singleline(&mut state.criteria.owner_contains);
            ui.separator();

            // ---- Transaction type ----
            ui.strong("Transaction type");
            egui::ComboBox::from_id_salt("transaction_type")
                .selected_text(side_label(state.criteria.side))
                .show_ui(ui, |ui: &mut Ui| {
                    for side in [None, Some(TradeSide::Buy), Some(TradeSide::Sell)] {
                        if ui
                            .selectable_label(state.criteria.side == side, side_label(side))
                            .clicked()
                        {
                            state.set_side(side);
                        }
                    }
                });
            ui.separator();

            // ---- Date range ----
            ui.strong("Date range");
            match date_span {
                Some((lo, hi)) => {
                    ui.checkbox(&mut state.date_filter_enabled, "Filter by date");
                    if state.date_filter_enabled {
                        let start = state.start_date.get_or_insert(lo);
                        ui.horizontal(|ui: &mut Ui| {
                            ui.label("From");
                            ui.add(DatePickerButton::new(start).id_salt("start_date"));
                        });
                        let end = state.end_date.get_or_insert(hi);
                        ui.horizontal(|ui: &mut Ui| {
                            ui.label("To");
                            ui.add(DatePickerButton::new(end).id_salt("end_date"));
                        });
                    }
                }
                None => {
                    ui.label("No dated filings to filter.");
                }
            }
        });

    // Recompute visible rows after any widget changes.
    state.refilter();
}

fn side_label(side: Option<TradeSide>) -> &'static str {
    match side {
        None => "All",
        Some(TradeSide::Buy) => "Buy",
        Some(TradeSide::Sell) => "Sell",
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open data folder…").clicked() {
                open_folder_dialog(state);
                ui.close_menu();
            }
            if ui.button("Reload").clicked() {
                state.reload();
                ui.close_menu();
            }
        });

        ui.separator();

        if ui
            .selectable_label(state.load_mode == LoadMode::TodayOnly, "Today only")
            .clicked()
        {
            state.toggle_load_mode();
        }

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "Showing {} of {} filings",
                state.visible_indices.len(),
                ds.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Folder dialog
// ---------------------------------------------------------------------------

pub fn open_folder_dialog(state: &mut AppState) {
    let folder = rfd::FileDialog::new()
        .set_title("Open filings data folder")
        .pick_folder();

    if let Some(dir) = folder {
        log::info!("switching data directory to {}", dir.display());
        state.open_data_dir(dir);
    }
}
