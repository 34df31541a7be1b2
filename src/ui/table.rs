use eframe::egui::{self, Ui};
use egui_extras::{Column, TableBuilder, TableRow};

use crate::color::side_badge;
use crate::data::model::{format_grouped, FilingRecord, DISPLAY_COLUMNS};
use crate::state::AppState;

const TIMESTAMP_DISPLAY: &str = "%Y-%m-%d %H:%M:%S";

// ---------------------------------------------------------------------------
// Filings table (central panel)
// ---------------------------------------------------------------------------

/// Render the filtered filings in the central panel.
pub fn filings_table(ui: &mut Ui, state: &AppState) {
    let dataset = match &state.dataset {
        Some(ds) => ds,
        None => {
            let message = state
                .status_message
                .clone()
                .unwrap_or_else(|| "Open a data folder to view filings  (File → Open data folder…)".to_string());
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading(message);
            });
            return;
        }
    };

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
        .columns(Column::auto().at_least(60.0), DISPLAY_COLUMNS.len() - 1)
        .column(Column::remainder())
        .header(22.0, |mut header| {
            for title in DISPLAY_COLUMNS {
                header.col(|ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|body| {
            body.rows(20.0, state.visible_indices.len(), |mut row| {
                let record = &dataset.records[state.visible_indices[row.index()]];
                filing_row(&mut row, record);
            });
        });
}

/// One table row, cells in [`DISPLAY_COLUMNS`] order. Shares and Price are
/// formatted for display here; the dataset keeps them numeric.
fn filing_row(row: &mut TableRow<'_, '_>, record: &FilingRecord) {
    row.col(|ui| {
        ui.label(&record.issuer);
    });
    row.col(|ui| {
        ui.label(record.symbol.as_deref().unwrap_or(""));
    });
    row.col(|ui| {
        ui.label(record.owner.as_deref().unwrap_or(""));
    });
    row.col(|ui| {
        ui.label(format_grouped(record.shares));
    });
    row.col(|ui| {
        ui.label(format_grouped(record.price));
    });
    row.col(|ui| {
        ui.label(side_badge(record.side));
    });
    row.col(|ui| {
        let shown = record
            .timestamp
            .map(|t| t.format(TIMESTAMP_DISPLAY).to_string())
            .unwrap_or_default();
        ui.label(shown);
    });
    row.col(|ui| {
        ui.label(&record.title);
    });
    row.col(|ui| {
        ui.label(&record.transaction_code);
    });
    row.col(|ui| {
        if !record.source_url.is_empty() {
            ui.hyperlink(&record.source_url);
        }
    });
}
