use eframe::egui::{Color32, RichText};

use crate::data::model::TradeSide;

// ---------------------------------------------------------------------------
// Buy/Sell cell styling
// ---------------------------------------------------------------------------

/// Background for buy cells.
pub const BUY_BG: Color32 = Color32::from_rgb(0x0a, 0x85, 0x00);
/// Background for sell cells.
pub const SELL_BG: Color32 = Color32::from_rgb(0xcf, 0x0c, 0x0c);

/// Cell colours (background, text) for a trade side.
pub fn side_colors(side: TradeSide) -> (Color32, Color32) {
    match side {
        TradeSide::Buy => (BUY_BG, Color32::WHITE),
        TradeSide::Sell => (SELL_BG, Color32::WHITE),
    }
}

/// Ready-to-render badge for the Buy/Sell column.
pub fn side_badge(side: TradeSide) -> RichText {
    let (bg, fg) = side_colors(side);
    RichText::new(side.to_string())
        .background_color(bg)
        .color(fg)
        .strong()
}
