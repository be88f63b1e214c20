// src/gui/components/mod.rs
pub mod chart;
pub mod data_table;
pub mod filters;
pub mod institutes;
pub mod metrics;

use eframe::egui::Color32;

/// `#RRGGBB` → color; unparseable falls back to black.
pub fn hex_color(hex: &str) -> Color32 {
    Color32::from_hex(hex).unwrap_or(Color32::BLACK)
}
