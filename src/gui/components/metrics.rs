// src/gui/components/metrics.rs
//
// One tile per selected candidate: latest smoothed value.

use eframe::egui::{self, RichText};

use super::hex_color;
use crate::specs::rounds::color_for;
use crate::view::{self, Latest};

pub fn draw(ui: &mut egui::Ui, latest: Option<&Latest>, selected: &[&str]) {
    let Some(latest) = latest else {
        ui.weak("No dated polls yet.");
        return;
    };

    ui.weak(format!("as of {}", view::format_date(Some(latest.date))));
    ui.horizontal_wrapped(|ui| {
        for &name in selected {
            let Some(v) = latest.get(name) else { continue };
            ui.group(|ui| {
                ui.vertical(|ui| {
                    ui.label(RichText::new(name).color(hex_color(color_for(name))));
                    ui.label(RichText::new(view::format_pct(Some(v))).size(22.0).strong());
                });
            });
        }
    });
}
