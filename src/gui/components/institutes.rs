// src/gui/components/institutes.rs
use eframe::egui::{self, Align2, FontId, Pos2, Rect, Sense, vec2};

use super::hex_color;
use crate::config::consts::INSTITUTE_BAR_COLOR;

const ROW: f32 = 18.0;
const LABEL_W: f32 = 160.0;

/// Horizontal bar per institute, longest on top.
pub fn draw(ui: &mut egui::Ui, counts: &[(String, usize)]) {
    let Some(max) = counts.iter().map(|(_, n)| *n).max() else {
        ui.weak("No institutes.");
        return;
    };

    let size = vec2(ui.available_width(), ROW * counts.len() as f32);
    let (response, painter) = ui.allocate_painter(size, Sense::hover());
    let rect = response.rect;
    let text = ui.visuals().text_color();
    let font = FontId::proportional(12.0);
    let bar = hex_color(INSTITUTE_BAR_COLOR);
    let span = (rect.width() - LABEL_W - 40.0).max(10.0);

    for (i, (name, n)) in counts.iter().enumerate() {
        let top = rect.top() + i as f32 * ROW;
        let mid = top + ROW / 2.0;
        painter.text(Pos2::new(rect.left() + LABEL_W - 6.0, mid), Align2::RIGHT_CENTER, name, font.clone(), text);

        let w = span * (*n as f32 / max as f32);
        let x0 = rect.left() + LABEL_W;
        painter.rect_filled(Rect::from_min_size(Pos2::new(x0, top + 2.0), vec2(w, ROW - 4.0)), 2.0, bar);
        painter.text(Pos2::new(x0 + w + 4.0, mid), Align2::LEFT_CENTER, n.to_string(), font.clone(), text);
    }
}
