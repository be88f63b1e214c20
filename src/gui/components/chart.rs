// src/gui/components/chart.rs
//
// Minimal time chart on the egui painter. One code path for every round and
// candidate count: callers hand in layers of traces and a style per layer.

use chrono::NaiveDate;
use eframe::egui::{self, Align2, Color32, FontId, Pos2, Rect, Sense, Shape, Stroke, StrokeKind, vec2};

use super::hex_color;
use crate::config::consts::MAJORITY_LINE;
use crate::view::{self, Trace};

const HEIGHT: f32 = 280.0;
const LEFT: f32 = 40.0;
const BOTTOM: f32 = 20.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Style {
    LinesAndMarkers,
    /// Raw points behind a smoothed line.
    FaintMarkers,
    Lines,
}

pub struct Layer<'a> {
    pub traces: &'a [Trace],
    pub style: Style,
}

struct Frame {
    plot: Rect,
    x0: NaiveDate,
    days: f32,
    y_max: f32,
}

impl Frame {
    fn to_screen(&self, date: NaiveDate, v: f64) -> Pos2 {
        let dx = (date - self.x0).num_days() as f32;
        let tx = if self.days > 0.0 { dx / self.days } else { 0.5 };
        let ty = (v as f32 / self.y_max).clamp(0.0, 1.0);
        Pos2::new(
            self.plot.left() + tx * self.plot.width(),
            self.plot.bottom() - ty * self.plot.height(),
        )
    }
}

pub fn draw(ui: &mut egui::Ui, id: &str, layers: &[Layer<'_>]) {
    ui.push_id(id, |ui| draw_plot(ui, layers));
}

fn draw_plot(ui: &mut egui::Ui, layers: &[Layer<'_>]) {
    legend(ui, layers);

    let all = || layers.iter().flat_map(|l| l.traces.iter()).flat_map(|t| t.points.iter());
    let (Some(x0), Some(x1)) = (all().map(|p| p.0).min(), all().map(|p| p.0).max()) else {
        ui.weak("No data for this selection.");
        return;
    };
    let v_max = all().map(|p| p.1).fold(MAJORITY_LINE, f64::max);
    let y_max = ((v_max / 10.0).ceil() * 10.0).max(10.0) as f32;

    let (response, painter) = ui.allocate_painter(vec2(ui.available_width(), HEIGHT), Sense::hover());
    let rect = response.rect;
    let plot = Rect::from_min_max(rect.min + vec2(LEFT, 6.0), rect.max - vec2(8.0, BOTTOM));
    let frame = Frame { plot, x0, days: (x1 - x0).num_days() as f32, y_max };

    let text_color = ui.visuals().weak_text_color();
    let grid = Stroke::new(0.5, ui.visuals().widgets.noninteractive.bg_stroke.color);
    let font = FontId::proportional(10.0);

    painter.rect_stroke(plot, 0.0, grid, StrokeKind::Inside);

    // y grid every 10 points
    let mut y = 0.0f32;
    while y <= y_max {
        let sy = frame.to_screen(x0, f64::from(y)).y;
        painter.hline(plot.x_range(), sy, grid);
        painter.text(Pos2::new(plot.left() - 4.0, sy), Align2::RIGHT_CENTER, format!("{y:.0}%"), font.clone(), text_color);
        y += 10.0;
    }

    // x labels: first, last
    painter.text(Pos2::new(plot.left(), plot.bottom() + 3.0), Align2::LEFT_TOP, view::format_date(Some(x0)), font.clone(), text_color);
    if x1 != x0 {
        painter.text(Pos2::new(plot.right(), plot.bottom() + 3.0), Align2::RIGHT_TOP, view::format_date(Some(x1)), font.clone(), text_color);
    }

    // absolute majority
    let my = frame.to_screen(x0, MAJORITY_LINE).y;
    painter.extend(Shape::dashed_line(
        &[Pos2::new(plot.left(), my), Pos2::new(plot.right(), my)],
        Stroke::new(1.0, Color32::RED),
        6.0,
        4.0,
    ));

    for layer in layers {
        for trace in layer.traces {
            let color = hex_color(trace.color);
            let pts: Vec<Pos2> = trace.points.iter().map(|&(d, v)| frame.to_screen(d, v)).collect();
            match layer.style {
                Style::LinesAndMarkers => {
                    painter.add(Shape::line(pts.clone(), Stroke::new(1.5, color)));
                    for p in pts { painter.circle_filled(p, 3.5, color); }
                }
                Style::FaintMarkers => {
                    let faint = color.gamma_multiply(0.3);
                    for p in pts { painter.circle_filled(p, 2.5, faint); }
                }
                Style::Lines => {
                    painter.add(Shape::line(pts, Stroke::new(2.0, color)));
                }
            }
        }
    }

    if let Some(pos) = response.hover_pos() {
        hover_readout(&painter, &frame, layers, pos, &font);
    }
}

fn legend(ui: &mut egui::Ui, layers: &[Layer<'_>]) {
    ui.horizontal_wrapped(|ui| {
        for layer in layers.iter().filter(|l| l.style != Style::FaintMarkers) {
            for t in layer.traces {
                ui.colored_label(hex_color(t.color), format!("● {}", t.label));
            }
        }
    });
}

/// Nearest point under the cursor, labelled in place.
fn hover_readout(painter: &egui::Painter, frame: &Frame, layers: &[Layer<'_>], pos: Pos2, font: &FontId) {
    let mut best: Option<(f32, Pos2, &Trace, NaiveDate, f64)> = None;
    for t in layers.iter().filter(|l| l.style != Style::FaintMarkers).flat_map(|l| l.traces.iter()) {
        for &(d, v) in &t.points {
            let p = frame.to_screen(d, v);
            let dist = p.distance(pos);
            if dist < 10.0 && best.is_none_or(|b| dist < b.0) {
                best = Some((dist, p, t, d, v));
            }
        }
    }
    if let Some((_, p, t, d, v)) = best {
        painter.text(
            p + vec2(6.0, -6.0),
            Align2::LEFT_BOTTOM,
            format!("{} · {} · {v:.1}%", t.label, view::format_date(Some(d))),
            font.clone(),
            hex_color(t.color),
        );
    }
}
