// src/gui/components/data_table.rs
use eframe::egui::{self, RichText};
use egui_extras::{Column, TableBuilder};

use crate::data::PollDataset;
use crate::specs::rounds::RoundSpec;
use crate::view;

/// Raw polls, newest first: institute, date, then the selected candidates.
pub fn draw(ui: &mut egui::Ui, ds: &PollDataset, spec: &RoundSpec, selected: &[&str]) {
    if ds.is_empty() {
        ui.weak("No polls match the current filters.");
        return;
    }

    let cols: Vec<(&str, usize)> = selected
        .iter()
        .filter_map(|name| Some((*name, ds.candidate_index(name)?)))
        .collect();
    let rows = view::display_rows(ds);
    let row_h = ui.text_style_height(&egui::TextStyle::Body) + 4.0;

    ui.push_id("poll_table", |ui| {
        let mut table = TableBuilder::new(ui)
            .striped(true)
            .vscroll(false)
            .column(Column::auto().at_least(140.0))
            .column(Column::auto().at_least(80.0));
        for _ in &cols {
            table = table.column(Column::auto().at_least(60.0));
        }

        table
            .header(row_h, |mut header| {
                header.col(|ui| { ui.strong(spec.institute); });
                header.col(|ui| { ui.strong(spec.date); });
                for (name, _) in &cols {
                    header.col(|ui| { ui.strong(*name); });
                }
            })
            .body(|body| {
                body.rows(row_h, rows.len(), |mut row| {
                    let rec = rows[row.index()];
                    row.col(|ui| { ui.label(rec.institute.as_deref().unwrap_or("")); });
                    row.col(|ui| { ui.label(view::format_date(rec.date)); });
                    for (_, ix) in &cols {
                        let v = rec.values.get(*ix).copied().flatten();
                        row.col(|ui| {
                            ui.label(RichText::new(view::format_pct(v)).monospace());
                        });
                    }
                });
            });
    });
}
