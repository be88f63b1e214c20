// src/gui/components/filters.rs
//
// Left panel. Returns true when the user asked for a refresh.

use chrono::{Days, NaiveDate};
use eframe::egui;

use crate::config::state::GuiState;
use crate::data::Datasets;
use crate::specs::rounds::Round;
use crate::view;

pub fn draw(ui: &mut egui::Ui, state: &mut GuiState, datasets: Option<&Datasets>) -> bool {
    ui.heading("Filters");
    ui.add_space(4.0);

    ui.label("Round");
    ui.horizontal(|ui| {
        for r in Round::ALL {
            ui.selectable_value(&mut state.round, r, r.label());
        }
    });
    ui.separator();

    if let Some(ds) = datasets {
        let round = ds.round(state.round);
        let spec = round.spec;
        let rs = state.current_mut();

        if let Some(bounds) = view::date_bounds(&round.raw) {
            ui.label("Period");
            rs.range = date_range(ui, bounds, rs.range);
            ui.separator();
        }

        ui.label("Institute");
        let current = rs.institute.clone().unwrap_or_else(|| s!("All"));
        egui::ComboBox::from_id_salt("institute")
            .selected_text(current)
            .width(ui.available_width() - 8.0)
            .show_ui(ui, |ui| {
                ui.selectable_value(&mut rs.institute, None, "All");
                for name in view::institutes(&round.raw) {
                    ui.selectable_value(&mut rs.institute, Some(s!(name)), name);
                }
            });
        ui.separator();

        ui.label("Candidates");
        for c in spec.candidates {
            let mut on = rs.selected.iter().any(|x| x == c);
            if ui.checkbox(&mut on, *c).changed() {
                rs.toggle(&spec, c);
            }
        }
        ui.separator();
    }

    ui.button("Refresh data").clicked()
}

/// Two day-offset sliders over the data's bounds.
fn date_range(
    ui: &mut egui::Ui,
    bounds: (NaiveDate, NaiveDate),
    current: Option<(NaiveDate, NaiveDate)>,
) -> Option<(NaiveDate, NaiveDate)> {
    let span = span_days(bounds);
    let (mut from, mut to) = to_offsets(bounds, current);

    let from_label = view::format_date(Some(day_at(bounds, from)));
    let to_label = view::format_date(Some(day_at(bounds, to)));
    ui.add(egui::Slider::new(&mut from, 0..=span).show_value(false).text(from_label));
    ui.add(egui::Slider::new(&mut to, 0..=span).show_value(false).text(to_label));

    from_offsets(bounds, from, to)
}

fn span_days((lo, hi): (NaiveDate, NaiveDate)) -> u64 {
    (hi - lo).num_days().max(0) as u64
}

fn day_at((lo, hi): (NaiveDate, NaiveDate), n: u64) -> NaiveDate {
    lo.checked_add_days(Days::new(n)).unwrap_or(hi).min(hi)
}

/// Current range as slider offsets, clamped into the bounds.
fn to_offsets(bounds: (NaiveDate, NaiveDate), current: Option<(NaiveDate, NaiveDate)>) -> (u64, u64) {
    let span = span_days(bounds);
    let offset = |d: NaiveDate| (d - bounds.0).num_days().clamp(0, span as i64) as u64;
    current.map_or((0, span), |(a, b)| (offset(a), offset(b)))
}

/// Offsets back to a range. Crossed sliders are swapped. The full span maps
/// back to None so newly scraped dates are included without touching the filter.
fn from_offsets(bounds: (NaiveDate, NaiveDate), from: u64, to: u64) -> Option<(NaiveDate, NaiveDate)> {
    let span = span_days(bounds);
    let (from, to) = if from > to { (to, from) } else { (from, to) };
    if from == 0 && to >= span {
        None
    } else {
        Some((day_at(bounds, from), day_at(bounds, to)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, m, day).unwrap()
    }

    const B: (NaiveDate, NaiveDate) = (
        NaiveDate::from_ymd_opt(2026, 1, 10).unwrap(),
        NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
    );

    #[test]
    fn no_range_is_full_span() {
        assert_eq!(to_offsets(B, None), (0, 50));
        assert_eq!(from_offsets(B, 0, 50), None);
    }

    #[test]
    fn offsets_round_trip_a_sub_range() {
        let r = Some((d(1, 20), d(2, 4)));
        let (from, to) = to_offsets(B, r);
        assert_eq!((from, to), (10, 25));
        assert_eq!(from_offsets(B, from, to), r);
    }

    #[test]
    fn stale_range_is_clamped_and_crossed_sliders_swap() {
        assert_eq!(to_offsets(B, Some((d(1, 1), d(4, 1)))), (0, 50));
        assert_eq!(from_offsets(B, 25, 10), Some((d(1, 20), d(2, 4))));
    }
}
