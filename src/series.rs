// src/series.rs
//
// Series Builder. Two passes over one round:
//   1. per-date mean of every candidate (undated records sit this out)
//   2. trailing rolling mean over the distinct dates
// Missing stays missing throughout; an all-missing span never turns into 0.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use tracing::debug;

use crate::data::{PollDataset, PollFrame, PollRecord, SmoothedPoint, SmoothedSeries};
use crate::specs::rounds::RoundSpec;

/// `"37.2"` → 37.2. Anything else (sentinel, `n/a`, `12%`, `NaN`) → None.
pub fn coerce_pct(cell: Option<&str>) -> Option<f64> {
    let v: f64 = cell?.trim().parse().ok()?;
    v.is_finite().then_some(v)
}

/// Typed records, ascending by date with undated records last (stable).
pub fn to_dataset(frame: &PollFrame, dates: &[Option<NaiveDate>], spec: &RoundSpec) -> PollDataset {
    let inst_ix = frame.column(spec.institute);
    let cand_ix: Vec<Option<usize>> = spec.candidates.iter().map(|c| frame.column(c)).collect();

    let mut records: Vec<PollRecord> = frame
        .rows
        .iter()
        .enumerate()
        .map(|(i, row)| PollRecord {
            institute: inst_ix.and_then(|ix| row.get(ix)).cloned().flatten(),
            date: dates.get(i).copied().flatten(),
            values: cand_ix
                .iter()
                .map(|ix| coerce_pct(ix.and_then(|ix| row.get(ix)).and_then(|c| c.as_deref())))
                .collect(),
        })
        .collect();

    records.sort_by_key(|r| (r.date.is_none(), r.date));

    PollDataset {
        candidates: spec.candidates.iter().map(|c| s!(*c)).collect(),
        records,
    }
}

/// Mean of the non-missing observations per candidate, one entry per distinct
/// date, ascending. A candidate with no observation on a date gets None.
pub fn group_by_date(ds: &PollDataset) -> Vec<(NaiveDate, Vec<Option<f64>>)> {
    let width = ds.candidates.len();
    let mut acc: BTreeMap<NaiveDate, Vec<(f64, usize)>> = BTreeMap::new();

    for rec in &ds.records {
        let Some(date) = rec.date else { continue };
        let slot = acc.entry(date).or_insert_with(|| vec![(0.0, 0); width]);
        for (cell, v) in slot.iter_mut().zip(&rec.values) {
            if let Some(v) = v {
                cell.0 += v;
                cell.1 += 1;
            }
        }
    }

    acc.into_iter()
        .map(|(date, sums)| {
            let means = sums
                .into_iter()
                .map(|(sum, n)| (n > 0).then(|| sum / n as f64))
                .collect();
            (date, means)
        })
        .collect()
}

/// Trailing mean over `window` points, skipping missing ones. A point needs at
/// least `min_periods` (and at least one) present values in its span.
pub fn rolling_mean(values: &[Option<f64>], window: usize, min_periods: usize) -> Vec<Option<f64>> {
    let window = window.max(1);
    let min_periods = min_periods.max(1);

    (0..values.len())
        .map(|i| {
            let start = (i + 1).saturating_sub(window);
            let (sum, n) = values[start..=i]
                .iter()
                .flatten()
                .fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
            (n >= min_periods).then(|| sum / n as f64)
        })
        .collect()
}

/// Grouped-by-date series with each candidate column rolled independently.
pub fn smooth(ds: &PollDataset, window: usize, min_periods: usize) -> SmoothedSeries {
    let grouped = group_by_date(ds);
    let width = ds.candidates.len();

    let columns: Vec<Vec<Option<f64>>> = (0..width)
        .map(|c| {
            let raw: Vec<Option<f64>> = grouped.iter().map(|(_, means)| means[c]).collect();
            rolling_mean(&raw, window, min_periods)
        })
        .collect();

    let points = grouped
        .iter()
        .enumerate()
        .map(|(i, (date, _))| SmoothedPoint {
            date: *date,
            values: columns.iter().map(|col| col[i]).collect(),
        })
        .collect();

    SmoothedSeries { candidates: ds.candidates.clone(), points }
}

/// Frame + resolved dates → (raw records, smoothed series).
pub fn build(
    frame: &PollFrame,
    dates: &[Option<NaiveDate>],
    spec: &RoundSpec,
    window: usize,
    min_periods: usize,
) -> (PollDataset, SmoothedSeries) {
    let ds = to_dataset(frame, dates, spec);
    let series = smooth(&ds, window, min_periods);
    debug!(
        "{}: {} record(s), {} distinct date(s)",
        spec.round.label(),
        ds.len(),
        series.len()
    );
    (ds, series)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::specs::rounds::RUNOFF;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, day).unwrap()
    }

    fn rec(date: Option<NaiveDate>, values: Vec<Option<f64>>) -> PollRecord {
        PollRecord { institute: Some(s!("X")), date, values }
    }

    #[test]
    fn coercion_is_per_field() {
        assert_eq!(coerce_pct(Some("37.2")), Some(37.2));
        assert_eq!(coerce_pct(Some(" 41 ")), Some(41.0));
        assert_eq!(coerce_pct(None), None);
        assert_eq!(coerce_pct(Some("n/a")), None);
        assert_eq!(coerce_pct(Some("NaN")), None);
        assert_eq!(coerce_pct(Some("12%")), None);
    }

    #[test]
    fn grouped_mean_skips_missing() {
        let ds = PollDataset {
            candidates: vec![s!("X"), s!("Y")],
            records: vec![
                rec(Some(d(5)), vec![Some(40.0), None]),
                rec(Some(d(5)), vec![None, None]),
                rec(Some(d(5)), vec![Some(44.0), None]),
                rec(None, vec![Some(99.0), Some(99.0)]),
            ],
        };
        let g = group_by_date(&ds);
        assert_eq!(g, vec![(d(5), vec![Some(42.0), None])]);
    }

    #[test]
    fn rolling_skips_missing_inside_window() {
        let raw = [Some(30.0), Some(32.0), None, Some(34.0)];
        assert_eq!(
            rolling_mean(&raw, 3, 1),
            vec![Some(30.0), Some(31.0), Some(31.0), Some(33.0)]
        );
    }

    #[test]
    fn rolling_all_missing_span_is_missing() {
        let raw = [Some(10.0), None, None, None, Some(20.0)];
        assert_eq!(
            rolling_mean(&raw, 3, 1),
            vec![Some(10.0), Some(10.0), Some(10.0), None, Some(20.0)]
        );
    }

    #[test]
    fn smoothing_runs_over_distinct_dates_not_rows() {
        let ds = PollDataset {
            candidates: vec![s!("X")],
            records: vec![
                rec(Some(d(1)), vec![Some(30.0)]),
                rec(Some(d(1)), vec![Some(30.0)]),
                rec(Some(d(1)), vec![Some(30.0)]),
                rec(Some(d(2)), vec![Some(36.0)]),
            ],
        };
        let s = smooth(&ds, 3, 1);
        assert_eq!(s.points.len(), 2);
        assert_eq!(s.points[1].values, vec![Some(33.0)]);
    }

    #[test]
    fn dataset_sorted_ascending_with_undated_last() {
        let frame = PollFrame {
            columns: ["Instituto", "Data", "Lula", "Tarcísio"].map(|c| s!(c)).to_vec(),
            rows: vec![
                vec![Some(s!("B")), None, Some(s!("40")), Some(s!("n/a"))],
                vec![Some(s!("A")), None, Some(s!("41")), Some(s!("39"))],
                vec![None, None, None, Some(s!("38.5"))],
            ],
        };
        let dates = [Some(d(9)), None, Some(d(3))];
        let ds = to_dataset(&frame, &dates, &RUNOFF);

        assert_eq!(ds.candidates, vec!["Lula", "Tarcísio"]);
        let order: Vec<Option<NaiveDate>> = ds.records.iter().map(|r| r.date).collect();
        assert_eq!(order, vec![Some(d(3)), Some(d(9)), None]);
        assert_eq!(ds.records[0].institute, None);
        assert_eq!(ds.records[0].values, vec![None, Some(38.5)]);
        assert_eq!(ds.records[1].values, vec![Some(40.0), None]);
        assert_eq!(ds.records[2].institute.as_deref(), Some("A"));
    }
}
