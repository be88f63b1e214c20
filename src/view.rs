// src/view.rs
//
// Read-only slicing of the cached datasets for the dashboard/CLI. Nothing here
// refetches, re-normalizes or re-smooths.

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::config::consts::DISPLAY_DATE_FORMAT;
use crate::data::{PollDataset, PollRecord, SmoothedSeries};

/// Earliest and latest resolved date. Undated records are ignored.
pub fn date_bounds(ds: &PollDataset) -> Option<(NaiveDate, NaiveDate)> {
    let mut dates = ds.records.iter().filter_map(|r| r.date);
    let first = dates.next()?;
    Some(dates.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d))))
}

/// Distinct institutes in first-seen order.
pub fn institutes(ds: &PollDataset) -> Vec<&str> {
    let mut out: Vec<&str> = Vec::new();
    for name in ds.records.iter().filter_map(|r| r.institute.as_deref()) {
        if !out.contains(&name) {
            out.push(name);
        }
    }
    out
}

/// Polls per institute, most active first; ties by name.
pub fn institute_counts(ds: &PollDataset) -> Vec<(String, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for name in ds.records.iter().filter_map(|r| r.institute.as_deref()) {
        *counts.entry(name).or_default() += 1;
    }
    let mut out: Vec<(String, usize)> = counts.into_iter().map(|(k, v)| (s!(k), v)).collect();
    out.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    out
}

/// Smoothed values on the most recent date.
#[derive(Clone, Debug, PartialEq)]
pub struct Latest {
    pub date: NaiveDate,
    pub values: Vec<(String, Option<f64>)>,
}

impl Latest {
    pub fn get(&self, candidate: &str) -> Option<f64> {
        self.values.iter().find(|(c, _)| c == candidate).and_then(|(_, v)| *v)
    }
}

pub fn latest(series: &SmoothedSeries) -> Option<Latest> {
    let last = series.points.last()?;
    Some(Latest {
        date: last.date,
        values: series.candidates.iter().cloned().zip(last.values.iter().copied()).collect(),
    })
}

/// Dashboard filter. Range bounds are inclusive.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Filter {
    pub range: Option<(NaiveDate, NaiveDate)>,
    /// Raw datasets only; None means all institutes.
    pub institute: Option<String>,
}

impl Filter {
    fn in_range(&self, date: Option<NaiveDate>) -> bool {
        match (self.range, date) {
            (None, _) => true,
            (Some((lo, hi)), Some(d)) => lo <= d && d <= hi,
            (Some(_), None) => false,
        }
    }

    fn matches(&self, rec: &PollRecord) -> bool {
        let inst_ok = match &self.institute {
            None => true,
            Some(want) => rec.institute.as_deref() == Some(want.as_str()),
        };
        inst_ok && self.in_range(rec.date)
    }
}

pub fn filter_dataset(ds: &PollDataset, filter: &Filter) -> PollDataset {
    PollDataset {
        candidates: ds.candidates.clone(),
        records: ds.records.iter().filter(|r| filter.matches(r)).cloned().collect(),
    }
}

/// Slices the series by date. Points keep the smoothing they got over the
/// full history; the window is not restarted at the range start.
pub fn filter_series(series: &SmoothedSeries, filter: &Filter) -> SmoothedSeries {
    SmoothedSeries {
        candidates: series.candidates.clone(),
        points: series
            .points
            .iter()
            .filter(|p| filter.in_range(Some(p.date)))
            .cloned()
            .collect(),
    }
}

/// Newest first, undated last.
pub fn display_rows(ds: &PollDataset) -> Vec<&PollRecord> {
    let mut rows: Vec<&PollRecord> = ds.records.iter().collect();
    rows.sort_by(|a, b| match (a.date, b.date) {
        (Some(x), Some(y)) => y.cmp(&x),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });
    rows
}

pub fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format(DISPLAY_DATE_FORMAT).to_string()).unwrap_or_default()
}

pub fn format_pct(value: Option<f64>) -> String {
    value.map(|v| format!("{v:.1}%")).unwrap_or_default()
}

/* ---------------- chart traces ---------------- */

/// Anything that can yield (date, value) points per candidate.
pub trait PointSource {
    fn candidates(&self) -> &[String];
    /// Dated, non-missing points of one candidate column, in stored order.
    fn points(&self, candidate: usize) -> Vec<(NaiveDate, f64)>;
}

impl PointSource for PollDataset {
    fn candidates(&self) -> &[String] {
        &self.candidates
    }
    fn points(&self, candidate: usize) -> Vec<(NaiveDate, f64)> {
        self.records
            .iter()
            .filter_map(|r| Some((r.date?, (*r.values.get(candidate)?)?)))
            .collect()
    }
}

impl PointSource for SmoothedSeries {
    fn candidates(&self) -> &[String] {
        &self.candidates
    }
    fn points(&self, candidate: usize) -> Vec<(NaiveDate, f64)> {
        self.points
            .iter()
            .filter_map(|p| Some((p.date, (*p.values.get(candidate)?)?)))
            .collect()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Trace {
    pub label: String,
    pub color: &'static str,
    pub points: Vec<(NaiveDate, f64)>,
}

/// One trace per selected candidate present in `src`, in selection order.
/// Works the same for any number of candidates, raw or smoothed.
pub fn traces<S: PointSource + ?Sized>(
    src: &S,
    selected: &[&str],
    color: impl Fn(&str) -> &'static str,
) -> Vec<Trace> {
    selected
        .iter()
        .filter_map(|name| {
            let ix = src.candidates().iter().position(|c| c == *name)?;
            Some(Trace { label: s!(*name), color: color(*name), points: src.points(ix) })
        })
        .collect()
}
