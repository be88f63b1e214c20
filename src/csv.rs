// src/csv.rs
use crate::data::{PollDataset, RoundData, SmoothedSeries};

/* ---------------- Writing ---------------- */

fn needs_quotes(field: &str, sep: char) -> bool {
    field.contains(sep) || field.contains('"') || field.contains('\n') || field.contains('\r')
}

/// Append one CSV/TSV row, newline-terminated.
pub fn push_row(out: &mut String, row: &[String], sep: char) {
    for (i, cell) in row.iter().enumerate() {
        if i > 0 { out.push(sep); }
        if needs_quotes(cell, sep) {
            out.push('"');
            out.push_str(&cell.replace('"', "\"\""));
            out.push('"');
        } else {
            out.push_str(cell);
        }
    }
    out.push('\n');
}

/* ---------------- Cell formatting ---------------- */

/// Two decimals; missing is an empty field (never 0).
pub fn format_value(v: Option<f64>) -> String {
    v.map(|v| format!("{v:.2}")).unwrap_or_default()
}

fn format_iso(d: Option<chrono::NaiveDate>) -> String {
    d.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default()
}

/* ---------------- Datasets → text ---------------- */

fn rows_to_string(headers: &[String], rows: impl Iterator<Item = Vec<String>>, sep: char) -> String {
    let mut out = String::new();
    push_row(&mut out, headers, sep);
    for r in rows {
        push_row(&mut out, &r, sep);
    }
    out
}

/// `institute, date, <candidates…>`, ascending by date, undated last.
pub fn raw_to_string(ds: &PollDataset, institute_col: &str, date_col: &str, sep: char) -> String {
    let mut headers = vec![s!(institute_col), s!(date_col)];
    headers.extend(ds.candidates.iter().cloned());

    let rows = ds.records.iter().map(|r| {
        let mut row = vec![r.institute.clone().unwrap_or_default(), format_iso(r.date)];
        row.extend(r.values.iter().map(|v| format_value(*v)));
        row
    });
    rows_to_string(&headers, rows, sep)
}

/// `date, <candidates…>`, ascending.
pub fn smoothed_to_string(series: &SmoothedSeries, date_col: &str, sep: char) -> String {
    let mut headers = vec![s!(date_col)];
    headers.extend(series.candidates.iter().cloned());

    let rows = series.points.iter().map(|p| {
        let mut row = vec![format_iso(Some(p.date))];
        row.extend(p.values.iter().map(|v| format_value(*v)));
        row
    });
    rows_to_string(&headers, rows, sep)
}

/// (raw, smoothed) export text for one round, using the round's column names.
pub fn round_to_strings(round: &RoundData, sep: char) -> (String, String) {
    (
        raw_to_string(&round.raw, round.spec.institute, round.spec.date, sep),
        smoothed_to_string(&round.smoothed, round.spec.date, sep),
    )
}
