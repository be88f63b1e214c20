// src/dates.rs
use chrono::NaiveDate;
use tracing::debug;

use crate::config::consts::{DATE_FORMAT, PERIOD_SEP};
use crate::data::PollFrame;

/// Date Resolver: `"10 – 15 Jan 2026"` → 2026-01-15.
///
/// Only the end of the fieldwork period is kept. A single date with no
/// separator is its own end. Anything that doesn't parse as `%d %b %Y` is
/// `None`; the record keeps going without a date.
pub fn resolve(period: &str) -> Option<NaiveDate> {
    let end = period.rsplit(PERIOD_SEP).next()?.trim();
    NaiveDate::parse_from_str(end, DATE_FORMAT).ok()
}

/// Resolve every cell of `column`, one entry per frame row.
pub fn resolve_column(frame: &PollFrame, column: &str) -> Vec<Option<NaiveDate>> {
    let dates: Vec<Option<NaiveDate>> = frame
        .column_cells(column)
        .map(|cell| cell.and_then(resolve))
        .collect();

    let misses = dates.iter().filter(|d| d.is_none()).count();
    if misses > 0 {
        debug!("{misses} of {} period(s) in `{column}` did not resolve to a date", dates.len());
    }
    dates
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn range_keeps_end() {
        assert_eq!(resolve("10 – 15 Jan 2026"), Some(ymd(2026, 1, 15)));
        assert_eq!(resolve("28 Dec 2025 – 3 Jan 2026"), Some(ymd(2026, 1, 3)));
        assert_eq!(resolve("10–15 Jan 2026"), Some(ymd(2026, 1, 15)));
    }

    #[test]
    fn single_date() {
        assert_eq!(resolve("3 Mar 2026"), Some(ymd(2026, 3, 3)));
    }

    #[test]
    fn garbage_is_none() {
        assert_eq!(resolve("garbage"), None);
        assert_eq!(resolve("15 Jan"), None);
        assert_eq!(resolve(""), None);
        assert_eq!(resolve("10 – "), None);
    }

    #[test]
    fn column_keeps_row_count() {
        let frame = PollFrame {
            columns: vec![s!("Instituto"), s!("Data")],
            rows: vec![
                vec![Some(s!("A")), Some(s!("garbage"))],
                vec![Some(s!("B")), None],
                vec![Some(s!("C")), Some(s!("1 – 2 Feb 2026"))],
            ],
        };
        assert_eq!(resolve_column(&frame, "Data"), vec![None, None, Some(ymd(2026, 2, 2))]);
        assert_eq!(resolve_column(&frame, "Nope"), vec![None, None, None]);
    }
}
