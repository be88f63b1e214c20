// src/core/html.rs
//
// Table Extractor: one `<table class="…">` out of a document, as headers + rows
// of cleaned text. Positions (which table, which row holds headers, where data
// starts) come from `TableLayout`; nothing here looks at cell contents beyond
// cleaning them.

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use crate::config::options::TableLayout;
use crate::core::sanitize::{clean_cell, clean_text, normalize_ws};
use crate::data::RawTable;
use crate::error::{PollError, PollResult};

static TABLE: LazyLock<Selector> = LazyLock::new(|| Selector::parse("table").expect("static selector"));
static ROW: LazyLock<Selector> = LazyLock::new(|| Selector::parse("tr").expect("static selector"));

/// Extract the `index`-th table carrying `layout.class`.
///
/// - Headers: cells of `layout.header_row` with non-blank text, footnotes
///   stripped from the stored label.
/// - Data: rows from `layout.data_start` on. A row shorter than the header is
///   dropped; a longer one is cut to header width.
/// - Cells: footnotes stripped, whitespace collapsed, empty → missing sentinel.
pub fn extract_table(doc: &str, layout: &TableLayout, index: usize) -> PollResult<RawTable> {
    let html = Html::parse_document(doc);

    let tables: Vec<ElementRef<'_>> = html
        .select(&TABLE)
        .filter(|t| t.value().classes().any(|c| c == layout.class))
        .collect();
    let found = tables.len();
    let table = *tables.get(index).ok_or_else(|| PollError::TableMissing {
        index,
        found,
        class: layout.class.clone(),
    })?;

    let rows = own_rows(table);

    let header_row = rows.get(layout.header_row).ok_or(PollError::HeaderRow { index })?;
    // Kept on the raw text: a footnote-only header (`[c]`) still owns a column.
    let headers: Vec<String> = cells(*header_row)
        .map(cell_text)
        .filter(|t| !normalize_ws(t).is_empty())
        .map(|t| clean_text(&t))
        .collect();
    if headers.is_empty() {
        return Err(PollError::HeaderRow { index });
    }

    let width = headers.len();
    let mut out: Vec<Vec<String>> = Vec::new();
    let mut dropped = 0usize;

    for row in rows.iter().skip(layout.data_start) {
        let tds: Vec<ElementRef<'_>> = cells(*row).collect();
        if tds.len() < width {
            dropped += 1;
            continue;
        }
        out.push(tds.iter().take(width).map(|c| clean_cell(&cell_text(*c))).collect());
    }

    debug!(
        "table #{index}: {} headers, {} rows kept, {} short rows dropped",
        width,
        out.len(),
        dropped
    );

    Ok(RawTable { headers, rows: out })
}

/// `<tr>`s of this table; rows of nested tables belong to those tables.
fn own_rows(table: ElementRef<'_>) -> Vec<ElementRef<'_>> {
    table
        .select(&ROW)
        .filter(|tr| {
            tr.ancestors()
                .filter_map(ElementRef::wrap)
                .find(|a| a.value().name() == "table")
                .is_some_and(|a| a.id() == table.id())
        })
        .collect()
}

/// Direct `<td>`/`<th>` children, in order.
fn cells(row: ElementRef<'_>) -> impl Iterator<Item = ElementRef<'_>> {
    row.children()
        .filter_map(ElementRef::wrap)
        .filter(|c| matches!(c.value().name(), "td" | "th"))
}

fn cell_text(cell: ElementRef<'_>) -> String {
    cell.text().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::consts::MISSING;

    fn layout() -> TableLayout {
        TableLayout::default()
    }

    const DOC: &str = r#"
        <html><body>
          <table class="infobox"><tr><th>Not this</th></tr></table>
          <table class="wikitable sortable">
            <tr><th>Polling firm</th><th>Polling period</th><th>Lula</th><th></th><th>Others[a]</th></tr>
            <tr><th>PT</th><th>Rep.</th><th></th></tr>
            <tr><td>Quaest[1]</td><td>10 – 15 Jan 2026</td><td>42.5<sup>[a]</sup>
            </td><td>x</td><td>[b]</td></tr>
            <tr><td>Short</td><td>1 Jan 2026</td></tr>
            <tr><td>Datafolha</td><td>3 Mar 2026</td><td>40</td><td>y</td><td>5</td><td>extra</td><td>more</td></tr>
          </table>
          <table class="wikitable">
            <tr><th>Polling firm</th><th>Lula</th></tr>
            <tr><th>sub</th></tr>
            <tr><td>Ipec</td><td>51</td></tr>
          </table>
        </body></html>
    "#;

    #[test]
    fn headers_skip_blank_cells_and_footnotes() {
        let t = extract_table(DOC, &layout(), 0).unwrap();
        assert_eq!(t.headers, vec!["Polling firm", "Polling period", "Lula", "Others"]);
    }

    #[test]
    fn rows_match_header_width() {
        let t = extract_table(DOC, &layout(), 0).unwrap();
        assert_eq!(t.rows.len(), 2, "short row dropped");
        assert!(t.rows.iter().all(|r| r.len() == t.headers.len()));
        assert_eq!(t.rows[0], vec!["Quaest", "10 – 15 Jan 2026", "42.5", "x"]);
        assert_eq!(t.rows[1], vec!["Datafolha", "3 Mar 2026", "40", "y"]);
    }

    #[test]
    fn empty_after_cleaning_is_missing() {
        let doc = r#"<table class="wikitable">
            <tr><th>A</th><th>B</th></tr><tr><th></th></tr>
            <tr><td>[b]</td><td> </td></tr></table>"#;
        let t = extract_table(doc, &layout(), 0).unwrap();
        assert_eq!(t.rows[0], vec![MISSING, MISSING]);
    }

    #[test]
    fn second_table_by_index() {
        let t = extract_table(DOC, &layout(), 1).unwrap();
        assert_eq!(t.headers, vec!["Polling firm", "Lula"]);
        assert_eq!(t.rows, vec![vec![s!("Ipec"), s!("51")]]);
    }

    #[test]
    fn index_out_of_range_is_fatal() {
        match extract_table(DOC, &layout(), 2) {
            Err(PollError::TableMissing { index, found, .. }) => {
                assert_eq!(index, 2);
                assert_eq!(found, 2);
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn footnote_only_header_keeps_its_column() {
        let doc = r#"<table class="wikitable">
            <tr><th>Polling firm</th><th>Polling period</th><th>[c]</th><th>Lula</th><th>Freitas</th></tr>
            <tr><th></th></tr>
            <tr><td>Quaest</td><td>14 Jan 2026</td><td>x</td><td>46</td><td>40</td></tr>
            </table>"#;
        let t = extract_table(doc, &layout(), 0).unwrap();
        assert_eq!(t.headers, vec!["Polling firm", "Polling period", "", "Lula", "Freitas"]);
        assert_eq!(t.rows[0], vec!["Quaest", "14 Jan 2026", "x", "46", "40"]);
        assert_eq!(t.header_index("Lula"), Some(3));
    }

    #[test]
    fn nested_table_rows_not_counted() {
        let doc = r#"<table class="wikitable">
            <tr><th>A</th><th>B</th></tr><tr><th></th></tr>
            <tr><td>1</td><td><table><tr><td>in</td><td>ner</td></tr></table>2</td></tr>
            </table>"#;
        let t = extract_table(doc, &layout(), 0).unwrap();
        assert_eq!(t.rows.len(), 1);
        assert_eq!(t.rows[0][0], "1");
    }
}
