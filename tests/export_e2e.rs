// tests/export_e2e.rs
use std::fs;
use std::path::PathBuf;

use poll_scrape::config::options::{ExportFormat, PipelineOptions};
use poll_scrape::core::FileFetcher;
use poll_scrape::data::Datasets;
use poll_scrape::file::export_datasets;
use poll_scrape::scrape::collect_all;

fn tmp_dir(name: &str) -> PathBuf {
    let mut p = std::env::temp_dir();
    p.push(format!("poll_e2e_{}", name));
    let _ = fs::remove_dir_all(&p);
    p
}

fn fixture() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/polls.html")
}

#[test]
fn saved_page_to_csv_files() {
    let fetcher = FileFetcher::new(fixture());
    let ds = collect_all(&fetcher, &PipelineOptions::default(), None).unwrap();

    // directory is created on demand
    let dir = tmp_dir("csv");
    let written = export_datasets(&ds, &dir, ExportFormat::Csv).unwrap();

    let names: Vec<String> = written
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(
        names,
        vec!["first_round_raw.csv", "first_round_smoothed.csv", "runoff_raw.csv", "runoff_smoothed.csv"]
    );
    assert_eq!(
        fs::read_to_string(dir.join("runoff_smoothed.csv")).unwrap(),
        include_str!("golden/runoff_smoothed.csv")
    );
}

#[test]
fn tsv_uses_tabs_and_extension() {
    let fetcher = FileFetcher::new(fixture());
    let ds = collect_all(&fetcher, &PipelineOptions::default(), None).unwrap();

    let dir = tmp_dir("tsv");
    let written = export_datasets(&ds, &dir, ExportFormat::Tsv).unwrap();
    assert!(written.iter().all(|p| p.extension().is_some_and(|e| e == "tsv")));

    let text = fs::read_to_string(dir.join("runoff_raw.tsv")).unwrap();
    assert_eq!(text.lines().next(), Some("Instituto\tData\tLula\tTarcísio"));
    assert_eq!(text.lines().nth(3), Some("Quaest\t2026-02-25\t45.00\t"));
}

#[test]
fn empty_datasets_still_write_headers() {
    let dir = tmp_dir("empty");
    export_datasets(&Datasets::empty(), &dir, ExportFormat::Csv).unwrap();
    assert_eq!(
        fs::read_to_string(dir.join("runoff_raw.csv")).unwrap(),
        "Instituto,Data,Lula,Tarcísio\n"
    );
}

#[test]
fn missing_saved_page_is_an_io_error() {
    let fetcher = FileFetcher::new(tmp_dir("nope").join("page.html"));
    let err = collect_all(&fetcher, &PipelineOptions::default(), None).unwrap_err();
    assert!(matches!(err, poll_scrape::PollError::Io { .. }), "{err:?}");
}
