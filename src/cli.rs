// src/cli.rs
use std::{io::{self, Write}, path::PathBuf};

use color_eyre::eyre::{Result, WrapErr, bail, eyre};
use tracing::info;

use crate::{
    config::options::{ExportFormat, PipelineOptions},
    core::{Fetch, FileFetcher, HttpFetcher},
    csv::{raw_to_string, smoothed_to_string},
    data::{Datasets, RoundData},
    file::{ensure_directory, file_stem},
    progress::Progress,
    scrape,
    specs::rounds::Round,
    view,
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Params {
    pub rounds: Vec<Round>,
    pub raw: bool,
    pub smoothed: bool,
    pub format: ExportFormat,
    pub out: Option<PathBuf>,
    pub summary: bool,
    /// Saved copy of the page instead of the network.
    pub input: Option<PathBuf>,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            rounds: Round::ALL.to_vec(),
            raw: true,
            smoothed: true,
            format: ExportFormat::Csv,
            out: None,
            summary: false,
            input: None,
        }
    }
}

/// Prints fetch progress on stderr so stdout stays clean for tables.
struct StderrProgress;

impl Progress for StderrProgress {
    fn log(&mut self, msg: &str) {
        eprintln!("{msg}");
    }
    fn item_done(&mut self, label: &str) {
        eprintln!("{label}: done");
    }
}

pub fn run() -> Result<()> {
    crate::log::init();
    let params = parse_args(std::env::args().skip(1))?;
    info!("CLI: {:?}", params);

    let opts = PipelineOptions::default();
    let fetcher: Box<dyn Fetch> = match &params.input {
        Some(path) => Box::new(FileFetcher::new(path)),
        None => Box::new(HttpFetcher::new()?),
    };

    let ds = scrape::collect_all(fetcher.as_ref(), &opts, Some(&mut StderrProgress))
        .wrap_err("could not load polling tables")?;
    if ds.is_empty() {
        bail!("page parsed but every table came back empty");
    }

    if params.summary {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        for round in &params.rounds {
            write_summary(&mut out, ds.round(*round))?;
        }
        return Ok(());
    }

    let tables = selected_tables(&ds, &params);
    match &params.out {
        Some(dir) => {
            ensure_directory(dir)?;
            for (stem, text) in tables {
                let path = dir.join(format!("{stem}.{}", params.format.ext()));
                std::fs::write(&path, text)
                    .wrap_err_with(|| format!("writing {}", path.display()))?;
                eprintln!("Wrote {}", path.display());
            }
        }
        None => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            let many = tables.len() > 1;
            for (i, (stem, text)) in tables.iter().enumerate() {
                if many {
                    if i > 0 { writeln!(out)?; }
                    writeln!(out, "# {stem}")?;
                }
                write!(out, "{text}")?;
            }
        }
    }
    Ok(())
}

/// (file stem, delimited text) for each table the params ask for.
fn selected_tables(ds: &Datasets, params: &Params) -> Vec<(String, String)> {
    let sep = params.format.delim();
    let mut out = Vec::new();
    for &round in &params.rounds {
        let r = ds.round(round);
        if params.raw {
            out.push((file_stem(round, false), raw_to_string(&r.raw, r.spec.institute, r.spec.date, sep)));
        }
        if params.smoothed {
            out.push((file_stem(round, true), smoothed_to_string(&r.smoothed, r.spec.date, sep)));
        }
    }
    out
}

fn write_summary<W: Write>(mut w: W, round: &RoundData) -> io::Result<()> {
    let label = round.spec.round.label();
    let bounds = view::date_bounds(&round.raw)
        .map(|(lo, hi)| format!("{} – {}", view::format_date(Some(lo)), view::format_date(Some(hi))))
        .unwrap_or_else(|| s!("no dated polls"));
    writeln!(
        w,
        "{label}: {} poll(s), {} date(s), {bounds}",
        round.raw.len(),
        round.smoothed.len()
    )?;

    if let Some(latest) = view::latest(&round.smoothed) {
        let parts: Vec<String> = latest
            .values
            .iter()
            .map(|(c, v)| format!("{c} {}", if v.is_some() { view::format_pct(*v) } else { s!("—") }))
            .collect();
        writeln!(w, "  latest ({}): {}", view::format_date(Some(latest.date)), parts.join(", "))?;
    }

    let counts: Vec<String> = view::institute_counts(&round.raw)
        .into_iter()
        .map(|(name, n)| format!("{name} {n}"))
        .collect();
    writeln!(w, "  institutes: {}", counts.join(", "))
}

pub fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Result<Params> {
    let mut params = Params::default();
    let mut args = args.into_iter();

    while let Some(a) = args.next() {
        match a.as_str() {
            "--round" | "-r" => {
                let v = args.next().ok_or_else(|| eyre!("Missing value for --round"))?;
                params.rounds = match v.to_ascii_lowercase().as_str() {
                    "first" | "1" => vec![Round::First],
                    "runoff" | "2" => vec![Round::Runoff],
                    "all" => Round::ALL.to_vec(),
                    other => bail!("Unknown round: {other} (first|runoff|all)"),
                };
            }
            "--raw" => { params.raw = true; params.smoothed = false; }
            "--smoothed" => { params.smoothed = true; params.raw = false; }
            "--format" => {
                let v = args.next().ok_or_else(|| eyre!("Missing value for --format"))?;
                params.format = match v.to_ascii_lowercase().as_str() {
                    "csv" => ExportFormat::Csv,
                    "tsv" => ExportFormat::Tsv,
                    other => bail!("Unknown format: {other}"),
                };
            }
            "-o" | "--out" => {
                params.out = Some(PathBuf::from(args.next().ok_or_else(|| eyre!("Missing output directory"))?));
            }
            "--input" | "-i" => {
                params.input = Some(PathBuf::from(args.next().ok_or_else(|| eyre!("Missing input file"))?));
            }
            "--summary" => params.summary = true,
            "-h" | "--help" => {
                eprintln!("{}", HELP);
                std::process::exit(0);
            }
            _ => bail!("Unknown arg: {a}"),
        }
    }
    Ok(params)
}

const HELP: &str = "\
Usage: cli [options]
  -r, --round first|runoff|all   which table(s) (default: all)
      --raw | --smoothed         only raw polls / only the rolling average
      --format csv|tsv           output format (default: csv)
  -o, --out DIR                  write one file per table into DIR
  -i, --input FILE               read a saved page instead of fetching
      --summary                  print date range, latest averages, institute counts";
