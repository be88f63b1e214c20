// src/file.rs

use std::{
    fs,
    io,
    path::{Path, PathBuf},
};

use crate::config::options::ExportFormat;
use crate::csv::round_to_strings;
use crate::data::Datasets;
use crate::specs::rounds::Round;

pub fn ensure_directory(path: &Path) -> io::Result<()> {
    if path.exists() {
        if !path.is_dir() {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("{} exists and is not a directory", path.display()),
            ));
        }
        return Ok(());
    }
    fs::create_dir_all(path)
}

/// `first_round_raw`, `runoff_smoothed`, …
pub fn file_stem(round: Round, smoothed: bool) -> String {
    let r = match round { Round::First => "first_round", Round::Runoff => "runoff" };
    let k = if smoothed { "smoothed" } else { "raw" };
    format!("{r}_{k}")
}

/// Write all four tables into `dir`. Returns the paths written, in
/// first-round raw, first-round smoothed, runoff raw, runoff smoothed order.
pub fn export_datasets(ds: &Datasets, dir: &Path, format: ExportFormat) -> io::Result<Vec<PathBuf>> {
    ensure_directory(dir)?;

    let mut written = Vec::with_capacity(4);
    for round in Round::ALL {
        let (raw, smoothed) = round_to_strings(ds.round(round), format.delim());
        for (is_smoothed, text) in [(false, raw), (true, smoothed)] {
            let path = dir.join(format!("{}.{}", file_stem(round, is_smoothed), format.ext()));
            fs::write(&path, text)?;
            written.push(path);
        }
    }
    Ok(written)
}
