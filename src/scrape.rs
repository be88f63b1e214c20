// src/scrape.rs
//
// The pipeline, one round at a time:
//   fetch → extract_table → normalize → resolve dates → build series
// Only fetch/extract/normalize can fail; everything after degrades to missing
// values.

use tracing::{error, info};

use crate::{
    config::options::PipelineOptions,
    core::{Fetch, html},
    data::{Datasets, RoundData},
    dates,
    error::PollResult,
    normalize::normalize,
    progress::Progress,
    series,
    specs::rounds::RoundSpec,
};

/// Build one round from an already fetched document.
pub fn build_round(doc: &str, opts: &PipelineOptions, spec: &RoundSpec) -> PollResult<RoundData> {
    let raw = html::extract_table(doc, &opts.layout, spec.table_index)?;
    let frame = normalize(&raw, spec)?;
    let dates = dates::resolve_column(&frame, spec.date);
    let (raw, smoothed) = series::build(&frame, &dates, spec, opts.window, opts.min_periods);
    Ok(RoundData { spec: *spec, raw, smoothed })
}

/// Fetch the page and build one round.
pub fn collect_round<F: Fetch + ?Sized>(
    fetcher: &F,
    opts: &PipelineOptions,
    spec: &RoundSpec,
) -> PollResult<RoundData> {
    let doc = fetcher.get(&opts.url)?;
    build_round(&doc, opts, spec)
}

/// Both rounds, first round then runoff, one fetch each. Any failure fails
/// the whole load; there is no partial result.
pub fn collect_all<F: Fetch + ?Sized>(
    fetcher: &F,
    opts: &PipelineOptions,
    mut progress: Option<&mut dyn Progress>,
) -> PollResult<Datasets> {
    if let Some(p) = progress.as_deref_mut() {
        p.begin(2);
    }

    let result = load_rounds(fetcher, opts, &mut progress);
    if let Err(e) = &result {
        error!("pipeline failed: {e}");
    }

    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }
    result
}

fn load_rounds<F: Fetch + ?Sized>(
    fetcher: &F,
    opts: &PipelineOptions,
    progress: &mut Option<&mut dyn Progress>,
) -> PollResult<Datasets> {
    let first_round = load_one(fetcher, opts, &opts.first_round, progress)?;
    let runoff = load_one(fetcher, opts, &opts.runoff, progress)?;
    Ok(Datasets { first_round, runoff })
}

fn load_one<F: Fetch + ?Sized>(
    fetcher: &F,
    opts: &PipelineOptions,
    spec: &RoundSpec,
    progress: &mut Option<&mut dyn Progress>,
) -> PollResult<RoundData> {
    if let Some(p) = progress.as_deref_mut() {
        p.log(&format!("Fetching {}…", spec.round.label().to_lowercase()));
    }

    let round = collect_round(fetcher, opts, spec)?;
    info!(
        "{}: {} poll(s), {} smoothed point(s)",
        spec.round.label(),
        round.raw.len(),
        round.smoothed.len()
    );

    if let Some(p) = progress.as_deref_mut() {
        p.item_done(spec.round.label());
    }
    Ok(round)
}
