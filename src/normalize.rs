// src/normalize.rs
use tracing::debug;

use crate::core::sanitize::is_missing;
use crate::data::{PollFrame, RawTable};
use crate::error::{PollError, PollResult};
use crate::specs::rounds::RoundSpec;

/// Field Normalizer: keep only the round's mapped columns, renamed, in map order.
///
/// Every source header in the map must be on the page; all absent ones are
/// reported together. Cells holding the missing sentinel become `None`.
pub fn normalize(raw: &RawTable, spec: &RoundSpec) -> PollResult<PollFrame> {
    let mut picks: Vec<usize> = Vec::with_capacity(spec.columns.len());
    let mut missing: Vec<String> = Vec::new();

    for (source, _) in spec.columns {
        match raw.header_index(source) {
            Some(ix) => picks.push(ix),
            None => missing.push(s!(*source)),
        }
    }
    if !missing.is_empty() {
        return Err(PollError::MissingColumns { round: s!(spec.round.label()), missing });
    }

    let columns: Vec<String> = spec.columns.iter().map(|(_, canon)| s!(*canon)).collect();
    let rows = raw
        .rows
        .iter()
        .map(|row| {
            picks
                .iter()
                .map(|&ix| row.get(ix).filter(|c| !is_missing(c)).cloned())
                .collect()
        })
        .collect();

    debug!("{}: kept columns {:?}", spec.round.label(), columns);
    Ok(PollFrame { columns, rows })
}
