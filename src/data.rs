// src/data.rs
//
// Shapes that flow through the pipeline, leaves first:
//
// - RawTable:       headers + rows of cleaned cell text, straight off the page.
// - PollFrame:      renamed/selected columns, missing sentinel turned into None.
// - PollDataset:    one typed record per scraped row (date + numbers).
// - SmoothedSeries: one point per distinct date, grouped mean then rolling mean.
//
// Nothing here is mutated after construction; each stage builds a new value.

use chrono::NaiveDate;

use crate::specs::rounds::{FIRST_ROUND, RUNOFF, Round, RoundSpec};

/// One extracted table. Every row has exactly `headers.len()` cells.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn header_index(&self, label: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == label)
    }
}

/// String-typed table in canonical column order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PollFrame {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Option<String>>>,
}

impl PollFrame {
    pub fn column(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Cells of one column, top to bottom. Unknown column yields all-None.
    pub fn column_cells<'a>(&'a self, name: &str) -> impl Iterator<Item = Option<&'a str>> + 'a {
        let ix = self.column(name);
        self.rows
            .iter()
            .map(move |r| ix.and_then(|i| r.get(i)).and_then(|c| c.as_deref()))
    }
}

/// One poll. `values[i]` belongs to the dataset's `candidates[i]`.
#[derive(Clone, Debug, PartialEq)]
pub struct PollRecord {
    pub institute: Option<String>,
    pub date: Option<NaiveDate>,
    pub values: Vec<Option<f64>>,
}

/// Ascending by date, undated records last. Not deduplicated.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PollDataset {
    pub candidates: Vec<String>,
    pub records: Vec<PollRecord>,
}

impl PollDataset {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn candidate_index(&self, name: &str) -> Option<usize> {
        self.candidates.iter().position(|c| c == name)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SmoothedPoint {
    pub date: NaiveDate,
    pub values: Vec<Option<f64>>,
}

/// Ascending by date; dates are distinct.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SmoothedSeries {
    pub candidates: Vec<String>,
    pub points: Vec<SmoothedPoint>,
}

impl SmoothedSeries {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Raw + smoothed for one round.
#[derive(Clone, Debug, PartialEq)]
pub struct RoundData {
    pub spec: RoundSpec,
    pub raw: PollDataset,
    pub smoothed: SmoothedSeries,
}

impl RoundData {
    pub fn empty(spec: RoundSpec) -> Self {
        let candidates: Vec<String> = spec.candidates.iter().map(|c| s!(*c)).collect();
        Self {
            spec,
            raw: PollDataset { candidates: candidates.clone(), records: Vec::new() },
            smoothed: SmoothedSeries { candidates, points: Vec::new() },
        }
    }
}

/// The four tables handed to the presentation layer.
#[derive(Clone, Debug, PartialEq)]
pub struct Datasets {
    pub first_round: RoundData,
    pub runoff: RoundData,
}

impl Datasets {
    /// The failure signal: four empty tables.
    pub fn empty() -> Self {
        Self {
            first_round: RoundData::empty(FIRST_ROUND),
            runoff: RoundData::empty(RUNOFF),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.first_round.raw.is_empty()
            && self.first_round.smoothed.is_empty()
            && self.runoff.raw.is_empty()
            && self.runoff.smoothed.is_empty()
    }

    pub fn round(&self, round: Round) -> &RoundData {
        match round {
            Round::First => &self.first_round,
            Round::Runoff => &self.runoff,
        }
    }
}
