// src/config/options.rs
use std::time::Duration;

use super::consts::*;
use crate::specs::rounds::{FIRST_ROUND, RUNOFF, RoundSpec};

/// Where the data lives inside the page. Tied to the known layout of the
/// polling article; kept here so a layout change is a one-line edit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableLayout {
    /// CSS class carried by every data table.
    pub class: String,
    /// Row whose non-empty cells become the column headers.
    pub header_row: usize,
    /// First data row; everything before it is header/sub-header.
    pub data_start: usize,
}

impl Default for TableLayout {
    fn default() -> Self {
        Self {
            class: s!(TABLE_CLASS),
            header_row: HEADER_ROW,
            data_start: DATA_START_ROW,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PipelineOptions {
    pub url: String,
    pub layout: TableLayout,
    pub window: usize,
    pub min_periods: usize,
    pub ttl: Duration,
    /// Fetched in this order: first round, then runoff.
    pub first_round: RoundSpec,
    pub runoff: RoundSpec,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            url: s!(URL),
            layout: TableLayout::default(),
            window: ROLLING_WINDOW,
            min_periods: ROLLING_MIN_PERIODS,
            ttl: Duration::from_secs(CACHE_TTL_SECS),
            first_round: FIRST_ROUND,
            runoff: RUNOFF,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Tsv,
}

impl ExportFormat {
    pub fn ext(&self) -> &'static str {
        match self { ExportFormat::Csv => "csv", ExportFormat::Tsv => "tsv" }
    }
    pub fn delim(&self) -> char {
        match self { ExportFormat::Csv => ',', ExportFormat::Tsv => '\t' }
    }
}
