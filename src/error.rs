// src/error.rs
use thiserror::Error;

/// Failures that cross the pipeline boundary.
///
/// Everything finer-grained (bad dates, bad numbers, short rows) degrades to a
/// missing value inside the pipeline and never shows up here.
#[derive(Debug, Error)]
pub enum PollError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("cannot read {path}: {source}")]
    Io { path: String, source: std::io::Error },

    #[error("HTTP {status} for {url}")]
    Status { status: u16, url: String },

    #[error("table #{index} requested but only {found} table(s) with class `{class}` found")]
    TableMissing { index: usize, found: usize, class: String },

    #[error("table #{index} has no usable header row")]
    HeaderRow { index: usize },

    #[error("{round}: source headers missing from page: {}", missing.join(", "))]
    MissingColumns { round: String, missing: Vec<String> },

    /// A load failed less than one TTL ago; no fetch was made.
    #[error("{message} (next attempt in {retry_in}s)")]
    Backoff { message: String, retry_in: u64 },
}

pub type PollResult<T> = Result<T, PollError>;
