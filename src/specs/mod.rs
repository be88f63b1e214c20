// src/specs/mod.rs
//! # Page specs
//!
//! Everything that encodes *what the polling article looks like*: which table
//! holds which round, how its source headers map onto canonical column names,
//! and which of those columns are candidates.
//!
//! ## What lives here
//! - One `RoundSpec` per known table (`FIRST_ROUND`, `RUNOFF`).
//! - The candidate display palette.
//!
//! ## What does **not** live here
//! - Fetching and HTML walking (`core::net`, `core::html`).
//! - Normalization and numeric work (`normalize`, `dates`, `series`).
//! - Caching (`cache`, `service`).
//!
//! ## Typical call chain
//! ```text
//! service::PollService → cache → scrape::collect_all
//!     → core::html::extract_table(doc, layout, spec.table_index)
//!     → normalize::normalize(raw, spec)
//!     → dates::resolve_dates / series::build(frame, spec)
//! ```
//!
//! Source headers are matched *after* footnote markers are stripped, so
//! `Others[a]` on the page matches `Others` here. If the page renames a column
//! the normalizer fails with `PollError::MissingColumns` instead of quietly
//! producing an empty candidate.
pub mod rounds;
