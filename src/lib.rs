// src/lib.rs

#[macro_use]
pub mod macros;

pub mod cache;
pub mod config;
pub mod core;
pub mod csv;
pub mod data;
pub mod dates;
pub mod error;
pub mod file;
pub mod gui;
pub mod log;
pub mod normalize;
pub mod progress;
pub mod scrape;
pub mod series;
pub mod service;
pub mod specs;
pub mod view;

#[cfg(feature = "cli")]
pub mod cli;

pub use error::{PollError, PollResult};
pub use service::PollService;
