// src/log.rs
use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::{Mutex, OnceLock};

use tracing_subscriber::{EnvFilter, fmt::time::Uptime};

use crate::config::consts::{LOG_FILE, LOG_FILTER_DEFAULT};

static INIT: OnceLock<()> = OnceLock::new();

/// Route `tracing` output to the debug log file.
///
/// Lines carry elapsed time since start and the level, e.g.
/// `0.412s  INFO fetched 183204 bytes`. Filter comes from `RUST_LOG`.
/// Safe to call more than once; only the first call installs anything.
pub fn init() {
    INIT.get_or_init(|| {
        let path = Path::new(LOG_FILE);
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                let _ = fs::create_dir_all(parent);
            }
        }

        let Ok(file) = OpenOptions::new().create(true).append(true).open(path) else {
            return;
        };

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(LOG_FILTER_DEFAULT));

        // Someone else may have installed a subscriber already; that's fine.
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_timer(Uptime::default())
            .with_ansi(false)
            .with_target(false)
            .with_writer(Mutex::new(file))
            .try_init();
    });
}
