// src/config/consts.rs

// Net config
pub const URL: &str =
    "https://en.wikipedia.org/wiki/Opinion_polling_for_the_2026_Brazilian_presidential_election";
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
    (KHTML, like Gecko) Chrome/128.0.0.0 Safari/537.36";
pub const ACCEPT: &str = "text/html,application/xhtml+xml;q=0.9,*/*;q=0.8";
pub const ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9";
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

// Page layout
pub const TABLE_CLASS: &str = "wikitable";
pub const HEADER_ROW: usize = 0;
pub const DATA_START_ROW: usize = 2; // header + sub-header
pub const MISSING: &str = "—";
pub const PERIOD_SEP: char = '–';
pub const DATE_FORMAT: &str = "%d %b %Y";

// Series
pub const ROLLING_WINDOW: usize = 3;
pub const ROLLING_MIN_PERIODS: usize = 1;

// Cache
pub const CACHE_TTL_SECS: u64 = 1800;

// Display
pub const DISPLAY_DATE_FORMAT: &str = "%d/%m/%Y";
pub const MAJORITY_LINE: f64 = 50.0;
pub const FALLBACK_COLOR: &str = "#000000";
pub const INSTITUTE_BAR_COLOR: &str = "#009739";

// Logging
pub const LOG_FILE: &str = ".store/debug.log";
pub const LOG_FILTER_DEFAULT: &str = "info";
