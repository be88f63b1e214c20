// src/service.rs
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use tracing::{debug, error, warn};

use crate::{
    cache::{Clock, DatasetCache, SystemClock},
    config::options::PipelineOptions,
    core::Fetch,
    data::Datasets,
    error::{PollError, PollResult},
    progress::Progress,
    scrape,
};

/// Last failed load. Holds off further fetches for one TTL.
struct Failure {
    at: Instant,
    message: String,
}

/// What the presentation layer talks to: the pipeline behind a TTL cache.
///
/// Calls within the TTL are a lock and an `Arc` clone. After expiry the next
/// call refetches both tables and swaps all four datasets in one go. A failed
/// load is not retried until the TTL has passed again or `invalidate` is
/// called; calls in between get `PollError::Backoff` without fetching.
pub struct PollService<F, C = SystemClock> {
    fetcher: F,
    opts: PipelineOptions,
    cache: DatasetCache<Datasets, C>,
    failure: Mutex<Option<Failure>>,
}

impl<F: Fetch> PollService<F> {
    pub fn new(fetcher: F, opts: PipelineOptions) -> Self {
        Self::with_clock(fetcher, opts, SystemClock)
    }
}

impl<F: Fetch, C: Clock> PollService<F, C> {
    pub fn with_clock(fetcher: F, opts: PipelineOptions, clock: C) -> Self {
        let cache = DatasetCache::with_clock(opts.ttl, clock);
        Self { fetcher, opts, cache, failure: Mutex::new(None) }
    }

    pub fn options(&self) -> &PipelineOptions {
        &self.opts
    }

    pub fn datasets(&self) -> PollResult<Arc<Datasets>> {
        self.datasets_with(None)
    }

    /// Same as `datasets`, reporting fetch progress on a cache miss.
    pub fn datasets_with(&self, progress: Option<&mut dyn Progress>) -> PollResult<Arc<Datasets>> {
        // Lock order: failure, then cache.
        let mut failure = self.failure_slot();
        if let Some(f) = failure.as_ref() {
            let since = self.cache.now().duration_since(f.at);
            if since < self.cache.ttl() {
                return Err(PollError::Backoff {
                    message: f.message.clone(),
                    retry_in: (self.cache.ttl() - since).as_secs(),
                });
            }
        }

        let result = self
            .cache
            .get_or_refresh(|| scrape::collect_all(&self.fetcher, &self.opts, progress));
        match &result {
            Ok(_) => *failure = None,
            Err(e) => {
                warn!("load failed, holding off for {:?}", self.cache.ttl());
                *failure = Some(Failure { at: self.cache.now(), message: e.to_string() });
            }
        }
        result
    }

    /// Failure collapses to four empty datasets; check `is_empty()` and
    /// `last_error()`.
    pub fn datasets_or_empty(&self, progress: Option<&mut dyn Progress>) -> Arc<Datasets> {
        match self.datasets_with(progress) {
            Ok(ds) => ds,
            Err(e @ PollError::Backoff { .. }) => {
                debug!("serving empty datasets: {e}");
                Arc::new(Datasets::empty())
            }
            Err(e) => {
                error!("serving empty datasets: {e}");
                Arc::new(Datasets::empty())
            }
        }
    }

    /// Message of the last failed load, while it is still holding off fetches.
    pub fn last_error(&self) -> Option<String> {
        self.failure_slot().as_ref().map(|f| f.message.clone())
    }

    /// Age of the cached result, if any.
    pub fn age(&self) -> Option<Duration> {
        self.cache.age()
    }

    /// Forget the cached result and any recorded failure; the next call
    /// refetches.
    pub fn invalidate(&self) {
        let mut failure = self.failure_slot();
        *failure = None;
        self.cache.invalidate();
    }

    fn failure_slot(&self) -> MutexGuard<'_, Option<Failure>> {
        self.failure.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
