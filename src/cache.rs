// src/cache.rs
//
// Single-slot, time-expiring memo for the whole pipeline result.
//
// The slot lock is held across a refresh, so a reader either gets the old
// value (before expiry) or waits for the new one; nobody sees half of each.
// Values are handed out as `Arc<T>` so a caller's snapshot stays whole even
// after the slot is replaced.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use tracing::{debug, info};

pub trait Clock {
    fn now(&self) -> Instant;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Clock that only moves when told to.
pub struct ManualClock {
    start: Instant,
    offset: Mutex<Duration>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self { start: Instant::now(), offset: Mutex::new(Duration::ZERO) }
    }

    pub fn advance(&self, by: Duration) {
        let mut off = self.offset.lock().unwrap_or_else(PoisonError::into_inner);
        *off += by;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.start + *self.offset.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<C: Clock + ?Sized> Clock for Arc<C> {
    fn now(&self) -> Instant {
        (**self).now()
    }
}

struct Entry<T> {
    value: Arc<T>,
    refreshed_at: Instant,
}

pub struct DatasetCache<T, C = SystemClock> {
    ttl: Duration,
    clock: C,
    slot: Mutex<Option<Entry<T>>>,
}

impl<T> DatasetCache<T, SystemClock> {
    pub fn new(ttl: Duration) -> Self {
        Self::with_clock(ttl, SystemClock)
    }
}

impl<T, C: Clock> DatasetCache<T, C> {
    pub fn with_clock(ttl: Duration, clock: C) -> Self {
        Self { ttl, clock, slot: Mutex::new(None) }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Return the cached value if it is younger than the TTL, otherwise run
    /// `refresh` and store its result.
    ///
    /// A failed refresh stores nothing and returns the error; an expired value
    /// is never handed out. `refresh` must not touch this cache.
    pub fn get_or_refresh<E>(&self, refresh: impl FnOnce() -> Result<T, E>) -> Result<Arc<T>, E> {
        let mut slot = self.lock();

        if let Some(entry) = slot.as_ref() {
            let age = self.clock.now().duration_since(entry.refreshed_at);
            if age < self.ttl {
                debug!("cache hit (age {:?})", age);
                return Ok(Arc::clone(&entry.value));
            }
            info!("cache expired (age {:?}), refreshing", age);
        } else {
            info!("cache cold, loading");
        }

        let value = Arc::new(refresh()?);
        *slot = Some(Entry { value: Arc::clone(&value), refreshed_at: self.clock.now() });
        Ok(value)
    }

    /// Current time on this cache's clock.
    pub fn now(&self) -> Instant {
        self.clock.now()
    }

    /// Age of the stored value, fresh or not.
    pub fn age(&self) -> Option<Duration> {
        self.lock()
            .as_ref()
            .map(|e| self.clock.now().duration_since(e.refreshed_at))
    }

    /// Drop the stored value; the next `get_or_refresh` reloads.
    pub fn invalidate(&self) {
        *self.lock() = None;
    }

    fn lock(&self) -> MutexGuard<'_, Option<Entry<T>>> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    const TTL: Duration = Duration::from_secs(1800);

    fn cache() -> (DatasetCache<u32, Arc<ManualClock>>, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new());
        (DatasetCache::with_clock(TTL, Arc::clone(&clock)), clock)
    }

    #[test]
    fn hit_within_ttl() {
        let (c, clock) = cache();
        let calls = Cell::new(0);
        let load = || -> Result<u32, ()> {
            calls.set(calls.get() + 1);
            Ok(calls.get())
        };

        assert_eq!(*c.get_or_refresh(load).unwrap(), 1);
        clock.advance(Duration::from_secs(1799));
        assert_eq!(*c.get_or_refresh(load).unwrap(), 1);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn refresh_after_ttl_replaces_value() {
        let (c, clock) = cache();
        let calls = Cell::new(0);
        let load = || -> Result<u32, ()> {
            calls.set(calls.get() + 1);
            Ok(calls.get() * 10)
        };

        let old = c.get_or_refresh(load).unwrap();
        clock.advance(TTL);
        let new = c.get_or_refresh(load).unwrap();
        assert_eq!((*old, *new), (10, 20));
        assert_eq!(calls.get(), 2);
        // fresh again
        assert_eq!(*c.get_or_refresh(load).unwrap(), 20);
    }

    #[test]
    fn failure_is_not_stored() {
        let (c, clock) = cache();
        assert_eq!(c.get_or_refresh(|| Err::<u32, _>("down")).unwrap_err(), "down");
        assert!(c.age().is_none());

        assert_eq!(*c.get_or_refresh(|| Ok::<_, &str>(7)).unwrap(), 7);
        clock.advance(TTL + Duration::from_secs(1));
        // expired value is not served when the reload fails
        assert!(c.get_or_refresh(|| Err::<u32, _>("down")).is_err());
        assert!(c.age().is_some_and(|a| a > TTL));
        assert_eq!(*c.get_or_refresh(|| Ok::<_, &str>(8)).unwrap(), 8);
    }

    #[test]
    fn invalidate_forces_reload() {
        let (c, _clock) = cache();
        c.get_or_refresh(|| Ok::<_, ()>(1)).unwrap();
        c.invalidate();
        assert_eq!(c.age(), None);
        assert_eq!(*c.get_or_refresh(|| Ok::<_, ()>(2)).unwrap(), 2);
    }
}
