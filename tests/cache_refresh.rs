// tests/cache_refresh.rs
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use poll_scrape::cache::ManualClock;
use poll_scrape::config::options::PipelineOptions;
use poll_scrape::core::Fetch;
use poll_scrape::{PollError, PollResult, PollService};

const PAGE: &str = include_str!("fixtures/polls.html");

/// Counts GETs; can be switched to fail like a dead network.
#[derive(Default)]
struct Flaky {
    calls: AtomicUsize,
    down: AtomicBool,
}

impl Fetch for Flaky {
    fn get(&self, url: &str) -> PollResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.down.load(Ordering::SeqCst) {
            return Err(PollError::Status { status: 503, url: url.to_string() });
        }
        Ok(PAGE.to_string())
    }
}

fn service<'a>(fetcher: &'a Flaky, clock: &Arc<ManualClock>) -> PollService<&'a Flaky, Arc<ManualClock>> {
    PollService::with_clock(fetcher, PipelineOptions::default(), Arc::clone(clock))
}

#[test]
fn within_ttl_is_one_load() {
    let fetcher = Flaky::default();
    let clock = Arc::new(ManualClock::new());
    let svc = service(&fetcher, &clock);

    let a = svc.datasets().unwrap();
    clock.advance(Duration::from_secs(29 * 60));
    let b = svc.datasets().unwrap();

    assert_eq!(fetcher.calls.load(Ordering::SeqCst), 2);
    assert!(Arc::ptr_eq(&a, &b));
}

#[test]
fn expiry_refetches_both_rounds() {
    let fetcher = Flaky::default();
    let clock = Arc::new(ManualClock::new());
    let svc = service(&fetcher, &clock);

    let a = svc.datasets().unwrap();
    clock.advance(Duration::from_secs(30 * 60 + 1));
    let b = svc.datasets().unwrap();

    assert_eq!(fetcher.calls.load(Ordering::SeqCst), 4);
    assert!(!Arc::ptr_eq(&a, &b));
    assert_eq!(*a, *b);
}

#[test]
fn failure_serves_empty_and_caches_nothing() {
    let fetcher = Flaky::default();
    fetcher.down.store(true, Ordering::SeqCst);
    let clock = Arc::new(ManualClock::new());
    let svc = service(&fetcher, &clock);

    assert!(svc.datasets_or_empty(None).is_empty());
    assert!(svc.age().is_none());
    assert!(svc.last_error().is_some_and(|e| e.contains("503")));

    // network back: the next load waits for the ttl
    fetcher.down.store(false, Ordering::SeqCst);
    assert!(svc.datasets_or_empty(None).is_empty());
    clock.advance(Duration::from_secs(30 * 60));
    let ds = svc.datasets_or_empty(None);
    assert!(!ds.is_empty());
    assert_eq!(ds.runoff.raw.len(), 4);
    assert_eq!(svc.last_error(), None);
}

#[test]
fn failed_load_is_not_retried_every_call() {
    let fetcher = Flaky::default();
    fetcher.down.store(true, Ordering::SeqCst);
    let clock = Arc::new(ManualClock::new());
    let svc = service(&fetcher, &clock);

    assert!(matches!(svc.datasets(), Err(PollError::Status { status: 503, .. })));
    for _ in 0..4 {
        match svc.datasets() {
            Err(PollError::Backoff { retry_in, .. }) => assert_eq!(retry_in, 30 * 60),
            other => panic!("unexpected: {other:?}"),
        }
    }
    // the first round fails, so the runoff is never requested
    assert_eq!(fetcher.calls.load(Ordering::SeqCst), 1);

    clock.advance(Duration::from_secs(30 * 60));
    assert!(svc.datasets().is_err());
    assert_eq!(fetcher.calls.load(Ordering::SeqCst), 2);
}

#[test]
fn refresh_clears_the_hold_off() {
    let fetcher = Flaky::default();
    fetcher.down.store(true, Ordering::SeqCst);
    let clock = Arc::new(ManualClock::new());
    let svc = service(&fetcher, &clock);

    assert!(svc.datasets().is_err());
    fetcher.down.store(false, Ordering::SeqCst);
    svc.invalidate();
    assert!(svc.datasets().is_ok());
    assert_eq!(fetcher.calls.load(Ordering::SeqCst), 3);
}

#[test]
fn invalidate_forces_reload() {
    let fetcher = Flaky::default();
    let clock = Arc::new(ManualClock::new());
    let svc = service(&fetcher, &clock);

    svc.datasets().unwrap();
    svc.invalidate();
    svc.datasets().unwrap();
    assert_eq!(fetcher.calls.load(Ordering::SeqCst), 4);
}
