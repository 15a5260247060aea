//! Single-entry tariff cache with request deduplication.
//!
//! At most one fetch is in flight at any time. Callers arriving while a fetch
//! is pending attach to the same shared future and receive the identical
//! outcome. A successful result (including "no tariffs") is memoized; a
//! failure is not, so the next call starts a new fetch.

use chrono::{DateTime, Utc};
use futures::future::{BoxFuture, FutureExt, Shared};
use log::{debug, warn};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use super::tariffs_errors::TariffError;
use super::tariffs_fetcher::TariffFetcher;
use super::tariffs_model::TariffSnapshot;
use crate::clock::{Clock, SystemClock};

type FetchResult = Result<Option<Arc<TariffSnapshot>>, TariffError>;
type SharedFetch = Shared<BoxFuture<'static, FetchResult>>;

/// Expiry policy for the memoized snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CachePolicy {
    /// `None` keeps the snapshot for the lifetime of the cache.
    pub ttl: Option<Duration>,
}

impl CachePolicy {
    pub fn with_ttl(ttl: Duration) -> Self {
        Self { ttl: Some(ttl) }
    }
}

struct CachedTariffs {
    snapshot: Option<Arc<TariffSnapshot>>,
    stored_at: DateTime<Utc>,
}

#[derive(Default)]
struct CacheState {
    entry: Option<CachedTariffs>,
    in_flight: Option<SharedFetch>,
    /// Bumped on reset; fetches started under an older generation never write back.
    generation: u64,
}

/// Memoizes the latest tariff snapshot and deduplicates concurrent fetches.
pub struct TariffCache {
    fetcher: Arc<TariffFetcher>,
    clock: Arc<dyn Clock>,
    policy: CachePolicy,
    state: Arc<Mutex<CacheState>>,
}

impl TariffCache {
    pub fn new(fetcher: Arc<TariffFetcher>) -> Self {
        Self {
            fetcher,
            clock: Arc::new(SystemClock),
            policy: CachePolicy::default(),
            state: Arc::new(Mutex::new(CacheState::default())),
        }
    }

    pub fn with_policy(mut self, policy: CachePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Lock the state, recovering from poison.
    ///
    /// The state is only ever replaced wholesale, so a poisoned guard still
    /// holds a consistent value.
    fn lock_state(state: &Mutex<CacheState>) -> MutexGuard<'_, CacheState> {
        state.lock().unwrap_or_else(|poisoned| {
            warn!("Tariff cache mutex was poisoned, recovering");
            poisoned.into_inner()
        })
    }

    fn is_fresh(&self, entry: &CachedTariffs) -> bool {
        match self.policy.ttl {
            None => true,
            Some(ttl) => {
                let elapsed = (self.clock.now() - entry.stored_at)
                    .to_std()
                    .unwrap_or(Duration::ZERO);
                elapsed < ttl
            }
        }
    }

    /// The memoized snapshot without triggering a fetch.
    ///
    /// `None` when nothing is cached; `Some(None)` when the backend was
    /// reached and had no tariffs.
    pub fn peek(&self) -> Option<Option<Arc<TariffSnapshot>>> {
        let state = Self::lock_state(&self.state);
        state
            .entry
            .as_ref()
            .filter(|entry| self.is_fresh(entry))
            .map(|entry| entry.snapshot.clone())
    }

    /// Return the cached snapshot, fetching it if needed.
    pub async fn get_snapshot(&self) -> FetchResult {
        let fetch = {
            let mut state = Self::lock_state(&self.state);

            if let Some(entry) = &state.entry {
                if self.is_fresh(entry) {
                    return Ok(entry.snapshot.clone());
                }
                debug!("Tariff cache entry expired");
                state.entry = None;
            }

            match &state.in_flight {
                Some(fetch) => {
                    debug!("Joining in-flight tariff fetch");
                    fetch.clone()
                }
                None => {
                    let fetch = self.spawn_fetch(state.generation);
                    state.in_flight = Some(fetch.clone());
                    fetch
                }
            }
        };

        fetch.await
    }

    /// Start a fetch on its own task so that no single caller can cancel it.
    fn spawn_fetch(&self, generation: u64) -> SharedFetch {
        let fetcher = Arc::clone(&self.fetcher);
        let state = Arc::clone(&self.state);
        let clock = Arc::clone(&self.clock);

        let handle = tokio::spawn(async move {
            let result = fetcher
                .fetch_latest_tariffs()
                .await
                .map(|snapshot| snapshot.map(Arc::new));

            {
                let mut guard = Self::lock_state(&state);
                if guard.generation == generation {
                    guard.in_flight = None;
                    match &result {
                        Ok(snapshot) => {
                            guard.entry = Some(CachedTariffs {
                                snapshot: snapshot.clone(),
                                stored_at: clock.now(),
                            });
                        }
                        Err(e) => warn!("Tariff fetch failed, not caching: {}", e),
                    }
                } else {
                    debug!("Discarding tariff fetch started before a reset");
                }
            }

            result
        });

        let state = Arc::clone(&self.state);
        async move {
            match handle.await {
                Ok(result) => result,
                Err(join_error) => {
                    let mut guard = Self::lock_state(&state);
                    if guard.generation == generation {
                        guard.in_flight = None;
                    }
                    Err(TariffError::FetchAborted(join_error.to_string()))
                }
            }
        }
        .boxed()
        .shared()
    }

    /// Drop the memoized snapshot and detach any in-flight fetch.
    pub fn reset(&self) {
        let mut state = Self::lock_state(&self.state);
        state.generation = state.generation.wrapping_add(1);
        state.entry = None;
        state.in_flight = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tariffs::TariffSourceTrait;
    use async_trait::async_trait;
    use ecollecto_catalog_api::TariffRecord;
    use rust_decimal_macros::dec;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct ManualClock(Mutex<DateTime<Utc>>);

    impl ManualClock {
        fn new() -> Self {
            Self(Mutex::new(Utc::now()))
        }

        fn advance(&self, by: Duration) {
            let mut now = self.0.lock().unwrap();
            *now += chrono::Duration::from_std(by).unwrap();
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> DateTime<Utc> {
            *self.0.lock().unwrap()
        }
    }

    type Outcome = Result<Option<Vec<TariffRecord>>, TariffError>;

    /// Returns scripted outcomes in order, repeating the last one.
    struct ScriptedSource {
        outcomes: Vec<Outcome>,
        calls: AtomicUsize,
        delay: Duration,
    }

    impl ScriptedSource {
        fn new(outcomes: Vec<Outcome>) -> Self {
            Self {
                outcomes,
                calls: AtomicUsize::new(0),
                delay: Duration::from_millis(0),
            }
        }

        fn with_delay(mut self, delay: Duration) -> Self {
            self.delay = delay;
            self
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl TariffSourceTrait for ScriptedSource {
        async fn fetch_tariff_records(&self) -> Outcome {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            let index = call.min(self.outcomes.len() - 1);
            self.outcomes[index].clone()
        }
    }

    fn records(year: i32, price: rust_decimal::Decimal) -> Outcome {
        let currencies = HashMap::from([(
            "UAH".to_string(),
            HashMap::from([("H".to_string(), price)]),
        )]);
        Ok(Some(vec![TariffRecord {
            year: Some(year),
            currencies: Some(currencies),
            ..Default::default()
        }]))
    }

    fn failure() -> Outcome {
        Err(TariffError::FetchFailed {
            message: "HTTP 503".to_string(),
            transient: true,
        })
    }

    fn cache_for(source: Arc<ScriptedSource>) -> TariffCache {
        TariffCache::new(Arc::new(TariffFetcher::new(source)))
    }

    #[tokio::test]
    async fn test_concurrent_callers_share_one_fetch() {
        let source = Arc::new(
            ScriptedSource::new(vec![records(2024, dec!(12.5))])
                .with_delay(Duration::from_millis(50)),
        );
        let cache = cache_for(source.clone());

        let results = futures::future::join_all((0..10).map(|_| cache.get_snapshot())).await;

        assert_eq!(source.calls(), 1);
        for result in results {
            let table = result.unwrap().unwrap();
            assert_eq!(table.latest.lookup("UAH", "H"), Some(dec!(12.5)));
        }
    }

    #[tokio::test]
    async fn test_resolved_table_is_never_refetched() {
        let source = Arc::new(ScriptedSource::new(vec![records(2024, dec!(12.5))]));
        let cache = cache_for(source.clone());

        cache.get_snapshot().await.unwrap();
        cache.get_snapshot().await.unwrap();
        cache.get_snapshot().await.unwrap();

        assert_eq!(source.calls(), 1);
    }

    #[tokio::test]
    async fn test_empty_result_is_memoized() {
        let source = Arc::new(ScriptedSource::new(vec![Ok(None), records(2024, dec!(1))]));
        let cache = cache_for(source.clone());

        assert!(cache.get_snapshot().await.unwrap().is_none());
        assert!(cache.get_snapshot().await.unwrap().is_none());
        assert_eq!(source.calls(), 1);
        assert_eq!(cache.peek(), Some(None));
    }

    #[tokio::test]
    async fn test_failure_is_not_cached() {
        let source = Arc::new(ScriptedSource::new(vec![failure(), records(2024, dec!(9))]));
        let cache = cache_for(source.clone());

        assert!(cache.get_snapshot().await.is_err());
        assert!(cache.peek().is_none());

        let table = cache.get_snapshot().await.unwrap().unwrap();
        assert_eq!(table.latest.lookup("UAH", "H"), Some(dec!(9)));
        assert_eq!(source.calls(), 2);
    }

    #[tokio::test]
    async fn test_concurrent_callers_share_the_same_failure() {
        let source = Arc::new(
            ScriptedSource::new(vec![failure()]).with_delay(Duration::from_millis(50)),
        );
        let cache = cache_for(source.clone());

        let results = futures::future::join_all((0..5).map(|_| cache.get_snapshot())).await;

        assert_eq!(source.calls(), 1);
        for result in results {
            assert_eq!(result, Err(failure().unwrap_err()));
        }
    }

    #[tokio::test]
    async fn test_abandoned_caller_does_not_cancel_fetch() {
        let source = Arc::new(
            ScriptedSource::new(vec![records(2024, dec!(12.5))])
                .with_delay(Duration::from_millis(50)),
        );
        let cache = cache_for(source.clone());

        let abandoned =
            tokio::time::timeout(Duration::from_millis(5), cache.get_snapshot()).await;
        assert!(abandoned.is_err());

        let table = cache.get_snapshot().await.unwrap().unwrap();
        assert_eq!(table.latest.lookup("UAH", "H"), Some(dec!(12.5)));
        assert_eq!(source.calls(), 1);
    }

    #[tokio::test]
    async fn test_ttl_expiry_refetches() {
        let source = Arc::new(ScriptedSource::new(vec![
            records(2023, dec!(10)),
            records(2024, dec!(12.5)),
        ]));
        let clock = Arc::new(ManualClock::new());
        let cache = cache_for(source.clone())
            .with_policy(CachePolicy::with_ttl(Duration::from_secs(60)))
            .with_clock(clock.clone());

        let first = cache.get_snapshot().await.unwrap().unwrap();
        assert_eq!(first.latest.year, Some(2023));

        clock.advance(Duration::from_secs(30));
        let cached = cache.get_snapshot().await.unwrap().unwrap();
        assert_eq!(cached.latest.year, Some(2023));
        assert_eq!(source.calls(), 1);

        clock.advance(Duration::from_secs(31));
        assert!(cache.peek().is_none());
        let refreshed = cache.get_snapshot().await.unwrap().unwrap();
        assert_eq!(refreshed.latest.year, Some(2024));
        assert_eq!(source.calls(), 2);
    }

    #[tokio::test]
    async fn test_reset_forces_refetch() {
        let source = Arc::new(ScriptedSource::new(vec![
            records(2023, dec!(10)),
            records(2024, dec!(12.5)),
        ]));
        let cache = cache_for(source.clone());

        cache.get_snapshot().await.unwrap();
        cache.reset();
        assert!(cache.peek().is_none());

        let table = cache.get_snapshot().await.unwrap().unwrap();
        assert_eq!(table.latest.year, Some(2024));
        assert_eq!(source.calls(), 2);
    }

    #[tokio::test]
    async fn test_fetch_detached_by_reset_does_not_write_back() {
        let source = Arc::new(
            ScriptedSource::new(vec![records(2023, dec!(10)), records(2024, dec!(12.5))])
                .with_delay(Duration::from_millis(30)),
        );
        let cache = cache_for(source.clone());

        let stale = tokio::time::timeout(Duration::from_millis(5), cache.get_snapshot()).await;
        assert!(stale.is_err());
        cache.reset();

        tokio::time::sleep(Duration::from_millis(60)).await;
        assert!(cache.peek().is_none());

        let table = cache.get_snapshot().await.unwrap().unwrap();
        assert_eq!(table.latest.year, Some(2024));
        assert_eq!(source.calls(), 2);
    }
}
