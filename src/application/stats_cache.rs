//! Mtime-keyed cache for the catalog aggregates.
//!
//! Every `get()` stats the backing document. The expensive part — loading
//! the whole document and recomputing the aggregates — only runs when the
//! observed modification time is strictly newer than the one the cached
//! entry was computed at. An equal timestamp is a hit: repeated reads with
//! no intervening write never touch `load()`.

use std::sync::Arc;
use std::time::SystemTime;

use tokio::sync::Mutex;
use tracing::debug;

use crate::{
    domain::{errors::DomainError, stats, stats::Stats},
    infrastructure::ItemStore,
};

#[derive(Debug, Default)]
struct CacheEntry {
    stats: Option<Stats>,
    source_version: Option<SystemTime>,
}

impl CacheEntry {
    /// A hit requires a populated entry whose version is at least as new
    /// as the observed one.
    fn fresh_stats(&self, observed: SystemTime) -> Option<Stats> {
        match (self.stats, self.source_version) {
            (Some(stats), Some(version)) if observed <= version => Some(stats),
            _ => None,
        }
    }
}

/// One cache per process, constructed at startup and shared by reference.
pub struct StatsCache {
    store: Arc<dyn ItemStore>,
    entry: Mutex<CacheEntry>,
}

impl StatsCache {
    pub fn new(store: Arc<dyn ItemStore>) -> Self {
        Self {
            store,
            entry: Mutex::new(CacheEntry::default()),
        }
    }

    /// Returns stats for the current document content.
    ///
    /// The freshness check, the comparison, and the conditional
    /// reload+recompute all run under the entry lock, so concurrent callers
    /// are serialized and the entry is only ever replaced whole.
    pub async fn get(&self) -> Result<Stats, DomainError> {
        let mut entry = self.entry.lock().await;

        let observed = self.store.last_modified().await?;
        if let Some(stats) = entry.fresh_stats(observed) {
            debug!(total = stats.total, "stats cache hit");
            return Ok(stats);
        }

        let items = self.store.load().await?;
        let stats = stats::compute(&items);
        entry.stats = Some(stats);
        entry.source_version = Some(observed);
        debug!(total = stats.total, "stats cache refreshed");

        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex as StdMutex;
    use std::time::Duration;

    use async_trait::async_trait;

    use super::*;
    use crate::domain::item::{Item, NewItem};

    /// Store double with a settable mtime and load/stat counters.
    struct ScriptedStore {
        items: StdMutex<Vec<Item>>,
        modified: StdMutex<SystemTime>,
        loads: AtomicUsize,
        stats_checks: AtomicUsize,
        fail_stat: StdMutex<bool>,
    }

    impl ScriptedStore {
        fn new(items: Vec<Item>) -> Self {
            Self {
                items: StdMutex::new(items),
                modified: StdMutex::new(SystemTime::UNIX_EPOCH + Duration::from_secs(100)),
                loads: AtomicUsize::new(0),
                stats_checks: AtomicUsize::new(0),
                fail_stat: StdMutex::new(false),
            }
        }

        fn write(&self, items: Vec<Item>, advance: Duration) {
            *self.items.lock().unwrap() = items;
            let mut modified = self.modified.lock().unwrap();
            *modified += advance;
        }

        fn load_count(&self) -> usize {
            self.loads.load(Ordering::SeqCst)
        }

        fn stat_count(&self) -> usize {
            self.stats_checks.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ItemStore for ScriptedStore {
        async fn load(&self) -> Result<Vec<Item>, DomainError> {
            self.loads.fetch_add(1, Ordering::SeqCst);
            Ok(self.items.lock().unwrap().clone())
        }

        async fn last_modified(&self) -> Result<SystemTime, DomainError> {
            self.stats_checks.fetch_add(1, Ordering::SeqCst);
            if *self.fail_stat.lock().unwrap() {
                return Err(DomainError::storage("stat error"));
            }
            Ok(*self.modified.lock().unwrap())
        }

        async fn append(&self, _item: NewItem) -> Result<Item, DomainError> {
            unimplemented!("not used by the cache")
        }
    }

    fn priced(prices: &[f64]) -> Vec<Item> {
        prices
            .iter()
            .enumerate()
            .map(|(i, price)| Item {
                id: i as u64 + 1,
                name: format!("item-{i}"),
                price: *price,
            })
            .collect()
    }

    #[tokio::test]
    async fn unchanged_version_loads_at_most_once() {
        let store = Arc::new(ScriptedStore::new(priced(&[5.0, 15.0])));
        let cache = StatsCache::new(store.clone());

        let first = cache.get().await.unwrap();
        let second = cache.get().await.unwrap();

        assert_eq!(first, second);
        assert_eq!(first.total, 2);
        assert_eq!(first.average_price, 10.0);
        assert_eq!(store.load_count(), 1);
    }

    #[tokio::test]
    async fn freshness_is_checked_even_on_hits() {
        let store = Arc::new(ScriptedStore::new(priced(&[1.0])));
        let cache = StatsCache::new(store.clone());

        cache.get().await.unwrap();
        cache.get().await.unwrap();
        cache.get().await.unwrap();

        assert_eq!(store.stat_count(), 3);
        assert_eq!(store.load_count(), 1);
    }

    #[tokio::test]
    async fn newer_version_forces_a_recompute() {
        let store = Arc::new(ScriptedStore::new(priced(&[10.0, 20.0, 30.0])));
        let cache = StatsCache::new(store.clone());

        let stale = cache.get().await.unwrap();
        assert_eq!(stale.average_price, 20.0);

        store.write(priced(&[100.0]), Duration::from_secs(1));

        let fresh = cache.get().await.unwrap();
        assert_eq!(fresh.total, 1);
        assert_eq!(fresh.average_price, 100.0);
        assert_eq!(store.load_count(), 2);
    }

    #[tokio::test]
    async fn equal_version_is_treated_as_unchanged() {
        let store = Arc::new(ScriptedStore::new(priced(&[3.0])));
        let cache = StatsCache::new(store.clone());

        cache.get().await.unwrap();
        // Content swap without an mtime advance stays invisible, matching
        // the timestamp-only freshness contract.
        store.write(priced(&[999.0]), Duration::ZERO);

        let stats = cache.get().await.unwrap();
        assert_eq!(stats.average_price, 3.0);
        assert_eq!(store.load_count(), 1);
    }

    #[tokio::test]
    async fn repeated_gets_return_identical_stats() {
        let store = Arc::new(ScriptedStore::new(priced(&[7.0, 11.0, 13.0])));
        let cache = StatsCache::new(store);

        let first = cache.get().await.unwrap();
        for _ in 0..5 {
            assert_eq!(cache.get().await.unwrap(), first);
        }
    }

    #[tokio::test]
    async fn stat_failure_propagates_without_clobbering_the_entry() {
        let store = Arc::new(ScriptedStore::new(priced(&[2.0])));
        let cache = StatsCache::new(store.clone());

        let good = cache.get().await.unwrap();

        *store.fail_stat.lock().unwrap() = true;
        let err = cache.get().await.unwrap_err();
        assert!(matches!(err, DomainError::Storage(_)));

        *store.fail_stat.lock().unwrap() = false;
        assert_eq!(cache.get().await.unwrap(), good);
        assert_eq!(store.load_count(), 1);
    }

    #[tokio::test]
    async fn concurrent_gets_are_serialized() {
        let store = Arc::new(ScriptedStore::new(priced(&[4.0, 6.0])));
        let cache = Arc::new(StatsCache::new(store.clone()));

        let mut handles = Vec::new();
        for _ in 0..8 {
            let cache = cache.clone();
            handles.push(tokio::spawn(async move { cache.get().await }));
        }

        for handle in handles {
            let stats = handle.await.unwrap().unwrap();
            assert_eq!(stats.total, 2);
            assert_eq!(stats.average_price, 5.0);
        }

        // All eight observed the same version, so only the first reloads.
        assert_eq!(store.load_count(), 1);
    }
}
