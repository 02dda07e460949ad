//! Time-boxed cache for the trending GIF list
//!
//! One entry lives under a single key. Reading collapses "missing", "expired"
//! and "corrupt" into `None`; expired and corrupt entries are deleted on the
//! way out so they are never parsed twice.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::store::{KeyValueStore, StoreError};
use crate::config::CacheConfig;
use crate::data::GifImage;

/// Source of the current instant
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Persisted form of the cached trending list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry {
    /// Trending GIFs in upstream order
    pub data: Vec<GifImage>,
    /// When the entry was written, as epoch milliseconds
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
}

/// Why a read produced no data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Miss {
    Absent,
    Expired,
    Corrupt,
    Unreadable,
}

/// Cache for the single trending entry
#[derive(Clone)]
pub struct TrendingCache {
    store: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
    config: CacheConfig,
    /// `config.ttl` as a signed duration, saturated when out of range
    ttl: chrono::Duration,
}

impl std::fmt::Debug for TrendingCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrendingCache")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl TrendingCache {
    /// Creates a cache over `store` using wall-clock time
    pub fn new(store: Arc<dyn KeyValueStore>, config: CacheConfig) -> Self {
        Self::with_clock(store, config, Arc::new(SystemClock))
    }

    /// Creates a cache with an explicit clock
    pub fn with_clock(
        store: Arc<dyn KeyValueStore>,
        config: CacheConfig,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let ttl = chrono::Duration::from_std(config.ttl).unwrap_or_else(|_| {
            warn!(ttl = ?config.ttl, "Cache TTL out of range; entries will not expire");
            chrono::Duration::milliseconds(i64::MAX)
        });
        Self {
            store,
            clock,
            config,
            ttl,
        }
    }

    /// Returns the cached trending list if it is present, parseable and fresh
    pub fn read(&self) -> Option<Vec<GifImage>> {
        self.lookup().ok()
    }

    /// Reads the entry and reports why nothing was returned
    ///
    /// Expired and corrupt entries are removed from the store before
    /// returning. A store read failure is logged and reported as a miss.
    pub fn lookup(&self) -> Result<Vec<GifImage>, Miss> {
        let key = &self.config.key;

        let raw = match self.store.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!(key = %key, "Trending cache miss");
                return Err(Miss::Absent);
            }
            Err(e) => {
                warn!(key = %key, error = %e, "Failed to read cached trending data");
                return Err(Miss::Unreadable);
            }
        };

        let entry: CacheEntry = match serde_json::from_str(&raw) {
            Ok(entry) => entry,
            Err(e) => {
                warn!(key = %key, error = %e, "Failed to parse cached trending data");
                self.remove();
                return Err(Miss::Corrupt);
            }
        };

        if self.is_fresh(entry.timestamp) {
            debug!(key = %key, count = entry.data.len(), "Trending cache hit");
            Ok(entry.data)
        } else {
            debug!(key = %key, cached_at = %entry.timestamp, "Trending cache expired");
            self.remove();
            Err(Miss::Expired)
        }
    }

    /// Replaces the cached entry with `data` stamped with the current instant
    pub fn write(&self, data: &[GifImage]) -> Result<(), StoreError> {
        let entry = CacheEntry {
            data: data.to_vec(),
            timestamp: self.clock.now(),
        };
        let json = serde_json::to_string(&entry)
            .map_err(|e| StoreError::Unavailable(format!("cannot encode cache entry: {e}")))?;

        self.store.set(&self.config.key, &json)?;
        info!(key = %self.config.key, count = data.len(), "Trending data cached");
        Ok(())
    }

    /// Deletes the entry; removing an absent entry succeeds
    pub fn clear(&self) -> Result<(), StoreError> {
        self.store.delete(&self.config.key)?;
        info!(key = %self.config.key, "Trending cache cleared");
        Ok(())
    }

    /// Deletes the entry, logging rather than propagating failures
    pub fn remove(&self) {
        if let Err(e) = self.clear() {
            warn!(key = %self.config.key, error = %e, "Failed to remove cached trending data");
        }
    }

    /// An entry is fresh while `now - timestamp < ttl`
    fn is_fresh(&self, timestamp: DateTime<Utc>) -> bool {
        self.clock.now() - timestamp < self.ttl
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::cache::store::MemoryStore;
    use std::sync::Mutex;
    use std::time::Duration as StdDuration;

    /// Clock that only moves when told to
    #[derive(Debug)]
    pub(crate) struct ManualClock {
        now: Mutex<DateTime<Utc>>,
    }

    impl ManualClock {
        pub(crate) fn new(now: DateTime<Utc>) -> Self {
            Self {
                now: Mutex::new(now),
            }
        }

        pub(crate) fn advance(&self, by: chrono::Duration) {
            let mut now = self.now.lock().unwrap();
            *now = *now + by;
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> DateTime<Utc> {
            *self.now.lock().unwrap()
        }
    }

    /// Memory store whose reads or deletes can be made to fail
    #[derive(Debug, Default)]
    pub(crate) struct FaultyStore {
        inner: MemoryStore,
        fail_get: bool,
        fail_delete: bool,
    }

    impl FaultyStore {
        pub(crate) fn failing_get_and_delete() -> Self {
            Self {
                fail_get: true,
                fail_delete: true,
                ..Self::default()
            }
        }

        pub(crate) fn failing_delete() -> Self {
            Self {
                fail_delete: true,
                ..Self::default()
            }
        }
    }

    impl KeyValueStore for FaultyStore {
        fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
            if self.fail_get {
                return Err(StoreError::Unavailable("get refused".to_string()));
            }
            self.inner.get(key)
        }

        fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
            self.inner.set(key, value)
        }

        fn delete(&self, key: &str) -> Result<(), StoreError> {
            if self.fail_delete {
                return Err(StoreError::Unavailable("delete refused".to_string()));
            }
            self.inner.delete(key)
        }
    }

    fn start_time() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2026-10-19T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    fn images(ids: &[&str]) -> Vec<GifImage> {
        ids.iter()
            .map(|id| GifImage {
                id: id.to_string(),
                title: format!("gif {id}"),
                image_url: format!("https://media.giphy.com/{id}.gif"),
            })
            .collect()
    }

    fn create_test_cache() -> (TrendingCache, Arc<MemoryStore>, Arc<ManualClock>) {
        let store = Arc::new(MemoryStore::new());
        let clock = Arc::new(ManualClock::new(start_time()));
        let cache = TrendingCache::with_clock(store.clone(), CacheConfig::default(), clock.clone());
        (cache, store, clock)
    }

    #[test]
    fn test_read_returns_none_when_empty() {
        let (cache, _store, _clock) = create_test_cache();
        assert_eq!(cache.lookup(), Err(Miss::Absent));
        assert!(cache.read().is_none());
    }

    #[test]
    fn test_write_then_read_returns_data_in_order() {
        let (cache, _store, _clock) = create_test_cache();

        cache.write(&images(&["a", "b", "c"])).unwrap();

        assert_eq!(cache.read(), Some(images(&["a", "b", "c"])));
    }

    #[test]
    fn test_entry_is_fresh_just_before_ttl() {
        let (cache, store, clock) = create_test_cache();
        cache.write(&images(&["a"])).unwrap();

        clock.advance(chrono::Duration::seconds(1799));

        assert_eq!(cache.read(), Some(images(&["a"])));
        assert!(store.get("giphy_trending_cache").unwrap().is_some());
    }

    #[test]
    fn test_entry_expires_at_ttl_and_is_removed() {
        let (cache, store, clock) = create_test_cache();
        cache.write(&images(&["a"])).unwrap();

        clock.advance(chrono::Duration::seconds(1800));

        assert_eq!(cache.lookup(), Err(Miss::Expired));
        assert!(
            store.get("giphy_trending_cache").unwrap().is_none(),
            "Expired entry should be deleted"
        );
    }

    #[test]
    fn test_corrupt_entry_is_removed() {
        let (cache, store, _clock) = create_test_cache();
        store.set("giphy_trending_cache", "{not json").unwrap();

        assert_eq!(cache.lookup(), Err(Miss::Corrupt));
        assert!(store.get("giphy_trending_cache").unwrap().is_none());
    }

    #[test]
    fn test_wrong_shape_is_treated_as_corrupt() {
        let (cache, store, _clock) = create_test_cache();
        store
            .set("giphy_trending_cache", r#"{"data": "nope", "timestamp": 1}"#)
            .unwrap();

        assert_eq!(cache.lookup(), Err(Miss::Corrupt));
        assert!(store.get("giphy_trending_cache").unwrap().is_none());
    }

    #[test]
    fn test_timestamp_is_stored_as_epoch_millis() {
        let (cache, store, _clock) = create_test_cache();
        cache.write(&images(&["a"])).unwrap();

        let raw = store.get("giphy_trending_cache").unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();

        assert_eq!(
            value["timestamp"].as_i64(),
            Some(start_time().timestamp_millis())
        );
        assert_eq!(value["data"][0]["imageUrl"], "https://media.giphy.com/a.gif");
    }

    #[test]
    fn test_write_replaces_previous_entry() {
        let (cache, _store, clock) = create_test_cache();
        cache.write(&images(&["old"])).unwrap();
        clock.advance(chrono::Duration::seconds(1700));
        cache.write(&images(&["new"])).unwrap();

        // Fresh relative to the second write, not the first
        clock.advance(chrono::Duration::seconds(1700));

        assert_eq!(cache.read(), Some(images(&["new"])));
    }

    #[test]
    fn test_custom_key_and_ttl() {
        let store = Arc::new(MemoryStore::new());
        let clock = Arc::new(ManualClock::new(start_time()));
        let config = CacheConfig {
            key: "custom".to_string(),
            ttl: StdDuration::from_secs(10),
        };
        let cache = TrendingCache::with_clock(store.clone(), config, clock.clone());

        cache.write(&images(&["a"])).unwrap();
        assert!(store.get("custom").unwrap().is_some());

        clock.advance(chrono::Duration::seconds(10));
        assert!(cache.read().is_none());
    }

    #[test]
    fn test_unreadable_store_is_a_miss() {
        let store = Arc::new(FaultyStore::failing_get_and_delete());
        let cache = TrendingCache::new(store, CacheConfig::default());

        assert_eq!(cache.lookup(), Err(Miss::Unreadable));
        assert!(cache.read().is_none());
    }

    #[test]
    fn test_expired_entry_is_a_miss_even_when_delete_fails() {
        let store = Arc::new(FaultyStore::failing_delete());
        let clock = Arc::new(ManualClock::new(start_time()));
        let cache = TrendingCache::with_clock(store.clone(), CacheConfig::default(), clock.clone());
        cache.write(&images(&["stale"])).unwrap();

        clock.advance(chrono::Duration::minutes(31));

        assert_eq!(cache.lookup(), Err(Miss::Expired));
        assert!(store.get("giphy_trending_cache").unwrap().is_some());
    }

    #[test]
    fn test_corrupt_entry_is_a_miss_even_when_delete_fails() {
        let store = Arc::new(FaultyStore::failing_delete());
        let cache = TrendingCache::new(store.clone(), CacheConfig::default());
        store.set("giphy_trending_cache", "[[[").unwrap();

        assert_eq!(cache.lookup(), Err(Miss::Corrupt));
    }

    #[test]
    fn test_clear_removes_entry() {
        let (cache, store, _clock) = create_test_cache();
        cache.write(&images(&["a"])).unwrap();

        cache.clear().unwrap();

        assert!(store.get("giphy_trending_cache").unwrap().is_none());
        assert!(cache.clear().is_ok(), "Clearing twice should succeed");
    }

    #[test]
    fn test_clear_propagates_delete_failure() {
        let store = Arc::new(FaultyStore::failing_delete());
        let cache = TrendingCache::new(store, CacheConfig::default());

        assert!(matches!(cache.clear(), Err(StoreError::Unavailable(_))));
    }

    #[test]
    fn test_out_of_range_ttl_never_expires() {
        let store = Arc::new(MemoryStore::new());
        let clock = Arc::new(ManualClock::new(start_time()));
        let config = CacheConfig {
            key: "forever".to_string(),
            ttl: StdDuration::MAX,
        };
        let cache = TrendingCache::with_clock(store, config, clock.clone());
        cache.write(&images(&["a"])).unwrap();

        clock.advance(chrono::Duration::days(365 * 100));

        assert_eq!(cache.read(), Some(images(&["a"])));
    }
}
