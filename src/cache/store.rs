//! Cache Store Module
//!
//! Synchronous cache engine combining HashMap storage with insertion-order
//! tracking, TTL expiry and a hard capacity bound.

use std::collections::HashMap;
use std::time::Duration;

use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::cache::{CacheEntry, CacheStats, InsertionOrder};
use crate::error::{CacheError, Result};

// == Cache Store ==
/// Bounded TTL storage with FIFO eviction.
///
/// None of the methods suspend. Expired entries are treated as absent the
/// moment their TTL elapses, even while still physically present.
#[derive(Debug)]
pub struct CacheStore<V> {
    /// Key-value storage
    entries: HashMap<String, CacheEntry<V>>,
    /// First-insertion order of keys
    order: InsertionOrder,
    /// Counters
    stats: CacheStats,
    /// Maximum number of entries allowed
    max_entries: usize,
    /// TTL used when a caller does not pass one
    default_ttl: Duration,
}

impl<V: Clone> CacheStore<V> {
    // == Constructor ==
    /// Creates a new CacheStore with the given capacity and default TTL.
    ///
    /// Callers are expected to have validated both values through
    /// [`CacheConfig::validate`](crate::config::CacheConfig::validate).
    pub fn new(max_entries: usize, default_ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            order: InsertionOrder::new(),
            stats: CacheStats::new(max_entries),
            max_entries,
            default_ttl,
        }
    }

    // == Set ==
    /// Inserts or overwrites a value.
    ///
    /// When the store is at capacity exactly one entry, the oldest inserted,
    /// is evicted first, whether or not `key` is already present. An
    /// overwrite resets the TTL and keeps the key's insertion slot unless
    /// the key itself was the one evicted, in which case it re-enters as
    /// the newest.
    ///
    /// # Arguments
    /// * `key` - The key to store
    /// * `value` - The value to store
    /// * `ttl` - Optional TTL (uses the default if None)
    ///
    /// # Errors
    /// `InvalidTtl` for a zero TTL or one longer than
    /// [`MAX_TTL`](crate::cache::MAX_TTL). The store is left untouched.
    pub fn set(&mut self, key: String, value: V, ttl: Option<Duration>) -> Result<()> {
        let ttl = ttl.unwrap_or(self.default_ttl);
        let entry = CacheEntry::new(value, ttl)?;

        if self.entries.len() >= self.max_entries {
            if let Some(evicted) = self.order.pop_oldest() {
                self.entries.remove(&evicted);
                self.stats.record_eviction();
                warn!(evicted = %evicted, "Cache full, evicting oldest entry");
            }
        }

        self.entries.insert(key.clone(), entry);
        self.order.push(&key);
        self.stats.set_total_entries(self.entries.len());

        debug!(key = %key, ttl_secs = ttl.as_secs_f64(), "Cache set");
        Ok(())
    }

    // == Get ==
    /// Returns the value if present and unexpired.
    ///
    /// An expired entry is removed as a side effect and reported as absent.
    pub fn get(&mut self, key: &str) -> Option<V> {
        if !self.check_live(key) {
            self.stats.record_miss();
            return None;
        }

        let value = self.entries.get(key).map(|entry| entry.value.clone());
        self.stats.record_hit();
        debug!(key = %key, "Cache hit");
        value
    }

    /// Like [`get`](Self::get) but leaves the hit and miss counters alone.
    pub fn peek(&mut self, key: &str) -> Option<V> {
        if !self.check_live(key) {
            return None;
        }
        self.entries.get(key).map(|entry| entry.value.clone())
    }

    // == Contains ==
    /// Same expiry semantics as [`get`](Self::get) without cloning the value.
    pub fn contains(&mut self, key: &str) -> bool {
        self.check_live(key)
    }

    // == Delete ==
    /// Removes an entry, returning whether one was present.
    pub fn delete(&mut self, key: &str) -> bool {
        let removed = self.entries.remove(key).is_some();
        if removed {
            self.order.remove(key);
            self.stats.set_total_entries(self.entries.len());
        }
        removed
    }

    // == Clear ==
    /// Removes every entry unconditionally.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
        self.stats.set_total_entries(0);
        info!("Cache cleared");
    }

    // == Purge Expired ==
    /// Removes all expired entries, read or not.
    ///
    /// Returns the number of entries removed.
    pub fn purge_expired(&mut self) -> usize {
        let now = Instant::now();
        let expired: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired_at(now))
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired {
            self.entries.remove(key);
            self.order.remove(key);
        }

        self.stats.record_expirations(expired.len());
        self.stats.set_total_entries(self.entries.len());
        expired.len()
    }

    // == Stats ==
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    /// Keys currently stored, oldest first. May include expired keys that
    /// have not been swept yet.
    pub fn keys(&self) -> Vec<String> {
        self.order.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns true if `key` holds a live entry, lazily deleting it when expired.
    fn check_live(&mut self, key: &str) -> bool {
        let expired = match self.entries.get(key) {
            None => return false,
            Some(entry) => entry.is_expired(),
        };

        if expired {
            self.entries.remove(key);
            self.order.remove(key);
            self.stats.record_expirations(1);
            self.stats.set_total_entries(self.entries.len());
            debug!(key = %key, "Cache entry expired");
            return false;
        }
        true
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    const TTL: Duration = Duration::from_secs(300);

    fn store(max_entries: usize) -> CacheStore<String> {
        CacheStore::new(max_entries, TTL)
    }

    #[test]
    fn test_store_new() {
        let store = store(100);
        assert_eq!(store.len(), 0);
        assert!(store.is_empty());
    }

    #[test]
    fn test_store_set_and_get() {
        let mut store = store(100);

        store.set("key1".to_string(), "value1".to_string(), None).unwrap();

        assert_eq!(store.get("key1"), Some("value1".to_string()));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_get_nonexistent() {
        let mut store = store(100);
        assert_eq!(store.get("nonexistent"), None);
        assert_eq!(store.get("nonexistent"), None);
        assert_eq!(store.stats().misses, 2);
    }

    #[test]
    fn test_store_zero_ttl_rejected() {
        let mut store = store(100);

        let result = store.set("key".to_string(), "v".to_string(), Some(Duration::ZERO));

        assert_eq!(result, Err(CacheError::InvalidTtl));
        assert!(store.is_empty());
    }

    #[test]
    fn test_store_delete() {
        let mut store = store(100);

        store.set("key1".to_string(), "value1".to_string(), None).unwrap();

        assert!(store.delete("key1"));
        assert!(!store.delete("key1"));
        assert!(store.is_empty());
        assert_eq!(store.get("key1"), None);
    }

    #[test]
    fn test_store_overwrite() {
        let mut store = store(100);

        store.set("key1".to_string(), "value1".to_string(), None).unwrap();
        store.set("key1".to_string(), "value2".to_string(), None).unwrap();

        assert_eq!(store.get("key1"), Some("value2".to_string()));
        assert_eq!(store.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_store_ttl_expiration() {
        let mut store = store(100);

        store
            .set("key1".to_string(), "value1".to_string(), Some(Duration::from_secs(1)))
            .unwrap();
        assert!(store.get("key1").is_some());

        tokio::time::advance(Duration::from_secs(1)).await;

        assert_eq!(store.get("key1"), None);
        // Lazy expiry removed the entry physically too
        assert_eq!(store.len(), 0);
        assert_eq!(store.stats().expirations, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_store_contains_lazily_expires() {
        let mut store = store(100);

        store
            .set("key1".to_string(), "value1".to_string(), Some(Duration::from_secs(2)))
            .unwrap();
        assert!(store.contains("key1"));

        tokio::time::advance(Duration::from_secs(3)).await;

        assert!(!store.contains("key1"));
        assert!(store.is_empty());
        assert!(store.keys().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_overwrite_resets_ttl() {
        let mut store = store(100);

        store
            .set("k".to_string(), "a".to_string(), Some(Duration::from_secs(2)))
            .unwrap();
        tokio::time::advance(Duration::from_secs(1)).await;
        store
            .set("k".to_string(), "b".to_string(), Some(Duration::from_secs(2)))
            .unwrap();
        tokio::time::advance(Duration::from_millis(1500)).await;

        assert_eq!(store.get("k"), Some("b".to_string()));
    }

    #[test]
    fn test_store_fifo_eviction() {
        let mut store = store(3);

        store.set("key1".to_string(), "value1".to_string(), None).unwrap();
        store.set("key2".to_string(), "value2".to_string(), None).unwrap();
        store.set("key3".to_string(), "value3".to_string(), None).unwrap();

        // Reading key1 does not protect it: eviction is by insertion order
        assert!(store.get("key1").is_some());

        store.set("key4".to_string(), "value4".to_string(), None).unwrap();

        assert_eq!(store.len(), 3);
        assert_eq!(store.get("key1"), None);
        assert!(store.get("key2").is_some());
        assert!(store.get("key3").is_some());
        assert!(store.get("key4").is_some());
        assert_eq!(store.stats().evictions, 1);
    }

    #[test]
    fn test_overwrite_at_capacity_evicts_oldest() {
        let mut store = store(2);

        store.set("a".to_string(), "1".to_string(), None).unwrap();
        store.set("b".to_string(), "2".to_string(), None).unwrap();
        store.set("b".to_string(), "3".to_string(), None).unwrap();

        assert_eq!(store.stats().evictions, 1);
        assert_eq!(store.get("a"), None);
        assert_eq!(store.get("b"), Some("3".to_string()));
        assert_eq!(store.keys(), vec!["b".to_string()]);
    }

    #[test]
    fn test_overwrite_of_oldest_at_capacity_reinserts_as_newest() {
        let mut store = store(2);

        store.set("a".to_string(), "1".to_string(), None).unwrap();
        store.set("b".to_string(), "2".to_string(), None).unwrap();
        store.set("a".to_string(), "3".to_string(), None).unwrap();

        assert_eq!(store.len(), 2);
        assert_eq!(store.stats().evictions, 1);
        assert_eq!(store.keys(), vec!["b".to_string(), "a".to_string()]);
        assert_eq!(store.get("a"), Some("3".to_string()));

        store.set("c".to_string(), "4".to_string(), None).unwrap();
        assert_eq!(store.get("b"), None);
        assert_eq!(store.get("a"), Some("3".to_string()));
    }

    #[test]
    fn test_overwrite_below_capacity_keeps_slot() {
        let mut store = store(3);

        store.set("a".to_string(), "1".to_string(), None).unwrap();
        store.set("b".to_string(), "2".to_string(), None).unwrap();
        store.set("a".to_string(), "3".to_string(), None).unwrap();

        assert_eq!(store.stats().evictions, 0);
        assert_eq!(store.keys(), vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_oversized_ttl_rejected_without_eviction() {
        let mut store = store(1);
        store.set("a".to_string(), "1".to_string(), None).unwrap();

        let result = store.set(
            "b".to_string(),
            "2".to_string(),
            Some(Duration::from_secs(u64::MAX)),
        );

        assert_eq!(result, Err(CacheError::InvalidTtl));
        assert_eq!(store.get("a"), Some("1".to_string()));
        assert_eq!(store.keys(), vec!["a".to_string()]);
        assert_eq!(store.stats().evictions, 0);
    }

    #[test]
    fn test_peek_does_not_touch_counters() {
        let mut store = store(10);
        store.set("a".to_string(), "1".to_string(), None).unwrap();

        assert_eq!(store.peek("a"), Some("1".to_string()));
        assert_eq!(store.peek("missing"), None);

        let stats = store.stats();
        assert_eq!(stats.hits, 0);
        assert_eq!(stats.misses, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_store_purge_expired() {
        let mut store = store(100);

        store
            .set("key1".to_string(), "value1".to_string(), Some(Duration::from_secs(1)))
            .unwrap();
        store
            .set("key2".to_string(), "value2".to_string(), Some(Duration::from_secs(10)))
            .unwrap();

        tokio::time::advance(Duration::from_secs(2)).await;

        assert_eq!(store.purge_expired(), 1);
        assert_eq!(store.len(), 1);
        assert_eq!(store.keys(), vec!["key2".to_string()]);
        assert!(store.get("key2").is_some());
    }

    #[test]
    fn test_store_clear() {
        let mut store = store(100);

        store.set("a".to_string(), "1".to_string(), None).unwrap();
        store.set("b".to_string(), "2".to_string(), None).unwrap();
        store.clear();

        assert!(store.is_empty());
        assert!(store.keys().is_empty());
        assert_eq!(store.stats().total_entries, 0);
    }

    #[test]
    fn test_store_stats() {
        let mut store = store(100);

        store.set("key1".to_string(), "value1".to_string(), None).unwrap();
        store.get("key1");
        store.get("nonexistent");

        let stats = store.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.total_entries, 1);
        assert_eq!(stats.max_entries, 100);
    }
}
