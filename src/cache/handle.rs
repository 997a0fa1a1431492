//! Cache Handle Module
//!
//! The shareable cache instance: a synchronous store behind a mutex, a
//! background expiry sweep, and `get_cached` memoization with per-key
//! single-flight.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::cache::{CacheStats, CacheStore};
use crate::config::CacheConfig;
use crate::error::{CacheError, Result};
use crate::tasks::spawn_sweep_task;

type Flight = Arc<tokio::sync::Mutex<()>>;

// == Cache ==
/// Bounded TTL cache with a periodic expiry sweep.
///
/// `Cache` is a cheap handle; clones share the same entries. The synchronous
/// operations (`set`, `get`, `has`, `delete`, `clear`) never suspend. Only
/// [`get_cached`](Self::get_cached) awaits, while its generator runs.
///
/// Call [`destroy`](Self::destroy) when the owning component shuts down.
/// Dropping the last handle also stops the sweep.
///
/// ```rust,no_run
/// use form_assist::cache::Cache;
/// use form_assist::config::CacheConfig;
///
/// # async fn run() -> form_assist::error::Result<()> {
/// let cache: Cache<String> = Cache::new(CacheConfig::default())?;
/// cache.set("greeting", "hello".to_string(), None)?;
/// assert_eq!(cache.get("greeting"), Some("hello".to_string()));
/// cache.destroy();
/// # Ok(())
/// # }
/// ```
pub struct Cache<V> {
    inner: Arc<CacheShared<V>>,
}

struct CacheShared<V> {
    store: Arc<Mutex<CacheStore<V>>>,
    /// Per-key locks for generators currently running
    in_flight: Mutex<HashMap<String, Flight>>,
    sweep: Mutex<Option<JoinHandle<()>>>,
}

impl<V> Clone for Cache<V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<V> std::fmt::Debug for Cache<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cache").finish_non_exhaustive()
    }
}

impl<V> Drop for CacheShared<V> {
    fn drop(&mut self) {
        if let Some(handle) = self
            .sweep
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
        {
            handle.abort();
        }
    }
}

impl<V> Cache<V>
where
    V: Clone + Send + 'static,
{
    // == Constructor ==
    /// Creates a cache and starts its expiry sweep.
    ///
    /// # Errors
    /// - `InvalidConfig` if any configured bound is zero
    /// - `RuntimeUnavailable` if called outside a Tokio runtime
    pub fn new(config: CacheConfig) -> Result<Self> {
        config.validate()?;
        tokio::runtime::Handle::try_current()
            .map_err(|err| CacheError::RuntimeUnavailable(err.to_string()))?;

        let store = Arc::new(Mutex::new(CacheStore::new(
            config.max_entries,
            config.default_ttl,
        )));
        let sweep = spawn_sweep_task(Arc::downgrade(&store), config.sweep_interval);

        Ok(Self {
            inner: Arc::new(CacheShared {
                store,
                in_flight: Mutex::new(HashMap::new()),
                sweep: Mutex::new(Some(sweep)),
            }),
        })
    }

    fn store(&self) -> MutexGuard<'_, CacheStore<V>> {
        self.inner
            .store
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    // == Synchronous Operations ==

    /// Inserts or overwrites `key`. A zero or oversized TTL is rejected with
    /// `InvalidTtl`.
    pub fn set(&self, key: impl Into<String>, value: V, ttl: Option<Duration>) -> Result<()> {
        self.store().set(key.into(), value, ttl)
    }

    /// Returns the live value for `key`, if any.
    pub fn get(&self, key: &str) -> Option<V> {
        self.store().get(key)
    }

    /// Whether `key` holds a live value.
    pub fn has(&self, key: &str) -> bool {
        self.store().contains(key)
    }

    pub fn delete(&self, key: &str) -> bool {
        self.store().delete(key)
    }

    pub fn clear(&self) {
        self.store().clear();
    }

    pub fn len(&self) -> usize {
        self.store().len()
    }

    pub fn is_empty(&self) -> bool {
        self.store().is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        self.store().stats()
    }

    /// Stored keys, oldest first.
    pub fn keys(&self) -> Vec<String> {
        self.store().keys()
    }

    // == Get Cached ==
    /// Returns the cached value for `key`, or runs `generator` and caches
    /// its result.
    ///
    /// Concurrent callers for the same absent key are serialized: the first
    /// runs its generator, the rest wait and then re-check the cache. When
    /// the first caller succeeds the others reuse its value; when it fails,
    /// it alone gets the error, nothing is stored, and the next waiter runs
    /// its own generator.
    ///
    /// A zero `ttl` falls back to the configured default.
    pub async fn get_cached<F, Fut, E>(
        &self,
        key: &str,
        generator: F,
        ttl: Option<Duration>,
    ) -> std::result::Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = std::result::Result<V, E>>,
    {
        if let Some(value) = self.get(key) {
            return Ok(value);
        }

        let ttl = match ttl {
            Some(ttl) if ttl.is_zero() => {
                warn!(key = %key, "Zero TTL passed to get_cached, using default");
                None
            }
            other => other,
        };

        let flight = FlightGuard::join(&self.inner, key);
        let _turn = flight.lock.lock().await;

        // Another caller may have filled the entry while we waited. The miss
        // was already counted above.
        if let Some(value) = self.store().peek(key) {
            debug!(key = %key, "Cache filled by concurrent generator");
            return Ok(value);
        }

        let value = generator().await?;
        if let Err(err) = self.set(key, value.clone(), ttl) {
            warn!(key = %key, error = %err, "Failed to store generated value");
        }
        Ok(value)
    }

    // == Destroy ==
    /// Stops the expiry sweep and removes every entry. Safe to call twice.
    pub fn destroy(&self) {
        let handle = self
            .inner
            .sweep
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(handle) = handle {
            handle.abort();
            debug!("Cache expiry sweep stopped");
        }
        self.clear();
    }

    /// Whether the background sweep is still scheduled.
    pub fn is_sweeping(&self) -> bool {
        self.inner
            .sweep
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

// == Flight Guard ==
/// Membership in the single-flight group for one key.
///
/// Removes the key's lock from the in-flight map when the last member
/// leaves, including when a `get_cached` future is dropped mid-await.
struct FlightGuard<'a, V> {
    shared: &'a CacheShared<V>,
    key: String,
    lock: Flight,
}

impl<'a, V> FlightGuard<'a, V> {
    fn join(shared: &'a CacheShared<V>, key: &str) -> Self {
        let lock = shared
            .in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(key.to_string())
            .or_default()
            .clone();

        Self {
            shared,
            key: key.to_string(),
            lock,
        }
    }
}

impl<V> Drop for FlightGuard<'_, V> {
    fn drop(&mut self) {
        let mut in_flight = self
            .shared
            .in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        // One reference is ours, one is the map's
        let last_member = in_flight
            .get(&self.key)
            .is_some_and(|lock| Arc::ptr_eq(lock, &self.lock) && Arc::strong_count(lock) == 2);
        if last_member {
            in_flight.remove(&self.key);
        }
    }
}
