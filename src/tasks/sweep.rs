//! Expiry Sweep Task
//!
//! Background task that periodically removes expired cache entries, so keys
//! that are written once and never read again do not accumulate.

use std::sync::{Mutex, PoisonError, Weak};
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::CacheStore;

/// Spawns a background task that periodically purges expired cache entries.
///
/// The task holds only a weak reference to the store and exits on its own
/// once the owning cache is dropped. The first tick fires one full
/// `interval` after spawning.
///
/// # Arguments
/// * `store` - Weak reference to the store guarded by its mutex
/// * `interval` - Time between sweeps
///
/// # Returns
/// A JoinHandle for the spawned task, used to abort it on teardown.
///
/// # Example
/// ```ignore
/// let store = Arc::new(Mutex::new(CacheStore::<String>::new(1000, ttl)));
/// let handle = spawn_sweep_task(Arc::downgrade(&store), Duration::from_secs(60));
/// // Later, during shutdown:
/// handle.abort();
/// ```
pub fn spawn_sweep_task<V>(store: Weak<Mutex<CacheStore<V>>>, interval: Duration) -> JoinHandle<()>
where
    V: Clone + Send + 'static,
{
    tokio::spawn(async move {
        info!(
            interval_secs = interval.as_secs_f64(),
            "Starting cache expiry sweep"
        );

        let mut ticker = tokio::time::interval(interval);
        // The first tick completes immediately
        ticker.tick().await;

        loop {
            ticker.tick().await;

            let Some(store) = store.upgrade() else {
                debug!("Cache dropped, stopping expiry sweep");
                break;
            };

            let removed = store
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .purge_expired();

            if removed > 0 {
                info!("Cache sweep: removed {} expired entries", removed);
            } else {
                debug!("Cache sweep: no expired entries found");
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn shared_store() -> Arc<Mutex<CacheStore<String>>> {
        Arc::new(Mutex::new(CacheStore::new(100, Duration::from_secs(300))))
    }

    #[tokio::test(start_paused = true)]
    async fn test_sweep_removes_unread_expired_entries() {
        let store = shared_store();
        store
            .lock()
            .unwrap()
            .set(
                "expire_soon".to_string(),
                "value".to_string(),
                Some(Duration::from_secs(1)),
            )
            .unwrap();

        let handle = spawn_sweep_task(Arc::downgrade(&store), Duration::from_secs(2));

        // Let the task start and consume its immediate first tick
        tokio::task::yield_now().await;
        tokio::time::sleep(Duration::from_millis(2100)).await;

        // Physically gone without any read touching it
        assert_eq!(store.lock().unwrap().len(), 0);
        assert_eq!(store.lock().unwrap().stats().expirations, 1);

        handle.abort();
    }

    #[tokio::test(start_paused = true)]
    async fn test_sweep_preserves_valid_entries() {
        let store = shared_store();
        store
            .lock()
            .unwrap()
            .set(
                "long_lived".to_string(),
                "value".to_string(),
                Some(Duration::from_secs(3600)),
            )
            .unwrap();

        let handle = spawn_sweep_task(Arc::downgrade(&store), Duration::from_secs(1));
        tokio::time::sleep(Duration::from_millis(1500)).await;

        assert_eq!(
            store.lock().unwrap().get("long_lived"),
            Some("value".to_string())
        );

        handle.abort();
    }

    #[tokio::test(start_paused = true)]
    async fn test_sweep_exits_when_store_dropped() {
        let store = shared_store();
        let handle = spawn_sweep_task(Arc::downgrade(&store), Duration::from_secs(1));

        drop(store);
        tokio::time::sleep(Duration::from_millis(2100)).await;

        assert!(handle.is_finished(), "Sweep should stop once the store is gone");
    }

    #[tokio::test]
    async fn test_sweep_can_be_aborted() {
        let store = shared_store();
        let handle = spawn_sweep_task(Arc::downgrade(&store), Duration::from_secs(1));

        handle.abort();

        let result = handle.await;
        assert!(result.unwrap_err().is_cancelled());
    }
}
