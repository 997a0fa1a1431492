//! Cache Module
//!
//! Bounded in-memory cache with per-entry TTL, FIFO capacity eviction, a
//! periodic expiry sweep and single-flight memoization of async generators.

use std::time::Duration;

mod entry;
mod handle;
mod order;
mod stats;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use handle::Cache;
pub use order::InsertionOrder;
pub use stats::CacheStats;
pub use store::CacheStore;

// == Public Constants ==
/// Maximum allowed key length in bytes for keys arriving over HTTP
pub const MAX_KEY_LENGTH: usize = 256;

/// Longest TTL an entry may carry (ten years)
pub const MAX_TTL: Duration = Duration::from_secs(10 * 365 * 24 * 60 * 60);
