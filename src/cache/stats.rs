//! Cache Statistics Module
//!
//! Tracks cache counters: hits, misses, evictions and expirations.

use serde::Serialize;

// == Cache Stats ==
/// Snapshot of cache counters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Reads that returned a live value
    pub hits: u64,
    /// Reads that found nothing or an expired entry
    pub misses: u64,
    /// Entries removed to make room under the capacity limit
    pub evictions: u64,
    /// Entries removed because their TTL elapsed (lazily or by the sweep)
    pub expirations: u64,
    /// Entries physically present, including expired ones not yet swept
    pub total_entries: usize,
    /// Configured capacity
    pub max_entries: usize,
}

impl CacheStats {
    pub fn new(max_entries: usize) -> Self {
        Self {
            max_entries,
            ..Self::default()
        }
    }

    // == Hit Rate ==
    /// Returns hits / (hits + misses), or 0.0 if nothing was read yet.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    pub fn record_expirations(&mut self, count: usize) {
        self.expirations += count as u64;
    }

    pub fn set_total_entries(&mut self, count: usize) {
        self.total_entries = count;
    }
}
