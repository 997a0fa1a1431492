//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

use std::time::Duration;

use tokio::time::Instant;

use crate::cache::MAX_TTL;
use crate::error::{CacheError, Result};

// == Cache Entry ==
/// Represents a single cache entry with value and expiry metadata.
///
/// Timestamps come from the monotonic Tokio clock so tests can pause and
/// advance time deterministically.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// Absolute expiry instant
    pub expires_at: Instant,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new cache entry expiring `ttl` from now.
    ///
    /// # Errors
    /// `InvalidTtl` if `ttl` is zero, longer than [`MAX_TTL`], or would push
    /// the expiry past what the clock can represent.
    pub fn new(value: V, ttl: Duration) -> Result<Self> {
        if ttl.is_zero() || ttl > MAX_TTL {
            return Err(CacheError::InvalidTtl);
        }
        let expires_at = Instant::now()
            .checked_add(ttl)
            .ok_or(CacheError::InvalidTtl)?;

        Ok(Self { value, expires_at })
    }

    // == Is Expired ==
    /// Checks whether the entry is expired at `now`.
    ///
    /// An entry is visible only while `now < expires_at`; at the boundary it
    /// is already expired.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        now >= self.expires_at
    }

    /// Checks whether the entry is expired right now.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }
}
