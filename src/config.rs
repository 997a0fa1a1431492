//! Configuration Module
//!
//! Handles loading server configuration from environment variables and
//! validating the cache parameters derived from it.

use std::env;
use std::time::Duration;

use crate::cache::MAX_TTL;
use crate::error::{CacheError, Result};

/// Default maximum number of cache entries.
pub const DEFAULT_MAX_ENTRIES: usize = 1000;

/// Default cache TTL in seconds (one hour).
pub const DEFAULT_TTL_SECS: u64 = 3600;

/// Default interval between expiry sweeps in seconds.
pub const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 60;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum number of entries the cache can hold
    pub max_entries: usize,
    /// Default TTL in seconds for entries without explicit TTL
    pub default_ttl: u64,
    /// HTTP server port
    pub server_port: u16,
    /// Background sweep interval in seconds
    pub cleanup_interval: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `MAX_ENTRIES` - Maximum cache entries (default: 1000)
    /// - `CACHE_TTL_SECONDS` - Default TTL in seconds (default: 3600)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `CLEANUP_INTERVAL` - Sweep frequency in seconds (default: 60)
    pub fn from_env() -> Self {
        Self {
            max_entries: env_or("MAX_ENTRIES", DEFAULT_MAX_ENTRIES),
            default_ttl: env_or("CACHE_TTL_SECONDS", DEFAULT_TTL_SECS),
            server_port: env_or("SERVER_PORT", 3000),
            cleanup_interval: env_or("CLEANUP_INTERVAL", DEFAULT_SWEEP_INTERVAL_SECS),
        }
    }

    /// Builds the cache configuration described by this server config.
    pub fn cache_config(&self) -> CacheConfig {
        CacheConfig::default()
            .with_max_entries(self.max_entries)
            .with_default_ttl(Duration::from_secs(self.default_ttl))
            .with_sweep_interval(Duration::from_secs(self.cleanup_interval))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_entries: DEFAULT_MAX_ENTRIES,
            default_ttl: DEFAULT_TTL_SECS,
            server_port: 3000,
            cleanup_interval: DEFAULT_SWEEP_INTERVAL_SECS,
        }
    }
}

fn env_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

// == Cache Config ==
/// Construction parameters for a [`Cache`](crate::cache::Cache).
///
/// ```rust
/// use form_assist::config::CacheConfig;
/// use std::time::Duration;
///
/// let config = CacheConfig::default()
///     .with_max_entries(500)
///     .with_default_ttl(Duration::from_secs(600));
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    /// Hard upper bound on simultaneous entries
    pub max_entries: usize,
    /// TTL applied when a caller does not pass one
    pub default_ttl: Duration,
    /// Period of the background expiry sweep
    pub sweep_interval: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: DEFAULT_MAX_ENTRIES,
            default_ttl: Duration::from_secs(DEFAULT_TTL_SECS),
            sweep_interval: Duration::from_secs(DEFAULT_SWEEP_INTERVAL_SECS),
        }
    }
}

impl CacheConfig {
    pub fn with_max_entries(mut self, max_entries: usize) -> Self {
        self.max_entries = max_entries;
        self
    }

    pub fn with_default_ttl(mut self, ttl: Duration) -> Self {
        self.default_ttl = ttl;
        self
    }

    pub fn with_sweep_interval(mut self, interval: Duration) -> Self {
        self.sweep_interval = interval;
        self
    }

    /// Rejects configurations that would make the cache misbehave silently.
    pub fn validate(&self) -> Result<()> {
        if self.max_entries == 0 {
            return Err(CacheError::InvalidConfig(
                "max_entries must be greater than zero".to_string(),
            ));
        }
        if self.default_ttl.is_zero() {
            return Err(CacheError::InvalidConfig(
                "default_ttl must be greater than zero".to_string(),
            ));
        }
        if self.default_ttl > MAX_TTL {
            return Err(CacheError::InvalidConfig(format!(
                "default_ttl must be at most {} seconds",
                MAX_TTL.as_secs()
            )));
        }
        if self.sweep_interval.is_zero() {
            return Err(CacheError::InvalidConfig(
                "sweep_interval must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
