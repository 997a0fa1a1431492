//! Request DTOs for the HTTP API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;
use serde_json::Value;

use crate::cache::{MAX_KEY_LENGTH, MAX_TTL};
use crate::locator::DocumentSnapshot;

/// Request body for PUT /cache/set
///
/// # Fields
/// - `key`: The cache key to store the value under
/// - `value`: Any JSON value
/// - `ttl`: Optional TTL in seconds (uses the cache default if absent)
#[derive(Debug, Clone, Deserialize)]
pub struct SetRequest {
    pub key: String,
    pub value: Value,
    #[serde(default)]
    pub ttl: Option<u64>,
}

impl SetRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.key.is_empty() {
            return Some("Key cannot be empty".to_string());
        }
        if self.key.len() > MAX_KEY_LENGTH {
            return Some(format!(
                "Key exceeds maximum length of {} bytes",
                MAX_KEY_LENGTH
            ));
        }
        match self.ttl {
            Some(0) => return Some("TTL must be greater than zero".to_string()),
            Some(ttl) if ttl > MAX_TTL.as_secs() => {
                return Some(format!(
                    "TTL exceeds maximum of {} seconds",
                    MAX_TTL.as_secs()
                ));
            }
            _ => {}
        }
        None
    }
}

/// Request body for POST /fields/locate
#[derive(Debug, Clone, Deserialize)]
pub struct LocateRequest {
    /// Human-readable field name or label
    pub query: String,
    pub document: DocumentSnapshot,
}

/// Request body for POST /fields/scan
#[derive(Debug, Clone, Deserialize)]
pub struct ScanRequest {
    pub document: DocumentSnapshot,
}
