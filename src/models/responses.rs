//! Response DTOs for the HTTP API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;
use serde_json::Value;

use crate::locator::{ControlSpec, MatchStrategy};

/// Response body for GET /cache/get/:key
#[derive(Debug, Clone, Serialize)]
pub struct GetResponse {
    pub key: String,
    pub value: Value,
}

impl GetResponse {
    pub fn new(key: impl Into<String>, value: Value) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }
}

/// Response body for GET /cache/has/:key
#[derive(Debug, Clone, Serialize)]
pub struct HasResponse {
    pub key: String,
    pub exists: bool,
}

/// Plain acknowledgement used by set, delete and clear.
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    /// Success message
    pub message: String,
    /// The key acted on, absent for whole-cache operations
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

impl MessageResponse {
    pub fn set(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            message: format!("Key '{}' set successfully", key),
            key: Some(key),
        }
    }

    pub fn deleted(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            message: format!("Key '{}' deleted successfully", key),
            key: Some(key),
        }
    }

    pub fn cleared() -> Self {
        Self {
            message: "Cache cleared".to_string(),
            key: None,
        }
    }
}

/// Response body for POST /fields/locate
#[derive(Debug, Clone, Serialize)]
pub struct LocateResponse {
    pub query: String,
    pub found: bool,
    /// Position of the matched control in the submitted document
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strategy: Option<MatchStrategy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<ControlSpec>,
}

impl LocateResponse {
    pub fn not_found(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            found: false,
            index: None,
            strategy: None,
            field: None,
        }
    }

    pub fn found(
        query: impl Into<String>,
        index: usize,
        strategy: MatchStrategy,
        field: ControlSpec,
    ) -> Self {
        Self {
            query: query.into(),
            found: true,
            index: Some(index),
            strategy: Some(strategy),
            field: Some(field),
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
