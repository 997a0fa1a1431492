//! Error types for the form assistant
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Cache Error Enum ==
/// Error type for the cache and its HTTP surface.
///
/// A cache miss is never an error inside the cache itself; `NotFound` only
/// exists so the HTTP handlers can answer with a 404.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// Key not found in cache
    #[error("Key not found: {0}")]
    NotFound(String),

    /// A TTL of zero, or one past [`MAX_TTL`](crate::cache::MAX_TTL), was supplied
    #[error("TTL must be greater than zero and at most {} seconds", crate::cache::MAX_TTL.as_secs())]
    InvalidTtl,

    /// Cache configuration rejected at construction
    #[error("Invalid cache configuration: {0}")]
    InvalidConfig(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// No Tokio runtime to host the sweep task
    #[error("Runtime unavailable: {0}")]
    RuntimeUnavailable(String),
}

// == Locator Error Enum ==
/// Error type for the field locator.
///
/// Not finding a field is a normal outcome and is reported as `None`;
/// only a missing host environment is an error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LocatorError {
    /// The hosting page context cannot run the highlighter
    #[error("Host context unavailable: {0}")]
    HostUnavailable(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let status = match &self {
            CacheError::NotFound(_) => StatusCode::NOT_FOUND,
            CacheError::InvalidTtl | CacheError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            CacheError::InvalidConfig(_) | CacheError::RuntimeUnavailable(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for cache operations.
pub type Result<T> = std::result::Result<T, CacheError>;
