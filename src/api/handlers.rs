//! API Handlers
//!
//! HTTP request handlers for the cache and field-locator endpoints.

use std::time::Duration;

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::Value;

use crate::cache::{Cache, CacheStats};
use crate::error::{CacheError, Result};
use crate::locator::{locate, scan_page, PageData};
use crate::models::{
    GetResponse, HasResponse, HealthResponse, LocateRequest, LocateResponse, MessageResponse,
    ScanRequest, SetRequest,
};

/// Application state shared across all handlers.
///
/// `Cache` is already a shared handle, so cloning the state is cheap and
/// every clone sees the same entries.
#[derive(Clone, Debug)]
pub struct AppState {
    pub cache: Cache<Value>,
}

impl AppState {
    pub fn new(cache: Cache<Value>) -> Self {
        Self { cache }
    }

    /// Creates the cache described by `config` and wraps it.
    pub fn from_config(config: &crate::config::Config) -> Result<Self> {
        Ok(Self::new(Cache::new(config.cache_config())?))
    }
}

/// Handler for PUT /cache/set
pub async fn set_handler(
    State(state): State<AppState>,
    Json(req): Json<SetRequest>,
) -> Result<Json<MessageResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    let ttl = req.ttl.map(Duration::from_secs);
    state.cache.set(req.key.clone(), req.value, ttl)?;

    Ok(Json(MessageResponse::set(req.key)))
}

/// Handler for GET /cache/get/:key
pub async fn get_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<GetResponse>> {
    match state.cache.get(&key) {
        Some(value) => Ok(Json(GetResponse::new(key, value))),
        None => Err(CacheError::NotFound(key)),
    }
}

/// Handler for GET /cache/has/:key
pub async fn has_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Json<HasResponse> {
    let exists = state.cache.has(&key);
    Json(HasResponse { key, exists })
}

/// Handler for DELETE /cache/del/:key
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<MessageResponse>> {
    if state.cache.delete(&key) {
        Ok(Json(MessageResponse::deleted(key)))
    } else {
        Err(CacheError::NotFound(key))
    }
}

/// Handler for POST /cache/clear
pub async fn clear_handler(State(state): State<AppState>) -> Json<MessageResponse> {
    state.cache.clear();
    Json(MessageResponse::cleared())
}

/// Handler for GET /cache/stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<CacheStats> {
    Json(state.cache.stats())
}

/// Handler for POST /fields/locate
///
/// A missing field is a normal answer (`found: false`), not an error.
pub async fn locate_handler(Json(req): Json<LocateRequest>) -> Json<LocateResponse> {
    let response = locate(&req.document, &req.query)
        .and_then(|found| {
            req.document
                .control(found.element)
                .cloned()
                .map(|field| LocateResponse::found(&req.query, found.element.0, found.strategy, field))
        })
        .unwrap_or_else(|| LocateResponse::not_found(&req.query));

    Json(response)
}

/// Handler for POST /fields/scan
pub async fn scan_handler(Json(req): Json<ScanRequest>) -> Json<PageData> {
    Json(scan_page(&req.document))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
