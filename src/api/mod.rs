//! API Module
//!
//! HTTP handlers and routing for the cache and field-locator REST API.
//!
//! # Endpoints
//! - `/cache/*` - Set, get, check, delete and clear cached JSON values
//! - `/fields/locate` - Find the control matching a field name in a page snapshot
//! - `/fields/scan` - Extract a page snapshot's fillable fields
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
