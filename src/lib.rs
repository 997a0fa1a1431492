//! Form Assist - cache and field-locator core of the form-filling assistant
//!
//! Provides a bounded TTL cache for memoizing expensive generator calls and
//! a heuristic locator that finds and highlights form fields by name.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod locator;
pub mod models;
pub mod tasks;

pub use api::AppState;
pub use cache::Cache;
pub use config::{CacheConfig, Config};
pub use locator::{locate, Document, Highlighter};
