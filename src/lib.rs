//! LRU KV - An in-memory key-value cache server
//!
//! A byte-budgeted cache engine with least-recently-written eviction,
//! served over a small HTTP/JSON command layer.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;

pub use api::AppState;
pub use cache::CacheStore;
pub use config::Config;
