//! API Module
//!
//! HTTP handlers and routing for the cache server command layer.
//!
//! # Endpoints
//! - `PUT /put` - Insert or overwrite a key
//! - `PUT /putnx` - Insert a key only if absent
//! - `PUT /set` - Overwrite an existing key only
//! - `GET /get/:key` - Retrieve a value by key
//! - `DELETE /del/:key` - Delete a key
//! - `GET /stats` - Get cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
