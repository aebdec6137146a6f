//! API Handlers
//!
//! HTTP request handlers mapping each endpoint onto one cache command.

use std::sync::Arc;
use tokio::sync::Mutex;

use axum::{
    extract::{Path, State},
    Json,
};

use crate::cache::CacheStore;
use crate::error::{CacheError, Result};
use crate::models::{
    DeleteResponse, GetResponse, HealthResponse, StatsResponse, WriteRequest, WriteResponse,
};

/// Application state shared across all handlers.
///
/// The store has no locking of its own. Every handler holds this mutex for
/// the whole of one command, so the store only ever sees a single caller.
#[derive(Clone)]
pub struct AppState {
    /// Globally locked cache store
    pub cache: Arc<Mutex<CacheStore>>,
}

impl AppState {
    /// Creates a new AppState with the given cache store.
    pub fn new(cache: CacheStore) -> Self {
        Self {
            cache: Arc::new(Mutex::new(cache)),
        }
    }

    /// Creates a new AppState from configuration.
    pub fn from_config(config: &crate::config::Config) -> Self {
        Self::new(CacheStore::new(config.capacity_bytes))
    }
}

fn capacity_exceeded(req: &WriteRequest, capacity_bytes: usize) -> CacheError {
    CacheError::CapacityExceeded(format!(
        "key '{}' with a {}-byte value does not fit in {} bytes",
        req.key,
        req.value.len(),
        capacity_bytes
    ))
}

fn validated(req: &WriteRequest) -> Result<()> {
    match req.validate() {
        Some(error_msg) => Err(CacheError::InvalidRequest(error_msg)),
        None => Ok(()),
    }
}

/// Handler for PUT /put
///
/// Inserts or overwrites a key.
pub async fn put_handler(
    State(state): State<AppState>,
    Json(req): Json<WriteRequest>,
) -> Result<Json<WriteResponse>> {
    validated(&req)?;

    let mut cache = state.cache.lock().await;
    if !cache.put(req.key.as_bytes(), req.value.as_bytes()) {
        return Err(capacity_exceeded(&req, cache.capacity_bytes()));
    }

    Ok(Json(WriteResponse::new(req.key, "stored")))
}

/// Handler for PUT /putnx
///
/// Inserts a key only if it is not cached yet.
pub async fn put_if_absent_handler(
    State(state): State<AppState>,
    Json(req): Json<WriteRequest>,
) -> Result<Json<WriteResponse>> {
    validated(&req)?;

    let mut cache = state.cache.lock().await;
    if !cache.put_if_absent(req.key.as_bytes(), req.value.as_bytes()) {
        if cache.contains(req.key.as_bytes()) {
            return Err(CacheError::AlreadyExists(req.key));
        }
        return Err(capacity_exceeded(&req, cache.capacity_bytes()));
    }

    Ok(Json(WriteResponse::new(req.key, "stored")))
}

/// Handler for PUT /set
///
/// Replaces the value of an existing key.
pub async fn set_handler(
    State(state): State<AppState>,
    Json(req): Json<WriteRequest>,
) -> Result<Json<WriteResponse>> {
    validated(&req)?;

    let mut cache = state.cache.lock().await;
    if !cache.set(req.key.as_bytes(), req.value.as_bytes()) {
        if !cache.contains(req.key.as_bytes()) {
            return Err(CacheError::NotFound(req.key));
        }
        return Err(capacity_exceeded(&req, cache.capacity_bytes()));
    }

    Ok(Json(WriteResponse::new(req.key, "updated")))
}

/// Handler for GET /get/:key
///
/// Retrieves a value from the cache by key. Values that are not valid UTF-8
/// are returned lossily.
pub async fn get_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<GetResponse>> {
    let cache = state.cache.lock().await;
    let value = cache
        .get(key.as_bytes())
        .map(|v| String::from_utf8_lossy(v).into_owned())
        .ok_or_else(|| CacheError::NotFound(key.clone()))?;

    Ok(Json(GetResponse::new(key, value)))
}

/// Handler for DELETE /del/:key
///
/// Deletes a key from the cache.
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<DeleteResponse>> {
    let mut cache = state.cache.lock().await;
    if !cache.delete(key.as_bytes()) {
        return Err(CacheError::NotFound(key));
    }

    Ok(Json(DeleteResponse::new(key)))
}

/// Handler for GET /stats
///
/// Returns current cache statistics.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let cache = state.cache.lock().await;
    Json(StatsResponse::from(cache.stats()))
}

/// Handler for GET /health
///
/// Returns health status of the server.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
