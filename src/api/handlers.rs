//! API Handlers
//!
//! HTTP request handlers for each paste server endpoint. Every data request
//! fires the expiry sweep after its body runs, without awaiting it and
//! regardless of the request's outcome.

use std::sync::Arc;

use axum::{extract::State, Json};

use crate::backend::{KvBackend, MemoryKv};
use crate::clock::{Clock, SystemClock};
use crate::config::Config;
use crate::error::{Result, StoreError};
use crate::models::{HealthResponse, QueryRequest, QueryResponse, UpdateRequest, UpdateResponse};
use crate::store::{Record, RecordStore};
use crate::sweep::{spawn_sweep, SweepCoordinator};

/// Application state shared across all handlers.
///
/// Explicitly constructed and cloned into each handler; the coordinator and
/// store share one backend handle and there is no process-wide global.
#[derive(Clone)]
pub struct AppState {
    /// TTL-filtered record access
    pub store: RecordStore,
    /// Expiry-sweep coordinator for this instance
    pub sweeper: Arc<SweepCoordinator>,
    /// Clock shared with the store and coordinator
    pub clock: Arc<dyn Clock>,
    /// Lifetime given to every written record
    pub default_ttl: u64,
}

impl AppState {
    /// Creates a new AppState over the given backend and clock.
    pub fn new(backend: Arc<dyn KvBackend>, clock: Arc<dyn Clock>, config: &Config) -> Self {
        let store = RecordStore::new(backend.clone(), clock.clone());
        let sweeper = Arc::new(SweepCoordinator::new(
            backend,
            clock.clone(),
            config.instance_id.clone(),
        ));
        Self {
            store,
            sweeper,
            clock,
            default_ttl: config.default_ttl,
        }
    }

    /// Creates a new AppState from configuration, backed by the bundled
    /// in-memory engine and the system clock.
    pub fn from_config(config: &Config) -> Self {
        Self::new(Arc::new(MemoryKv::new()), Arc::new(SystemClock), config)
    }
}

/// Handler for POST /update
///
/// Creates or overwrites a record. While a record is alive and carries a
/// password, an overwrite must present the same password. The new record
/// always gets a fresh expiry of `now + default_ttl`.
pub async fn update_handler(
    State(state): State<AppState>,
    Json(req): Json<UpdateRequest>,
) -> Result<Json<UpdateResponse>> {
    let result = do_update(&state, req);
    // Clean the namespace opportunistically, never blocking the response.
    spawn_sweep(state.sweeper.clone());
    result.map(Json)
}

fn do_update(state: &AppState, req: UpdateRequest) -> Result<UpdateResponse> {
    if let Some(error_msg) = req.validate() {
        return Err(StoreError::InvalidRequest(error_msg));
    }

    // An expired record reads as absent, so its password no longer gates.
    if let Some(existing) = state.store.get(&req.name)? {
        if !existing.password.is_empty() && existing.password != req.password {
            return Err(StoreError::PasswordMismatch(req.name));
        }
    }

    let mut record = Record::new(req.name.clone());
    record.content = req.content;
    record.password = req.password;
    record.refresh_ttl(state.clock.now_unix(), state.default_ttl);

    if !state.store.put(&record)? {
        return Err(StoreError::WriteRejected(req.name));
    }
    Ok(UpdateResponse::new(req.name))
}

/// Handler for POST /query
///
/// Returns the content of a live record; expired or missing records are 404.
pub async fn query_handler(
    State(state): State<AppState>,
    Json(req): Json<QueryRequest>,
) -> Result<Json<QueryResponse>> {
    let result = do_query(&state, req);
    spawn_sweep(state.sweeper.clone());
    result.map(Json)
}

fn do_query(state: &AppState, req: QueryRequest) -> Result<QueryResponse> {
    if let Some(error_msg) = req.validate() {
        return Err(StoreError::InvalidRequest(error_msg));
    }
    match state.store.get(&req.name)? {
        Some(record) => Ok(QueryResponse::new(record.name, record.content)),
        None => Err(StoreError::NotFound(req.name)),
    }
}

/// Handler for GET /health
///
/// Returns health status of the server.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
