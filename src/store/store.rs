//! Record Store Module
//!
//! Typed accessor over the transactional KV backend with TTL-aware reads.
//! Reads filter expired rows lazily; only the sweep coordinator reclaims the
//! physical space.

use std::sync::Arc;

use crate::backend::{Consistency, KvBackend};
use crate::clock::Clock;
use crate::error::Result;
use crate::store::{record_key, Record};

// == Record Store ==
/// TTL-filtered get/put over the backend.
#[derive(Clone)]
pub struct RecordStore {
    backend: Arc<dyn KvBackend>,
    clock: Arc<dyn Clock>,
}

impl RecordStore {
    // == Constructor ==
    /// Creates a store over the given backend and clock.
    pub fn new(backend: Arc<dyn KvBackend>, clock: Arc<dyn Clock>) -> Self {
        Self { backend, clock }
    }

    // == Get ==
    /// Retrieves a record by name.
    ///
    /// Uses an eventual-consistency read. Returns `None` when no row exists
    /// or the stored `expires_at` has been reached, even if the physical row
    /// is still present. Side-effect-free.
    pub fn get(&self, name: &str) -> Result<Option<Record>> {
        let now = self.clock.now_unix();
        let entry = self
            .backend
            .get(&record_key(name), Consistency::Eventual)?;
        if !entry.is_present() {
            return Ok(None);
        }
        let Some(value) = entry.value else {
            return Ok(None);
        };

        let record: Record = serde_json::from_value(value)?;
        if record.is_expired(now) {
            Ok(None)
        } else {
            Ok(Some(record))
        }
    }

    // == Put ==
    /// Writes a record, unconditionally overwriting any previous row.
    ///
    /// A rejected write is reported as `Ok(false)`, never swallowed; the
    /// caller decides whether to retry.
    pub fn put(&self, record: &Record) -> Result<bool> {
        let value = serde_json::to_value(record)?;
        Ok(self.backend.put(&record.key(), value)?)
    }
}
