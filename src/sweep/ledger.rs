//! Sweep Ledger
//!
//! Three backend records track sweep progress and ownership: the pagination
//! cursor, the owning instance id, and the last committed batch time. They
//! are created lazily, updated with every committed batch, and never
//! deleted. The owner field is a hint to avoid redundant sweeps, not a lock.

use crate::backend::{AtomicOp, BackendError, Consistency, Entry, KvBackend, Value};

// == Ledger Keys ==
/// Pagination cursor; empty means start of namespace.
pub const CURSOR_KEY: &str = "idb/clean_cursor";
/// Instance that last advanced the cursor.
pub const OWNER_KEY: &str = "idb/clean_instance";
/// Unix seconds of the last committed batch.
pub const LAST_RUN_KEY: &str = "idb/clean_time";

// == Ledger Snapshot ==
/// One eventual-consistency read of the three ledger fields, kept with
/// their versionstamps so a later commit can be conditioned on them being
/// unchanged.
#[derive(Debug)]
pub struct LedgerSnapshot {
    cursor: Entry,
    owner: Entry,
    last_run: Entry,
}

impl LedgerSnapshot {
    // == Read ==
    /// Snapshot-reads the ledger in a single round trip.
    pub fn read(backend: &dyn KvBackend) -> Result<Self, BackendError> {
        let mut entries = backend.get_many(
            &[CURSOR_KEY, OWNER_KEY, LAST_RUN_KEY],
            Consistency::Eventual,
        )?;
        // get_many returns entries in argument order
        let last_run = entries.pop().unwrap_or_else(|| absent(LAST_RUN_KEY));
        let owner = entries.pop().unwrap_or_else(|| absent(OWNER_KEY));
        let cursor = entries.pop().unwrap_or_else(|| absent(CURSOR_KEY));
        Ok(Self {
            cursor,
            owner,
            last_run,
        })
    }

    // == Field Accessors ==
    /// The persisted cursor, or `None` when absent or empty (no sweep in
    /// progress).
    pub fn cursor(&self) -> Option<&str> {
        match (&self.cursor.versionstamp, &self.cursor.value) {
            (Some(_), Some(Value::String(s))) if !s.is_empty() => Some(s.as_str()),
            _ => None,
        }
    }

    /// The owning instance id, or `None` when absent.
    pub fn owner(&self) -> Option<&str> {
        match &self.owner.value {
            Some(Value::String(s)) => Some(s.as_str()),
            _ => None,
        }
    }

    /// The last committed batch time; 0 when the ledger has never been
    /// written.
    pub fn last_run_at(&self) -> u64 {
        self.last_run
            .value
            .as_ref()
            .and_then(|v| v.as_u64())
            .unwrap_or(0)
    }

    // == Guard ==
    /// Conditions `op` on all three fields being unchanged since this
    /// snapshot. Any other instance's intervening commit then aborts the
    /// whole transaction.
    pub fn guard(&self, op: &mut AtomicOp) {
        op.check_entry(&self.cursor);
        op.check_entry(&self.owner);
        op.check_entry(&self.last_run);
    }
}

fn absent(key: &str) -> Entry {
    Entry {
        key: key.to_string(),
        value: None,
        versionstamp: None,
    }
}
