//! In-Memory Backend Engine
//!
//! Bundled implementation of the transactional KV contract: ordered rows,
//! per-key versionstamps, and multi-key check-then-commit under one lock.
//! Lets the server run standalone and keeps tests hermetic.

use std::collections::BTreeMap;
use std::ops::Bound;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;

use crate::backend::{
    AtomicOp, BackendError, Consistency, Entry, KvBackend, ListOptions, ListPage, Mutation, Value,
};

// == Row ==
/// One stored row with its version token.
#[derive(Debug, Clone)]
struct Row {
    value: Value,
    versionstamp: u64,
}

/// Mutable engine state; mutations and version allocation happen under one
/// write lock so committed batches are observed atomically.
#[derive(Debug, Default)]
struct Inner {
    rows: BTreeMap<String, Row>,
    next_versionstamp: u64,
}

impl Inner {
    fn bump(&mut self) -> u64 {
        self.next_versionstamp += 1;
        self.next_versionstamp
    }
}

// == Memory KV ==
/// In-memory transactional KV engine.
///
/// The continuation cursor returned by `list` is opaque to callers; a cursor
/// pointing past the end of the prefix yields an empty page with an empty
/// next cursor.
#[derive(Debug, Default)]
pub struct MemoryKv {
    inner: RwLock<Inner>,
    commits: AtomicU64,
}

impl MemoryKv {
    /// Creates an empty engine.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of successful atomic commits so far.
    pub fn commit_count(&self) -> u64 {
        self.commits.load(Ordering::SeqCst)
    }

    fn read_entry(rows: &BTreeMap<String, Row>, key: &str) -> Entry {
        match rows.get(key) {
            Some(row) => Entry {
                key: key.to_string(),
                value: Some(row.value.clone()),
                versionstamp: Some(row.versionstamp),
            },
            None => Entry {
                key: key.to_string(),
                value: None,
                versionstamp: None,
            },
        }
    }
}

impl KvBackend for MemoryKv {
    // The engine holds a single copy of the data, so both consistency
    // levels read the same state.
    fn get(&self, key: &str, _consistency: Consistency) -> Result<Entry, BackendError> {
        let inner = self.inner.read();
        Ok(Self::read_entry(&inner.rows, key))
    }

    fn get_many(
        &self,
        keys: &[&str],
        _consistency: Consistency,
    ) -> Result<Vec<Entry>, BackendError> {
        let inner = self.inner.read();
        Ok(keys
            .iter()
            .map(|key| Self::read_entry(&inner.rows, key))
            .collect())
    }

    fn put(&self, key: &str, value: Value) -> Result<bool, BackendError> {
        let mut inner = self.inner.write();
        let versionstamp = inner.bump();
        inner.rows.insert(
            key.to_string(),
            Row {
                value,
                versionstamp,
            },
        );
        Ok(true)
    }

    fn list(&self, prefix: &str, options: &ListOptions) -> Result<ListPage, BackendError> {
        let inner = self.inner.read();

        // Resume strictly after the cursor key; otherwise start at the
        // beginning of the prefix range.
        let start = match &options.cursor {
            Some(cursor) if !cursor.is_empty() => Bound::Excluded(cursor.clone()),
            _ => Bound::Included(prefix.to_string()),
        };

        let mut entries = Vec::new();
        for (key, row) in inner.rows.range((start, Bound::Unbounded)) {
            if !key.starts_with(prefix) {
                break;
            }
            entries.push(Entry {
                key: key.clone(),
                value: Some(row.value.clone()),
                versionstamp: Some(row.versionstamp),
            });
            if options.limit != 0 && entries.len() == options.limit {
                break;
            }
        }

        // A full page continues from its last key; a short page means the
        // prefix is exhausted.
        let cursor = if options.limit != 0 && entries.len() == options.limit {
            entries.last().map(|e| e.key.clone()).unwrap_or_default()
        } else {
            String::new()
        };

        Ok(ListPage { entries, cursor })
    }

    fn commit(&self, op: AtomicOp) -> Result<bool, BackendError> {
        let mut inner = self.inner.write();

        for (key, expected) in &op.checks {
            let current = inner.rows.get(key).map(|row| row.versionstamp);
            if current != *expected {
                return Ok(false);
            }
        }

        for mutation in op.mutations {
            match mutation {
                Mutation::Set(key, value) => {
                    let versionstamp = inner.bump();
                    inner.rows.insert(
                        key,
                        Row {
                            value,
                            versionstamp,
                        },
                    );
                }
                Mutation::Delete(key) => {
                    inner.rows.remove(&key);
                }
            }
        }

        self.commits.fetch_add(1, Ordering::SeqCst);
        Ok(true)
    }
}
