//! Transactional KV Contract
//!
//! Engine-independent interface the record store and sweep coordinator are
//! written against. Any backend offering versioned reads, prefix listing with
//! an opaque continuation cursor, and a multi-key check-then-commit primitive
//! can sit behind this trait.

use thiserror::Error;

/// Value type stored by the backend. Rows are structured JSON documents.
pub type Value = serde_json::Value;

// == Backend Error ==
/// Failure reported by the backend engine.
///
/// Optimistic-check failures are not errors; `commit` reports those as
/// `Ok(false)`. This covers genuine unavailability (network, I/O).
#[derive(Error, Debug)]
pub enum BackendError {
    /// Backend could not be reached or failed mid-operation
    #[error("Backend unavailable: {0}")]
    Unavailable(String),
}

// == Consistency ==
/// Read consistency hint.
///
/// Eventual reads may observe stale rows; the sweep transaction's version
/// checks are what make acting on them safe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Consistency {
    /// Read the latest committed state
    Strong,
    /// A possibly-stale read is acceptable
    Eventual,
}

// == Entry ==
/// A versioned read result for one key.
///
/// `versionstamp` is `None` when the key is absent; a check against `None`
/// asserts the key is still absent at commit time.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    /// The key this entry was read from
    pub key: String,
    /// The stored value, or None when absent
    pub value: Option<Value>,
    /// Backend version token, or None when absent
    pub versionstamp: Option<u64>,
}

impl Entry {
    /// Returns true if the key held a value at read time.
    pub fn is_present(&self) -> bool {
        self.versionstamp.is_some()
    }
}

// == List Options ==
/// Options for a prefix listing.
#[derive(Debug, Clone)]
pub struct ListOptions {
    /// Maximum number of entries to return (0 = no limit)
    pub limit: usize,
    /// Continuation cursor from a previous page; None or empty starts at
    /// the beginning of the prefix
    pub cursor: Option<String>,
    /// Read consistency for the listing
    pub consistency: Consistency,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            limit: 0,
            cursor: None,
            consistency: Consistency::Eventual,
        }
    }
}

/// One page of a prefix listing.
#[derive(Debug, Clone)]
pub struct ListPage {
    /// Entries in key order; values and versionstamps are always present
    pub entries: Vec<Entry>,
    /// Opaque continuation cursor; empty when the prefix is exhausted
    pub cursor: String,
}

// == Atomic Op ==
/// Staged mutation set applied in one transaction.
///
/// All checks are evaluated against current versionstamps at commit time;
/// if any key has moved, nothing is applied and `commit` returns `Ok(false)`.
#[derive(Debug, Default)]
pub struct AtomicOp {
    pub(crate) checks: Vec<(String, Option<u64>)>,
    pub(crate) mutations: Vec<Mutation>,
}

/// A single staged write.
#[derive(Debug)]
pub(crate) enum Mutation {
    Set(String, Value),
    Delete(String),
}

impl AtomicOp {
    /// Creates an empty operation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requires `key` to still be at `versionstamp` (None = still absent).
    pub fn check(&mut self, key: impl Into<String>, versionstamp: Option<u64>) -> &mut Self {
        self.checks.push((key.into(), versionstamp));
        self
    }

    /// Requires the key of `entry` to be unchanged since it was read.
    pub fn check_entry(&mut self, entry: &Entry) -> &mut Self {
        self.check(entry.key.clone(), entry.versionstamp)
    }

    /// Stages a write of `value` under `key`.
    pub fn set(&mut self, key: impl Into<String>, value: Value) -> &mut Self {
        self.mutations.push(Mutation::Set(key.into(), value));
        self
    }

    /// Stages a delete of `key`. Deleting an absent key is a no-op.
    pub fn delete(&mut self, key: impl Into<String>) -> &mut Self {
        self.mutations.push(Mutation::Delete(key.into()));
        self
    }

    /// Returns true if no mutations are staged.
    pub fn is_empty(&self) -> bool {
        self.mutations.is_empty()
    }
}

// == Backend Trait ==
/// Abstract transactional key-value backend.
pub trait KvBackend: Send + Sync {
    /// Reads one key with its versionstamp.
    fn get(&self, key: &str, consistency: Consistency) -> Result<Entry, BackendError>;

    /// Reads several keys in one round trip; results are in argument order.
    fn get_many(&self, keys: &[&str], consistency: Consistency)
        -> Result<Vec<Entry>, BackendError>;

    /// Unconditionally writes `value` under `key`.
    fn put(&self, key: &str, value: Value) -> Result<bool, BackendError>;

    /// Lists a page of entries under `prefix` in key order.
    fn list(&self, prefix: &str, options: &ListOptions) -> Result<ListPage, BackendError>;

    /// Atomically applies a staged operation; `Ok(false)` means an
    /// optimistic check failed and nothing was written.
    fn commit(&self, op: AtomicOp) -> Result<bool, BackendError>;
}
