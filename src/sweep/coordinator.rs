//! Expiry-Sweep Coordinator
//!
//! Periodic, resumable, self-throttling sweep over the record namespace.
//! Each batch lists one page, stages deletes for every expired record, and
//! commits them together with the ledger update in a single transaction
//! conditioned on the ledger being unchanged since it was read. That
//! optimistic check is the system's only concurrency control: racing
//! instances need no locks and no leader, the loser simply aborts.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::backend::{AtomicOp, Consistency, KvBackend, ListOptions, Value};
use crate::clock::Clock;
use crate::error::Result;
use crate::store::{Record, RECORD_PREFIX};
use crate::sweep::ledger::{LedgerSnapshot, CURSOR_KEY, LAST_RUN_KEY, OWNER_KEY};

// == Sweep Constants ==
/// Records listed and processed per transaction.
pub const PAGE_SIZE: usize = 5;

/// Cooldown between sweep passes, in seconds. A mid-sweep owner resumes
/// immediately regardless of the cooldown.
pub const SWEEP_INTERVAL_SECS: u64 = 600;

// == Sweep Coordinator ==
/// Explicitly constructed coordinator holding its own backend handle and
/// instance identity; there is no ambient global and no internal timer.
/// Invocations come synchronously from the request layer or an external
/// trigger, possibly from many instances at once.
pub struct SweepCoordinator {
    backend: Arc<dyn KvBackend>,
    clock: Arc<dyn Clock>,
    instance_id: String,
    /// Invoked once between staging and commit; lets tests interleave a
    /// competing instance at the racy point.
    #[cfg(test)]
    pre_commit_hook: std::sync::Mutex<Option<Box<dyn FnOnce() + Send>>>,
}

impl SweepCoordinator {
    // == Constructor ==
    /// Creates a coordinator for one serving instance.
    pub fn new(
        backend: Arc<dyn KvBackend>,
        clock: Arc<dyn Clock>,
        instance_id: impl Into<String>,
    ) -> Self {
        Self {
            backend,
            clock,
            instance_id: instance_id.into(),
            #[cfg(test)]
            pre_commit_hook: std::sync::Mutex::new(None),
        }
    }

    /// Identity of this instance as recorded in the ledger owner field.
    pub fn instance_id(&self) -> &str {
        &self.instance_id
    }

    // == Run ==
    /// Performs up to `max_batches` sweep batches; `None` sweeps until the
    /// cursor wraps to empty.
    ///
    /// Returns `Ok(false)` when the sweep was gated out (cooldown active and
    /// this instance has nothing to resume) or when a batch lost the
    /// optimistic race; both mean "nothing committed this call" and neither
    /// is retried here. Returns `Ok(true)` after the budget is spent or the
    /// namespace wraps. Backend failures propagate as errors.
    pub fn run(&self, max_batches: Option<usize>) -> Result<bool> {
        if max_batches == Some(0) {
            return Ok(false);
        }
        let now = self.clock.now_unix();
        let mut remaining = max_batches;

        loop {
            let ledger = LedgerSnapshot::read(self.backend.as_ref())?;
            let mut op = AtomicOp::new();
            ledger.guard(&mut op);

            // Gate: within the cooldown only the mid-sweep owner proceeds.
            if now < ledger.last_run_at() + SWEEP_INTERVAL_SECS {
                if ledger.owner() != Some(self.instance_id.as_str()) {
                    // Another instance already validated recency.
                    return Ok(false);
                }
                if ledger.cursor().is_none() {
                    // No sweep in progress, nothing to resume.
                    return Ok(false);
                }
            }

            // List one page from the persisted cursor.
            let options = ListOptions {
                limit: PAGE_SIZE,
                cursor: ledger.cursor().map(str::to_string),
                consistency: Consistency::Eventual,
            };
            let page = self.backend.list(RECORD_PREFIX, &options)?;

            // Stage deletes for every expired record on the page.
            let mut deletes = 0usize;
            for entry in &page.entries {
                let Some(value) = &entry.value else { continue };
                let record: Record = match serde_json::from_value(value.clone()) {
                    Ok(record) => record,
                    Err(err) => {
                        warn!("Sweep skipping malformed row {}: {}", entry.key, err);
                        continue;
                    }
                };
                if record.is_expired(now) {
                    op.delete(entry.key.clone());
                    deletes += 1;
                }
            }

            // Stage the ledger update committed with the deletes.
            let next_cursor = page.cursor;
            op.set(CURSOR_KEY, Value::from(next_cursor.as_str()));
            op.set(OWNER_KEY, Value::from(self.instance_id.as_str()));
            op.set(LAST_RUN_KEY, Value::from(now));

            #[cfg(test)]
            if let Some(hook) = self
                .pre_commit_hook
                .lock()
                .expect("pre-commit hook lock")
                .take()
            {
                hook();
            }

            if !self.backend.commit(op)? {
                // Lost the optimistic race; the next external trigger
                // retries naturally.
                debug!("Sweep batch aborted by {}: ledger moved", self.instance_id);
                return Ok(false);
            }
            debug!(
                "Sweep batch committed by {}: removed {} expired records",
                self.instance_id, deletes
            );

            if next_cursor.is_empty() {
                // Full wrap of the namespace.
                break;
            }
            if let Some(n) = remaining.as_mut() {
                *n -= 1;
                if *n == 0 {
                    break;
                }
            }
        }
        Ok(true)
    }

    /// Installs a one-shot hook run between staging and commit.
    #[cfg(test)]
    pub(crate) fn set_pre_commit_hook(&self, hook: impl FnOnce() + Send + 'static) {
        *self.pre_commit_hook.lock().expect("pre-commit hook lock") = Some(Box::new(hook));
    }
}
