//! Sweep Module
//!
//! Background expiry sweep: a resumable, batch-bounded scan over the record
//! namespace that physically deletes expired rows. Progress and ownership
//! live in a three-field ledger committed atomically with every batch;
//! optimistic versionstamp checks on the ledger are the only coordination
//! between instances.

mod coordinator;
pub mod ledger;
mod trigger;


// Re-export public types
pub use coordinator::{SweepCoordinator, PAGE_SIZE, SWEEP_INTERVAL_SECS};
pub use trigger::spawn_sweep;
