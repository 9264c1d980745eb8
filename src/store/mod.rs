//! Store Module
//!
//! Typed record access over the transactional backend, with lazy TTL
//! filtering on reads.

mod record;
mod store;

// Re-export public types
pub use record::{record_key, Record, RECORD_PREFIX};
pub use store::RecordStore;
