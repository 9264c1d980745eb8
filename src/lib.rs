//! Pastekv - An ephemeral key-value paste server
//!
//! Records carry a TTL and are filtered lazily on read; a coordination-free
//! background sweep reclaims expired rows in batched optimistic transactions
//! against a shared transactional KV backend.

pub mod api;
pub mod backend;
pub mod clock;
pub mod config;
pub mod error;
pub mod models;
pub mod store;
pub mod sweep;

pub use api::AppState;
pub use backend::{KvBackend, MemoryKv};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::Config;
pub use store::{Record, RecordStore};
pub use sweep::{spawn_sweep, SweepCoordinator};
