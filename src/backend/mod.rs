//! Backend Module
//!
//! The abstract transactional KV contract the core is written against, plus
//! the bundled in-memory engine. The concrete storage engine is deliberately
//! pluggable; everything above this module depends only on `KvBackend`.

mod kv;
mod memory;

pub use kv::{
    AtomicOp, BackendError, Consistency, Entry, KvBackend, ListOptions, ListPage, Value,
};
pub use memory::MemoryKv;

pub(crate) use kv::Mutation;
