//! Record Module
//!
//! Defines the stored record and its expiry judgment. Expiry is purely a
//! comparison of the stored timestamp against the clock at read time; the
//! backend itself enforces no TTL.

use serde::{Deserialize, Serialize};

// == Key Layout ==
/// Flat-namespace prefix under which records are persisted.
pub const RECORD_PREFIX: &str = "items/";

/// Backend key for the record with the given name.
pub fn record_key(name: &str) -> String {
    format!("{}{}", RECORD_PREFIX, name)
}

// == Record ==
/// A single ephemeral record.
///
/// `expires_at` is always set on write; a record with `expires_at <= now` is
/// logically absent even while the physical row still exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Record name, unique within the namespace
    pub name: String,
    /// Stored content
    pub content: String,
    /// Password gating overwrites; empty means unprotected
    #[serde(default)]
    pub password: String,
    /// Expiration timestamp (Unix seconds)
    pub expires_at: u64,
}

impl Record {
    // == Constructor ==
    /// Creates an empty record. The expiry starts in the past; callers set
    /// a real lifetime with `refresh_ttl` before writing.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: String::new(),
            password: String::new(),
            expires_at: 0,
        }
    }

    /// Resets the expiry to `now + ttl_seconds`.
    pub fn refresh_ttl(&mut self, now: u64, ttl_seconds: u64) {
        self.expires_at = now + ttl_seconds;
    }

    // == Is Expired ==
    /// Returns true once `now` has reached the expiration timestamp.
    ///
    /// Boundary condition: a record is expired when `expires_at <= now`,
    /// so a record expiring exactly now is already absent.
    pub fn is_expired(&self, now: u64) -> bool {
        self.expires_at <= now
    }

    /// Backend key this record is persisted under.
    pub fn key(&self) -> String {
        record_key(&self.name)
    }
}
