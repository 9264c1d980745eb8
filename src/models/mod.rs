//! Request and Response models for the paste server API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! serializing/deserializing HTTP request and response bodies.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{QueryRequest, UpdateRequest};
pub use responses::{ErrorResponse, HealthResponse, QueryResponse, UpdateResponse};

// == Public Constants ==
/// Maximum allowed record name length in characters
pub const MAX_NAME_LENGTH: usize = 64;

/// Maximum allowed password length in characters
pub const MAX_PASSWORD_LENGTH: usize = 64;

/// Maximum allowed content length in characters
pub const MAX_CONTENT_LENGTH: usize = 32_768;
