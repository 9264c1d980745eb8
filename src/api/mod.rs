//! API Module
//!
//! HTTP handlers and routing for the paste server REST API.
//!
//! # Endpoints
//! - `POST /update` - Create or overwrite a record (password-gated)
//! - `POST /query` - Retrieve record content by name
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
