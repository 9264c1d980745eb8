//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;

/// Fallback instance id used when no deployment region hint is available.
pub const FALLBACK_INSTANCE_ID: &str = "single-instance";

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Lifetime in seconds given to every written record
    pub default_ttl: u64,
    /// Identity recorded in the sweep ledger's owner field
    pub instance_id: String,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 8000)
    /// - `DEFAULT_TTL` - Record lifetime in seconds (default: 86400, one day)
    /// - `DEPLOY_REGION` - Deployment region hint used as the instance id;
    ///   falls back to a fixed id when unset or empty
    pub fn from_env() -> Self {
        Self {
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8000),
            default_ttl: env::var("DEFAULT_TTL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(86_400),
            instance_id: env::var("DEPLOY_REGION")
                .ok()
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| FALLBACK_INSTANCE_ID.to_string()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 8000,
            default_ttl: 86_400,
            instance_id: FALLBACK_INSTANCE_ID.to_string(),
        }
    }
}
