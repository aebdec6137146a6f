//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;

/// Default byte capacity: 1 MiB of keys and values.
pub const DEFAULT_CAPACITY_BYTES: usize = 1024 * 1024;

/// Default HTTP port.
pub const DEFAULT_SERVER_PORT: u16 = 3000;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Total bytes of keys plus values the cache may hold
    pub capacity_bytes: usize,
    /// HTTP server port
    pub server_port: u16,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CAPACITY_BYTES` - Cache byte budget (default: 1048576)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    pub fn from_env() -> Self {
        Self {
            capacity_bytes: parse_var("CAPACITY_BYTES").unwrap_or(DEFAULT_CAPACITY_BYTES),
            server_port: parse_var("SERVER_PORT").unwrap_or(DEFAULT_SERVER_PORT),
        }
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            capacity_bytes: DEFAULT_CAPACITY_BYTES,
            server_port: DEFAULT_SERVER_PORT,
        }
    }
}
