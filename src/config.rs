//! Server configuration: which Kroki instance to talk to, and how long to
//! wait for it.
//!
//! Resolution order for the server URL: CLI flag, then the
//! `KROKI_SERVER_URL` environment variable, then the public kroki.io
//! instance.

use std::time::Duration;

/// Environment variable overriding the Kroki server base URL.
pub const SERVER_URL_ENV: &str = "KROKI_SERVER_URL";

/// Default Kroki server when nothing else is configured.
pub const DEFAULT_SERVER_URL: &str = "https://kroki.io";

/// Default HTTP timeout for render requests.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Resolved service configuration, fixed for the lifetime of the server.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Base URL of the Kroki server, without a trailing slash.
    pub server_url: String,
    /// Global timeout for each outbound render request.
    pub timeout: Duration,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ServiceConfig {
    /// Resolve configuration from an optional CLI override, the environment,
    /// and defaults, validating the resulting server URL.
    pub fn resolve(
        server_url: Option<String>,
        timeout_secs: Option<u64>,
    ) -> Result<Self, String> {
        let raw = server_url
            .or_else(|| std::env::var(SERVER_URL_ENV).ok())
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_SERVER_URL.to_string());

        let server_url = raw.trim_end_matches('/').to_string();
        crate::http::validate_server_url(&server_url)?;

        Ok(Self {
            server_url,
            timeout: Duration::from_secs(timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)),
        })
    }
}
