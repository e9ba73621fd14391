//! HTTP client helper with native-tls support.
//!
//! This module provides a configured HTTP agent that uses native-tls for TLS
//! connections, which works better in VM environments where ring/rustls may
//! have issues.

use std::time::Duration;
use ureq::Agent;
use ureq::tls::{RootCerts, TlsConfig, TlsProvider};

/// Maximum response body size for render responses (16 MB).
///
/// Kroki output for pathological diagrams can be large, but anything past
/// this is either abuse or a misbehaving server.
pub const MAX_RESPONSE_SIZE: u64 = 16 * 1024 * 1024;

/// Validate that a URL is usable as a Kroki server base address.
///
/// Requires an http or https scheme and a host. Plain http is allowed because
/// self-hosted Kroki instances commonly run without TLS on a local network.
pub fn validate_server_url(raw: &str) -> Result<(), String> {
    let parsed = url::Url::parse(raw).map_err(|e| format!("Invalid server URL '{raw}': {e}"))?;

    match parsed.scheme() {
        "http" | "https" => {}
        scheme => {
            return Err(format!(
                "Unsupported URL scheme '{scheme}' for the Kroki server; \
                 only http and https are allowed. URL: {raw}"
            ));
        }
    }

    if parsed.host_str().is_none_or(str::is_empty) {
        return Err(format!("Server URL '{raw}' has no host"));
    }

    Ok(())
}

/// Create a new HTTP agent configured with native-tls and a global timeout.
///
/// Uses PlatformVerifier for the system's built-in root certificates.
/// Non-2xx statuses are returned as responses rather than errors so that the
/// response classifier can inspect error-page bodies.
pub fn agent(timeout: Duration) -> Agent {
    let tls_config = TlsConfig::builder()
        .provider(TlsProvider::NativeTls)
        .root_certs(RootCerts::PlatformVerifier)
        .build();

    Agent::config_builder()
        .tls_config(tls_config)
        .timeout_global(Some(timeout))
        .http_status_as_error(false)
        .build()
        .into()
}
