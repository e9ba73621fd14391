//! Transport client for the Kroki HTTP API.
//!
//! The [`Transport`] trait is the seam between the render pipeline and the
//! network: production code uses the ureq-backed [`HttpTransport`], tests
//! substitute stubs with canned responses. The transport performs exactly one
//! attempt per call; retry policy, if any, belongs to the caller.

use std::time::Duration;

use crate::http::{self, MAX_RESPONSE_SIZE};

use super::error::DiagramError;

/// A raw HTTP response, reduced to the fields the classifier consumes.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl RawResponse {
    /// A short lossy-decoded body prefix for transport diagnostics.
    pub fn body_snippet(&self) -> String {
        let text = String::from_utf8_lossy(&self.body);
        let trimmed = text.trim();
        let mut snippet: String = trimmed.chars().take(200).collect();
        if snippet.len() < trimmed.len() {
            snippet.push('…');
        }
        snippet
    }
}

/// One-shot HTTP fetch against a render URL.
pub trait Transport {
    /// Fetch the URL, returning the raw response regardless of status.
    ///
    /// Only network-level failures (DNS, TLS, connection, timeout) are
    /// errors; non-2xx statuses come back as data so the classifier owns
    /// status policy.
    fn fetch(&self, url: &str) -> Result<RawResponse, DiagramError>;
}

/// Production transport backed by a ureq agent.
pub struct HttpTransport {
    agent: ureq::Agent,
}

impl HttpTransport {
    /// Create a transport with the given request timeout.
    pub fn new(timeout: Duration) -> Self {
        Self {
            agent: http::agent(timeout),
        }
    }
}

impl Transport for HttpTransport {
    fn fetch(&self, url: &str) -> Result<RawResponse, DiagramError> {
        log::debug!("GET {url}");

        let response = self
            .agent
            .get(url)
            .header("User-Agent", concat!("kroki-mcp/", env!("CARGO_PKG_VERSION")))
            .call()
            .map_err(DiagramError::network)?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(ureq::http::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        // Cap the body read so a misbehaving server can't exhaust memory.
        let body = response
            .into_body()
            .with_config()
            .limit(MAX_RESPONSE_SIZE)
            .read_to_vec()
            .map_err(|e| {
                DiagramError::network(format!(
                    "reading the response body failed: {e}. \
                     The response may have been truncated or the connection dropped"
                ))
            })?;

        log::debug!(
            "{status} {} ({} bytes)",
            content_type.as_deref().unwrap_or("-"),
            body.len()
        );

        Ok(RawResponse {
            status,
            content_type,
            body,
        })
    }
}
