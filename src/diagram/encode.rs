//! Diagram source encoding for Kroki GET requests.
//!
//! Kroki accepts the diagram source as a URL path segment: zlib-deflated,
//! then base64-encoded with the URL-safe alphabet. The token is write-only;
//! nothing in this crate ever decodes one.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE;
use flate2::Compression;
use flate2::write::ZlibEncoder;
use std::io::Write;

/// Encode diagram source text into a URL-safe request token.
///
/// Pure and deterministic: the same source always yields the same token.
/// Empty input yields a valid (empty-payload) token.
pub fn encode_source(source: &str) -> String {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::best());
    // Writes into a Vec-backed encoder cannot fail.
    let _ = encoder.write_all(source.as_bytes());
    let compressed = encoder.finish().unwrap_or_default();
    URL_SAFE.encode(compressed)
}
