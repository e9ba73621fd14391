//! Kroki-backed diagram rendering pipeline.
//!
//! Data flows one direction per request:
//! source → [`encode`] → [`client`] → [`classify`] → ([`diagnostics`] on the
//! error path | [`scale`] on the svg success path) → [`render`].
//!
//! - [`types`] — closed diagram-type and output-format sets, validated requests
//! - [`encode`] — deflate + base64-url request tokens
//! - [`client`] — transport seam and the ureq-backed implementation
//! - [`classify`] — success / html error / inline image error / transport error
//! - [`diagnostics`] — human-actionable messages from classified errors
//! - [`scale`] — best-effort svg dimension rewriting
//! - [`render`] — the two operation pipelines composing all of the above

pub mod classify;
pub mod client;
pub mod diagnostics;
pub mod encode;
pub mod error;
pub(crate) mod markup;
pub mod render;
pub mod scale;
pub mod types;

pub use client::{HttpTransport, RawResponse, Transport};
pub use error::DiagramError;
pub use render::DiagramService;
pub use types::{DiagramType, OutputFormat, RenderRequest};
