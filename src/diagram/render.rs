//! Operation orchestrator: the two render pipelines behind the MCP tools.
//!
//! Each operation is a straight-line pipeline (encode, fetch, classify,
//! then extract or post-process) with branching only on the classification
//! outcome. One outbound request per invocation, no retries, no state shared
//! between invocations.

use std::path::{Path, PathBuf};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::config::ServiceConfig;

use super::classify::{ClassificationOutcome, classify};
use super::client::Transport;
use super::diagnostics;
use super::encode::encode_source;
use super::error::DiagramError;
use super::scale::apply_scale;
use super::types::{OutputFormat, RenderRequest};

/// Kroki-backed diagram rendering, generic over the transport so tests can
/// substitute canned responses.
pub struct DiagramService<T: Transport> {
    config: ServiceConfig,
    transport: T,
}

impl<T: Transport> DiagramService<T> {
    pub fn new(config: ServiceConfig, transport: T) -> Self {
        Self { config, transport }
    }

    /// Build the render URL for a request. Pure function of the request and
    /// the configured server: the token comes straight from the encoder, and
    /// base64 maps to the `svg` path segment.
    pub fn render_url(&self, request: &RenderRequest) -> String {
        format!(
            "{}/{}/{}/{}",
            self.config.server_url,
            request.diagram_type.kroki_name(),
            request.format.path_segment(),
            encode_source(&request.source)
        )
    }

    /// Produce a shareable render URL.
    ///
    /// The request is first probed through the full pipeline so a URL is only
    /// handed out for a diagram the server actually renders; the returned
    /// link is then rebuilt deterministically rather than taken from probe
    /// state.
    pub fn generate_url(&self, request: &RenderRequest) -> Result<String, DiagramError> {
        self.fetch_render(request)?;
        let url = self.render_url(request);
        log::info!(
            "generated {} url for {} diagram",
            request.format.as_str(),
            request.diagram_type.kroki_name()
        );
        Ok(url)
    }

    /// Render a diagram and write it to `path`.
    ///
    /// Failures are annotated with the target path. The file is only created
    /// once the full payload is in hand; a partial write cannot happen.
    pub fn download_image(
        &self,
        request: &RenderRequest,
        path: &Path,
    ) -> Result<PathBuf, DiagramError> {
        let bytes = self
            .fetch_render(request)
            .map_err(|e| e.for_target(path))?;
        let bytes = postprocess(request, bytes);
        write_output(path, &bytes).map_err(|e| e.for_target(path))?;
        log::info!(
            "saved {} diagram ({} bytes) to {}",
            request.diagram_type.kroki_name(),
            bytes.len(),
            path.display()
        );
        Ok(path.to_path_buf())
    }

    /// Shared fetch → classify → extract pipeline, yielding usable bytes.
    fn fetch_render(&self, request: &RenderRequest) -> Result<Vec<u8>, DiagramError> {
        let url = self.render_url(request);
        let response = self.transport.fetch(&url)?;
        match classify(response, request.format) {
            ClassificationOutcome::Success { bytes, .. } => Ok(bytes),
            ClassificationOutcome::HtmlError { body } => Err(DiagramError::RemoteDecode(
                diagnostics::html_error_message(&body),
            )),
            ClassificationOutcome::InlineImageError { message } => Err(
                DiagramError::InlineRender(diagnostics::inline_error_message(&message)),
            ),
            ClassificationOutcome::TransportError { status, snippet } => {
                Err(DiagramError::from_status(status, &snippet))
            }
        }
    }
}

/// Format-specific post-processing of successful render bytes: svg gets its
/// declared dimensions scaled, base64 wraps the svg payload; everything else
/// passes through untouched.
fn postprocess(request: &RenderRequest, bytes: Vec<u8>) -> Vec<u8> {
    match request.format {
        OutputFormat::Svg if (request.scale - 1.0).abs() > f64::EPSILON => {
            match String::from_utf8(bytes) {
                Ok(svg) => apply_scale(&svg, request.scale).into_bytes(),
                // Not UTF-8 text; scaling is best-effort, leave it alone.
                Err(e) => e.into_bytes(),
            }
        }
        OutputFormat::Base64 => STANDARD.encode(&bytes).into_bytes(),
        _ => bytes,
    }
}

/// Create parent directories and write the full buffer.
fn write_output(path: &Path, bytes: &[u8]) -> Result<(), DiagramError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|e| {
            DiagramError::Internal(format!(
                "Failed to create directory {}: {e}",
                parent.display()
            ))
        })?;
    }
    std::fs::write(path, bytes)
        .map_err(|e| DiagramError::Internal(format!("Failed to write file: {e}")))
}
