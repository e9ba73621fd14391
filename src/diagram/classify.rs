//! Response classification: decide what a Kroki HTTP response actually is.
//!
//! Kroki returns HTTP 200 even when it has embedded an error inside an
//! otherwise well-formed image for some grammars, so the status code alone is
//! insufficient and byte-content inspection is mandatory. Binary formats
//! (png/pdf/jpeg) are not introspected for embedded errors; that is an
//! accepted blind spot, not something to mask.

use super::client::RawResponse;
use super::markup;
use super::types::OutputFormat;

/// The classified meaning of one raw response.
#[derive(Debug, Clone)]
pub enum ClassificationOutcome {
    /// A usable payload of the requested format.
    Success {
        bytes: Vec<u8>,
        content_type: Option<String>,
    },
    /// The service answered with an HTML error page.
    HtmlError { body: String },
    /// The service answered with an image whose content is an error message,
    /// already extracted and entity-decoded.
    InlineImageError { message: String },
    /// Non-2xx HTTP status.
    TransportError { status: u16, snippet: String },
}

/// Classify a raw response for the given requested format. First match wins:
/// status, then HTML markers, then (svg/base64 only) inline error markers,
/// then success.
pub fn classify(response: RawResponse, format: OutputFormat) -> ClassificationOutcome {
    if !(200..300).contains(&response.status) {
        let snippet = response.body_snippet();
        return ClassificationOutcome::TransportError {
            status: response.status,
            snippet,
        };
    }

    let declared_html = response
        .content_type
        .as_deref()
        .is_some_and(|ct| ct.to_ascii_lowercase().contains("html"));

    let body_text = String::from_utf8_lossy(&response.body);
    if declared_html || markup::looks_like_html_document(&body_text) {
        return ClassificationOutcome::HtmlError {
            body: body_text.into_owned(),
        };
    }

    // base64 wraps svg, so its bodies are inspected with svg rules.
    if format.inspect_as_svg()
        && let Some(message) = markup::find_inline_error(&body_text)
    {
        return ClassificationOutcome::InlineImageError { message };
    }

    ClassificationOutcome::Success {
        content_type: response.content_type,
        bytes: response.body,
    }
}
