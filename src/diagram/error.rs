//! Error taxonomy for the diagram rendering pipeline.
//!
//! Every failure a tool call can surface is one of these variants. The
//! `Display` text is the user-facing diagnostic; constructors build the
//! complete message up front.

use std::path::Path;
use thiserror::Error;

/// A failure from the render pipeline, carrying its user-facing diagnostic.
#[derive(Debug, Clone, Error)]
pub enum DiagramError {
    /// Bad tool parameters. Raised before any network activity.
    #[error("{0}")]
    InvalidParams(String),

    /// The service could not decode or parse the submitted diagram source
    /// (HTML error page responses fall in this bucket).
    #[error("{0}")]
    RemoteDecode(String),

    /// The service returned a well-formed image whose visible content is
    /// itself an error message.
    #[error("{0}")]
    InlineRender(String),

    /// HTTP-level failure: a non-2xx status, or a network error reaching the
    /// server (`status` is `None` for the latter).
    #[error("{message}")]
    Transport {
        status: Option<u16>,
        message: String,
    },

    /// Anything not otherwise classified, e.g. filesystem errors while
    /// saving output.
    #[error("{0}")]
    Internal(String),
}

impl DiagramError {
    /// Build a transport error for a non-2xx HTTP status.
    ///
    /// A 400 from Kroki almost always means the diagram source itself is
    /// bad, so it gets a tailored message; other statuses keep a generic
    /// "request failed" framing.
    pub fn from_status(status: u16, snippet: &str) -> Self {
        let detail = if snippet.is_empty() {
            String::new()
        } else {
            format!(" Server response: {snippet}")
        };
        let message = if status == 400 {
            format!(
                "Kroki rejected the request (HTTP 400). This usually means the diagram \
                 source has a syntax error.{detail}"
            )
        } else {
            format!("Diagram render request failed (HTTP {status}).{detail}")
        };
        DiagramError::Transport {
            status: Some(status),
            message,
        }
    }

    /// Build a transport error for a network-level failure (DNS, TLS,
    /// connection refused, timeout).
    pub fn network(detail: impl std::fmt::Display) -> Self {
        DiagramError::Transport {
            status: None,
            message: format!(
                "Failed to reach the Kroki server: {detail}. \
                 Check your network connection and the configured server URL."
            ),
        }
    }

    /// Annotate this error with the file path a render was targeting, so the
    /// caller can correlate the failure to its destination.
    pub fn for_target(self, path: &Path) -> Self {
        let annotate = |message: String| format!("{message} (while rendering to {})", path.display());
        match self {
            DiagramError::InvalidParams(m) => DiagramError::InvalidParams(annotate(m)),
            DiagramError::RemoteDecode(m) => DiagramError::RemoteDecode(annotate(m)),
            DiagramError::InlineRender(m) => DiagramError::InlineRender(annotate(m)),
            DiagramError::Transport { status, message } => DiagramError::Transport {
                status,
                message: annotate(message),
            },
            DiagramError::Internal(m) => DiagramError::Internal(annotate(m)),
        }
    }
}
