//! Diagnostic message extraction for classified error responses.
//!
//! Turns an HTML error page or an inline image error into text a human can
//! act on. Extraction never fails: when nothing recognizable is found it
//! falls back to a generic headline rather than erroring.

use super::markup;

/// Fixed headline for the service's token-decode failures.
const DECODE_FAILURE_NOTICE: &str = "Kroki was unable to decode the diagram payload. \
     Check that the diagram source is plain text and resubmit it.";

/// Error-page bodies longer than this are dropped from the diagnostic to
/// avoid flooding the caller with markup noise.
const MAX_INLINE_BODY: usize = 300;

/// Derive a diagnostic from an HTML error page.
///
/// The document title is the headline. A decode-failure marker phrase
/// switches to a fixed, user-actionable headline plus any `<pre>` detail
/// block; otherwise a short tag-stripped body is appended parenthetically.
pub fn html_error_message(document: &str) -> String {
    if document.to_ascii_lowercase().contains("unable to decode") {
        let mut message = DECODE_FAILURE_NOTICE.to_string();
        if let Some(detail) = captured_text(&markup::PRE_RE, document) {
            message.push_str("\nDetails:\n");
            message.push_str(&detail);
        }
        return message;
    }

    let title = captured_text(&markup::TITLE_RE, document);
    let body_text = captured_text(&markup::BODY_RE, document).map(|t| markup::collapse_whitespace(&t));

    match (title, body_text) {
        (Some(title), Some(text)) if text.len() < MAX_INLINE_BODY => format!("{title} ({text})"),
        (Some(title), _) => title,
        (None, Some(text)) if text.len() < MAX_INLINE_BODY => {
            format!("Kroki returned an error page ({text})")
        }
        _ => "Kroki returned an unrecognized error page".to_string(),
    }
}

/// Wrap an already-extracted inline image error with instructions.
pub fn inline_error_message(message: &str) -> String {
    format!("Diagram renderer reported an error: {message}\nReview the diagram source and correct it.")
}

/// First capture of `re` in `document`, reduced to non-empty plain text.
fn captured_text(re: &regex::Regex, document: &str) -> Option<String> {
    let text = markup::text_content(re.captures(document)?.get(1)?.as_str());
    (!text.is_empty()).then_some(text)
}
