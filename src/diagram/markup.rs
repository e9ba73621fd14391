//! Markup scraping helpers shared by the classifier and the diagnostic
//! extractor.
//!
//! Everything here is heuristic and tied to the error-page and SVG markup the
//! Kroki service currently emits. Keeping the patterns in one module means an
//! upstream markup change is a one-file update, not a classification-contract
//! change.

use regex::Regex;
use std::sync::LazyLock;

/// Opening of an HTML document, optionally preceded by a DOCTYPE declaration.
static HTML_DOC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\s*(?:<!doctype\b[^>]*>\s*)?<html[\s>]").expect("valid regex"));

pub(crate) static TITLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<title[^>]*>(.*?)</title>").expect("valid regex"));

pub(crate) static BODY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<body[^>]*>(.*?)</body>").expect("valid regex"));

pub(crate) static PRE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<pre[^>]*>(.*?)</pre>").expect("valid regex"));

/// Any markup tag, for stripping.
static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<[^>]*>").expect("valid regex"));

/// Line-break tags, translated to newlines before stripping.
static BR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)<br\s*/?>").expect("valid regex"));

/// SVG `<text>` element carrying an error class.
static ERROR_CLASS_TEXT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<text[^>]*class\s*=\s*"[^"]*error[^"]*"[^>]*>(.*?)</text>"#)
        .expect("valid regex")
});

/// SVG `<text>` element filled red, the other way Kroki marks inline errors.
static RED_FILL_TEXT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r##"(?is)<text[^>]*fill\s*=\s*"(?:red|#ff0000|#f00)"[^>]*>(.*?)</text>"##)
        .expect("valid regex")
});

/// Whether the first ~100 characters of a body read as an HTML document.
pub(crate) fn looks_like_html_document(text: &str) -> bool {
    let prefix: String = text.chars().take(100).collect();
    HTML_DOC_RE.is_match(&prefix)
}

/// Search svg text for an inline error marker and return its decoded message.
pub(crate) fn find_inline_error(svg: &str) -> Option<String> {
    let caps = ERROR_CLASS_TEXT_RE
        .captures(svg)
        .or_else(|| RED_FILL_TEXT_RE.captures(svg))?;
    let message = text_content(&caps[1]);
    (!message.is_empty()).then_some(message)
}

/// Reduce an element's inner markup to plain text: `<br>` becomes a newline,
/// remaining tags are stripped, entities are decoded, ends are trimmed.
pub(crate) fn text_content(inner: &str) -> String {
    let with_breaks = BR_RE.replace_all(inner, "\n");
    let stripped = TAG_RE.replace_all(&with_breaks, "");
    decode_entities(stripped.trim())
}

/// Decode the entities Kroki emits in error text. `&amp;` goes last so a
/// double-escaped sequence stays escaped once.
pub(crate) fn decode_entities(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

/// Collapse runs of whitespace (including newlines) into single spaces.
pub(crate) fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_document_detection() {
        assert!(looks_like_html_document("<html><body>nope</body></html>"));
        assert!(looks_like_html_document("<HTML lang=\"en\"><head>"));
        assert!(looks_like_html_document(
            "<!DOCTYPE html>\n<html>\n<head><title>err</title></head>"
        ));
        assert!(!looks_like_html_document("<svg xmlns=\"x\"><text>ok</text></svg>"));
        assert!(!looks_like_html_document("plain text mentioning <html> later"));
    }

    #[test]
    fn test_find_inline_error_by_class() {
        let svg = r#"<svg><text class="error">bad syntax</text></svg>"#;
        assert_eq!(find_inline_error(svg).as_deref(), Some("bad syntax"));
    }

    #[test]
    fn test_find_inline_error_by_red_fill() {
        let svg = r#"<svg><text x="10" fill="red">Syntax error in graph</text></svg>"#;
        assert_eq!(find_inline_error(svg).as_deref(), Some("Syntax error in graph"));
    }

    #[test]
    fn test_find_inline_error_decodes_entities_and_breaks() {
        let svg = r#"<svg><text class="error-text">unexpected token &lt;here&gt;<br/>line 3 &amp; 4</text></svg>"#;
        assert_eq!(
            find_inline_error(svg).as_deref(),
            Some("unexpected token <here>\nline 3 & 4")
        );
    }

    #[test]
    fn test_no_inline_error_in_clean_svg() {
        let svg = r##"<svg><text class="node-label">A</text><text fill="#000">B</text></svg>"##;
        assert!(find_inline_error(svg).is_none());
    }

    #[test]
    fn test_empty_error_element_is_ignored() {
        let svg = r#"<svg><text class="error">   </text></svg>"#;
        assert!(find_inline_error(svg).is_none());
    }

    #[test]
    fn test_text_content_strips_nested_tags() {
        assert_eq!(
            text_content(r#"<tspan x="0">first</tspan> <tspan>second</tspan>"#),
            "first second"
        );
    }

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("  a\n\n  b\tc  "), "a b c");
    }
}
