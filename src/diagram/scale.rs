//! Best-effort scaling of declared SVG dimensions.
//!
//! Rewrites the `width`/`height` attributes on the first `<svg>` opening tag
//! by a scale factor, preserving unit suffixes. Scaling is never
//! correctness-critical: on any parse trouble the original document is
//! returned unmodified.

use regex::Regex;
use std::sync::LazyLock;

/// First top-level svg opening tag.
static SVG_OPEN_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<svg\b[^>]*>").expect("valid regex"));

/// `width="…"` / `height="…"` attributes. The leading whitespace capture
/// keeps `stroke-width` and friends from matching.
static DIMENSION_ATTR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)(\s)(width|height)\s*=\s*"([^"]*)""#).expect("valid regex")
});

/// Scale the declared dimensions of an svg document.
///
/// A scale of exactly 1.0 returns the input unchanged. Attributes that are
/// absent stay absent; shrink factors work the same as growth factors.
pub fn apply_scale(svg: &str, scale: f64) -> String {
    if (scale - 1.0).abs() < f64::EPSILON {
        return svg.to_string();
    }

    let Some(tag) = SVG_OPEN_TAG_RE.find(svg) else {
        return svg.to_string();
    };

    let mut failed = false;
    let rewritten = DIMENSION_ATTR_RE.replace_all(tag.as_str(), |caps: &regex::Captures| {
        match scale_dimension(&caps[3], scale) {
            Some(value) => format!(r#"{}{}="{value}""#, &caps[1], &caps[2]),
            None => {
                failed = true;
                caps[0].to_string()
            }
        }
    });
    if failed {
        return svg.to_string();
    }

    let mut output = String::with_capacity(svg.len() + 8);
    output.push_str(&svg[..tag.start()]);
    output.push_str(&rewritten);
    output.push_str(&svg[tag.end()..]);
    output
}

/// Scale one attribute value: leading number times `scale`, formatted with
/// two decimals, with the trailing unit suffix (if any) kept as-is.
fn scale_dimension(value: &str, scale: f64) -> Option<String> {
    let value = value.trim();
    let number_end = value
        .find(|c: char| !c.is_ascii_digit() && c != '.')
        .unwrap_or(value.len());
    let number: f64 = value[..number_end].parse().ok()?;
    let unit = &value[number_end..];
    Some(format!("{:.2}{unit}", number * scale))
}
