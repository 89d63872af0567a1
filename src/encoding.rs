//! Character encoding detection and transcoding.
//!
//! Turns a raw HTML byte stream into UTF-8 text. A declared encoding (for
//! example from an HTTP `Content-Type` header) wins over anything sniffed from
//! the markup; otherwise the charset is taken from HTML meta tags, falling
//! back to UTF-8.

use encoding_rs::{Encoding, UTF_8};
use regex::Regex;
use std::sync::LazyLock;

/// Match `<meta charset="...">` tag
#[allow(clippy::expect_used)]
static CHARSET_META_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+charset\s*=\s*["']?([^"'\s>;]+)"#).expect("valid regex")
});

/// Match `<meta http-equiv="Content-Type" content="...; charset=...">` tag
#[allow(clippy::expect_used)]
static CONTENT_TYPE_CHARSET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+http-equiv\s*=\s*["']?content-type["']?[^>]+content\s*=\s*["']?[^"'>]*;\s*charset\s*=\s*([^"'\s>]+)"#).expect("valid regex")
});

/// Match the `charset` parameter of a MIME type such as `text/html; charset=utf-8`.
#[allow(clippy::expect_used)]
static MIME_CHARSET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)charset\s*=\s*["']?([^"'\s;]+)"#).expect("valid regex")
});

/// Number of leading bytes inspected for a meta charset declaration.
const SNIFF_LEN: usize = 1024;

/// Detect character encoding from HTML bytes.
///
/// Looks for charset declarations in the following order:
/// 1. `<meta charset="...">`
/// 2. `<meta http-equiv="Content-Type" content="...; charset=...">`
/// 3. Defaults to UTF-8 if no declaration found
///
/// A byte-order mark overrides all of the above.
#[must_use]
pub fn detect_encoding(html: &[u8]) -> &'static Encoding {
    if let Some((encoding, _)) = Encoding::for_bom(html) {
        return encoding;
    }

    let head = &html[..html.len().min(SNIFF_LEN)];
    let head_str = String::from_utf8_lossy(head);

    extract_charset(&head_str)
        .or_else(|| extract_content_type_charset(&head_str))
        .and_then(|label| Encoding::for_label(label.as_bytes()))
        .unwrap_or(UTF_8)
}

/// Resolve a declared encoding label.
///
/// Accepts either a bare label (`"iso-8859-1"`) or a full MIME type
/// (`"text/html; charset=iso-8859-1"`). Unknown labels yield `None`.
#[must_use]
pub fn resolve_label(declared: &str) -> Option<&'static Encoding> {
    let declared = declared.trim();
    let label = MIME_CHARSET_RE
        .captures(declared)
        .and_then(|c| c.get(1))
        .map_or(declared, |m| m.as_str());
    Encoding::for_label(label.as_bytes())
}

fn extract_charset(html: &str) -> Option<String> {
    CHARSET_META_RE
        .captures(html)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

fn extract_content_type_charset(html: &str) -> Option<String> {
    CONTENT_TYPE_CHARSET_RE
        .captures(html)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

/// Transcode HTML bytes to a UTF-8 string.
///
/// Uses `declared` when it names a known encoding, otherwise sniffs the
/// markup. Invalid sequences become U+FFFD rather than errors; whether the
/// result is usable is decided by [`garbage_ratio`].
///
/// # Examples
///
/// ```
/// use rs_distiller::encoding::decode;
///
/// let html = b"<html><body>Caf\xE9</body></html>";
/// assert!(decode(html, Some("text/html; charset=ISO-8859-1")).contains("Café"));
/// ```
#[must_use]
pub fn decode(html: &[u8], declared: Option<&str>) -> String {
    let encoding = declared
        .and_then(resolve_label)
        .unwrap_or_else(|| detect_encoding(html));

    let (decoded, _encoding_used, had_errors) = encoding.decode(html);
    if had_errors {
        tracing::debug!(encoding = encoding.name(), "lossy decode replaced invalid sequences");
    }
    decoded.into_owned()
}

/// Fraction of characters that are control characters or U+FFFD.
///
/// Tab, newline, carriage return and form feed are not counted. Returns `0.0`
/// for empty input.
#[must_use]
pub fn garbage_ratio(text: &str) -> f64 {
    let mut total = 0usize;
    let mut garbage = 0usize;
    for ch in text.chars() {
        total += 1;
        let is_garbage = ch == '\u{FFFD}'
            || (ch.is_control() && !matches!(ch, '\t' | '\n' | '\r' | '\u{0C}'));
        if is_garbage {
            garbage += 1;
        }
    }
    if total == 0 {
        0.0
    } else {
        garbage as f64 / total as f64
    }
}
