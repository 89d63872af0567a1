//! Title extraction from document metadata.

use super::blocks::normalize;
use crate::dom::{self, Document};
use crate::Options;

/// Meta tags consulted, in order, when the page has no usable `<title>`.
const META_TITLE_SELECTORS: &[&str] = &[
    "meta[property='og:title']",
    "meta[name='twitter:title']",
    "meta[name='title']",
];

/// Extract the page title.
///
/// Uses the declared `<title>` element, whitespace-normalized. When it is
/// missing or empty and `options.meta_title_fallback` is set, falls back to
/// the Open Graph / Twitter title meta tags. Returns `None` if nothing
/// non-empty is found.
#[must_use]
pub fn extract_title(doc: &Document, options: &Options) -> Option<String> {
    let title_elem = doc.select("head title");
    let title_elem = if title_elem.is_empty() {
        doc.select("title")
    } else {
        title_elem
    };

    if let Some(node) = title_elem.nodes().first() {
        let title = normalize(&node.text());
        if !title.is_empty() {
            return Some(title);
        }
    }

    if !options.meta_title_fallback {
        return None;
    }

    META_TITLE_SELECTORS.iter().find_map(|selector| {
        dom::get_attribute(&doc.select(selector), "content")
            .map(|content| normalize(&content))
            .filter(|title| !title.is_empty())
    })
}
