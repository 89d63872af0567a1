//! Main content extraction.
//!
//! Turns an HTML page into its title and main body text:
//!
//! 1. Reject input that is not text at all (binary payloads).
//! 2. Parse, read the title, and guard against pathological nesting.
//! 3. Clean the tree: drop non-content elements, page chrome outside the
//!    main region, boilerplate-named containers and link-heavy lists.
//! 4. Segment the remaining body into text blocks and classify each block
//!    as content or boilerplate.
//! 5. Join the content blocks in document order.
//!
//! # Modules
//!
//! - `blocks`: block segmentation of the cleaned DOM
//! - `classifier`: content/boilerplate labeling of blocks
//! - `title`: title lookup

pub mod blocks;
pub mod classifier;
pub mod title;

use crate::dom::{self, Document, NodeRef, Selection};
use crate::encoding;
use crate::error::{Error, Result};
use crate::link_density::link_density_test;
use crate::patterns::{
    is_boilerplate_name, CONTENT_ROOT_TAGS, DISCARD_SELECTOR, LINK_CONTAINER_SELECTOR,
    PAGE_CHROME_SELECTOR,
};
use crate::result::ExtractedDocument;
use crate::Options;

pub use blocks::{segment, TextBlock};
pub use classifier::classify;
pub use title::extract_title;

/// Elements never removed by name-based cleaning.
const PROTECTED_TAGS: &[&str] = &["html", "head", "body", "article", "main"];

/// Selector for regions that hold the main content.
const CONTENT_REGION_SELECTOR: &str = "article, main, [role='main']";

/// Extract title and main content from an HTML string.
///
/// Empty or whitespace-only input yields an empty document.
///
/// # Errors
///
/// - [`Error::MalformedInput`] if the input is binary data rather than markup.
/// - [`Error::Extraction`] if the element tree nests deeper than
///   `options.max_tree_depth`.
pub fn extract(html: &str, options: &Options) -> Result<ExtractedDocument> {
    if html.trim().is_empty() {
        return Ok(ExtractedDocument::default());
    }
    check_textual(html, options)?;

    let doc = Document::from(html);
    let title = extract_title(&doc, options);

    let root = doc.select("html");
    if let Some(node) = root.nodes().first() {
        let depth = dom::max_depth(node, options.max_tree_depth);
        if depth > options.max_tree_depth {
            return Err(Error::Extraction(format!(
                "element nesting exceeds {} levels",
                options.max_tree_depth
            )));
        }
    }

    clean(&doc, options);

    let body = doc.select("body");
    let mut blocks = body.nodes().first().map(|n| segment(*n)).unwrap_or_default();
    classify(&mut blocks, options);

    let content: Vec<&str> = blocks
        .iter()
        .filter(|b| b.is_content)
        .map(|b| b.text.as_str())
        .collect();

    tracing::debug!(
        blocks = blocks.len(),
        content_blocks = content.len(),
        has_title = title.is_some(),
        "extracted main content"
    );

    Ok(ExtractedDocument::new(title, content.join("\n")))
}

/// Extract from raw bytes, decoding them first.
///
/// `declared_encoding` is a charset label or a `Content-Type` value from the
/// transport; it wins over anything declared inside the document.
///
/// # Errors
///
/// Same as [`extract`].
pub fn extract_bytes(
    html: &[u8],
    declared_encoding: Option<&str>,
    options: &Options,
) -> Result<ExtractedDocument> {
    if html.contains(&0) && !has_utf16_bom(html) {
        return Err(Error::MalformedInput("input contains NUL bytes".into()));
    }
    let text = encoding::decode(html, declared_encoding);
    extract(&text, options)
}

fn has_utf16_bom(bytes: &[u8]) -> bool {
    bytes.starts_with(&[0xFF, 0xFE]) || bytes.starts_with(&[0xFE, 0xFF])
}

/// Reject text that is mostly control characters or decode failures.
fn check_textual(html: &str, options: &Options) -> Result<()> {
    if html.contains('\0') {
        return Err(Error::MalformedInput("input contains NUL characters".into()));
    }
    let ratio = encoding::garbage_ratio(html);
    if ratio > options.max_garbage_ratio {
        return Err(Error::MalformedInput(format!(
            "input does not look like markup ({:.0}% unreadable characters)",
            ratio * 100.0
        )));
    }
    Ok(())
}

/// Remove everything that cannot be main content.
fn clean(doc: &Document, options: &Options) {
    dom::remove(&doc.select(DISCARD_SELECTOR));

    let chrome: Vec<NodeRef> = doc
        .select(PAGE_CHROME_SELECTOR)
        .nodes()
        .iter()
        .filter(|n| !dom::has_ancestor(n, CONTENT_ROOT_TAGS))
        .copied()
        .collect();
    for node in chrome {
        dom::remove(&Selection::from(node));
    }

    let named: Vec<NodeRef> = doc
        .select("[class], [id]")
        .nodes()
        .iter()
        .filter(|n| is_removable_by_name(n))
        .copied()
        .collect();
    for node in named {
        dom::remove(&Selection::from(node));
    }

    let link_lists: Vec<NodeRef> = doc
        .select(LINK_CONTAINER_SELECTOR)
        .nodes()
        .iter()
        .filter(|n| link_density_test(&Selection::from(**n), options))
        .copied()
        .collect();
    for node in link_lists {
        dom::remove(&Selection::from(node));
    }
}

fn is_removable_by_name(node: &NodeRef) -> bool {
    if dom::tag_is(node, PROTECTED_TAGS) {
        return false;
    }
    let Some(name) = dom::class_and_id(node) else {
        return false;
    };
    if !is_boilerplate_name(&name) {
        return false;
    }
    Selection::from(*node).select(CONTENT_REGION_SELECTOR).is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract_ok(html: &str) -> ExtractedDocument {
        match extract(html, &Options::default()) {
            Ok(doc) => doc,
            Err(err) => panic!("expected Ok(_), got Err({err:?})"),
        }
    }

    #[test]
    fn article_text_survives_and_navigation_goes() {
        let html = r#"<html><head><title>Trip Report</title></head><body>
            <nav><a href="/">Home</a> <a href="/news">News</a></nav>
            <div class="sidebar"><p>Subscribe to our newsletter for weekly updates and more.</p></div>
            <article><p>John Smith visited Paris. He works for Acme Corp.</p></article>
            <footer>Copyright 2024 Example Media. All rights reserved worldwide.</footer>
            </body></html>"#;
        let doc = extract_ok(html);
        assert_eq!(doc.title.as_deref(), Some("Trip Report"));
        assert_eq!(doc.body, "John Smith visited Paris. He works for Acme Corp.");
    }

    #[test]
    fn empty_input_gives_empty_document() {
        let doc = extract_ok("   ");
        assert_eq!(doc, ExtractedDocument::default());
    }

    #[test]
    fn page_without_content_has_empty_body() {
        let doc = extract_ok(
            "<html><head><title>Menu</title></head><body><nav><a href='/a'>A</a></nav></body></html>",
        );
        assert_eq!(doc.title.as_deref(), Some("Menu"));
        assert_eq!(doc.body, "");
    }

    #[test]
    fn content_blocks_are_newline_separated() {
        let doc = extract_ok(
            "<body><article><p>First sentence of the story.</p><p>Second sentence of the story.</p></article></body>",
        );
        assert_eq!(doc.body, "First sentence of the story.\nSecond sentence of the story.");
    }

    #[test]
    fn header_inside_article_is_kept() {
        let doc = extract_ok(
            "<body><header>Site banner text</header><article><header><h1>Headline</h1></header>\
             <p>The report covers a long day of meetings in the capital.</p></article></body>",
        );
        assert!(doc.body.contains("Headline"));
        assert!(!doc.body.contains("Site banner"));
    }

    #[test]
    fn wrapper_with_boilerplate_name_around_article_is_kept() {
        let doc = extract_ok(
            "<body><div class='nav-wrapper'><article><p>The text inside is the real story of the day.</p></article></div></body>",
        );
        assert_eq!(doc.body, "The text inside is the real story of the day.");
    }

    #[test]
    fn nul_characters_are_malformed() {
        let err = extract("<p>a\0b</p>", &Options::default()).err();
        assert!(matches!(err, Some(Error::MalformedInput(_))));
    }

    #[test]
    fn binary_bytes_are_malformed() {
        let bytes: Vec<u8> = (0u8..=255).cycle().take(2048).collect();
        let err = extract_bytes(&bytes, None, &Options::default()).err();
        assert!(matches!(err, Some(Error::MalformedInput(_))));
    }

    #[test]
    fn excessive_nesting_is_an_extraction_error() {
        let options = Options {
            max_tree_depth: 8,
            ..Options::default()
        };
        let html = format!("<body>{}text{}</body>", "<div>".repeat(20), "</div>".repeat(20));
        let err = extract(&html, &options).err();
        assert!(matches!(err, Some(Error::Extraction(_))));
    }

    #[test]
    fn declared_encoding_is_honored() {
        let (bytes, _, _) = encoding_rs::WINDOWS_1252
            .encode("<body><article><p>Caf\u{e9} owners met in Montr\u{e9}al today.</p></article></body>");
        let doc = match extract_bytes(&bytes, Some("windows-1252"), &Options::default()) {
            Ok(doc) => doc,
            Err(err) => panic!("expected Ok(_), got Err({err:?})"),
        };
        assert_eq!(doc.body, "Caf\u{e9} owners met in Montr\u{e9}al today.");
    }
}
