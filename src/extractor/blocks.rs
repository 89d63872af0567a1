//! Text block segmentation.
//!
//! Flattens the cleaned DOM into a sequence of text blocks. A block is the
//! text between two block-level element boundaries; inline markup (links,
//! emphasis, spans) stays inside the block it appears in. Each block records
//! the metadata the classifier needs: word count, link text, the block-level
//! tag it came from, and whether it sits inside a main-content region.

use crate::dom::{self, NodeRef};
use crate::patterns::{CONTENT_CLASS, CONTENT_ROOT_TAGS, WHITESPACE_NORMALIZE};

/// Elements that open and close a text block.
const BLOCK_TAGS: &[&str] = &[
    "address", "article", "blockquote", "body", "caption", "center", "dd", "details", "div",
    "dl", "dt", "figcaption", "figure", "h1", "h2", "h3", "h4", "h5", "h6", "hr", "li",
    "main", "ol", "p", "pre", "section", "summary", "table", "td", "th", "tr", "ul",
];

const HEADING_TAGS: &[&str] = &["h1", "h2", "h3", "h4", "h5", "h6"];

/// One run of text between block-level boundaries.
#[derive(Debug, Clone, PartialEq)]
pub struct TextBlock {
    /// Whitespace-normalized text.
    pub text: String,
    /// Innermost block-level element the text belongs to.
    pub tag: &'static str,
    /// Number of whitespace-separated words.
    pub words: usize,
    /// Characters of text that sit inside `<a>` elements.
    pub link_chars: usize,
    /// Whether the block lies inside `<article>`, `<main>` or a content-named container.
    pub in_content_root: bool,
    /// Classification result; `false` until the classifier runs.
    pub is_content: bool,
}

impl TextBlock {
    /// Share of the block's characters that are link text.
    #[must_use]
    pub fn link_density(&self) -> f64 {
        crate::link_density::density(self.link_chars, self.text.chars().count())
    }

    #[must_use]
    pub fn is_heading(&self) -> bool {
        HEADING_TAGS.contains(&self.tag)
    }

    /// Whether the text ends like a sentence (optionally inside quotes or brackets).
    #[must_use]
    pub fn ends_sentence(&self) -> bool {
        self.text
            .trim_end_matches(['"', '\'', ')', ']', '\u{201D}', '\u{2019}'])
            .ends_with(['.', '!', '?', ':'])
    }
}

#[derive(Debug, Clone, Copy)]
struct Context {
    block_tag: &'static str,
    in_anchor: bool,
    in_content_root: bool,
}

#[derive(Default)]
struct Segmenter {
    blocks: Vec<TextBlock>,
    text: String,
    link_text: String,
    tag: &'static str,
    in_content_root: bool,
}

impl Segmenter {
    fn walk(&mut self, node: NodeRef<'_>, ctx: Context) {
        if node.is_text() {
            self.push_text(&node.text(), ctx);
            return;
        }

        let Some(tag) = dom::node_tag(&node) else {
            return;
        };

        if tag == "br" || tag == "img" {
            self.text.push(' ');
            return;
        }

        let block_tag = BLOCK_TAGS.iter().find(|t| **t == tag).copied();
        if block_tag.is_some() {
            self.flush();
        }

        let child_ctx = Context {
            block_tag: block_tag.unwrap_or(ctx.block_tag),
            in_anchor: ctx.in_anchor || tag == "a",
            in_content_root: ctx.in_content_root || is_content_root(&node, &tag),
        };
        for child in dom::child_nodes(&node) {
            self.walk(child, child_ctx);
        }

        if block_tag.is_some() {
            self.flush();
        }
    }

    fn push_text(&mut self, text: &str, ctx: Context) {
        if text.trim().is_empty() {
            if !self.text.is_empty() {
                self.text.push(' ');
            }
            return;
        }
        if self.text.trim().is_empty() {
            self.tag = ctx.block_tag;
            self.in_content_root = ctx.in_content_root;
        }
        self.text.push_str(text);
        if ctx.in_anchor {
            self.link_text.push_str(text);
            self.link_text.push(' ');
        }
    }

    fn flush(&mut self) {
        let raw = std::mem::take(&mut self.text);
        let raw_links = std::mem::take(&mut self.link_text);

        let text = normalize(&raw);
        if text.is_empty() {
            return;
        }
        let text_chars = text.chars().count();
        let link_chars = normalize(&raw_links).chars().count().min(text_chars);

        self.blocks.push(TextBlock {
            words: text.split_whitespace().count(),
            text,
            tag: self.tag,
            link_chars,
            in_content_root: self.in_content_root,
            is_content: false,
        });
    }
}

fn is_content_root(node: &NodeRef, tag: &str) -> bool {
    if CONTENT_ROOT_TAGS.contains(&tag) {
        return true;
    }
    if node.attr("role").is_some_and(|r| r.eq_ignore_ascii_case("main")) {
        return true;
    }
    dom::class_and_id(node).is_some_and(|name| CONTENT_CLASS.is_match(&name))
}

/// Collapse whitespace runs to single spaces and trim.
#[must_use]
pub fn normalize(text: &str) -> String {
    WHITESPACE_NORMALIZE.replace_all(text, " ").trim().to_string()
}

/// Split the subtree under `root` into text blocks in document order.
#[must_use]
pub fn segment(root: NodeRef<'_>) -> Vec<TextBlock> {
    let mut segmenter = Segmenter {
        tag: "body",
        ..Segmenter::default()
    };
    let ctx = Context {
        block_tag: "body",
        in_anchor: false,
        in_content_root: false,
    };
    segmenter.walk(root, ctx);
    segmenter.flush();
    segmenter.blocks
}
