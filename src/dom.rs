//! DOM Operations Adapter
//!
//! Thin helpers over the `dom_query` crate used by the content extractor.
//! Tag names are compared case-insensitively without allocating.

// Re-export core types for external use
pub use dom_query::{Document, NodeRef, Selection};

// Re-export StrTendril for external use
pub use tendril::StrTendril;

// === Attribute Operations ===

/// Get any attribute value
#[inline]
#[must_use]
pub fn get_attribute(sel: &Selection, name: &str) -> Option<String> {
    sel.attr(name).map(|s| s.to_string())
}

/// Class and id of a node joined by a space, for name-based pattern matching.
///
/// Returns `None` when the node carries neither attribute.
#[must_use]
pub fn class_and_id(node: &NodeRef) -> Option<String> {
    let class = node.attr("class");
    let id = node.attr("id");
    match (class, id) {
        (None, None) => None,
        (Some(c), None) => Some(c.to_string()),
        (None, Some(i)) => Some(i.to_string()),
        (Some(c), Some(i)) => Some(format!("{c} {i}")),
    }
}

// === Tag/Node Information ===

/// Get the lowercase tag name of an element node.
#[must_use]
pub fn node_tag(node: &NodeRef) -> Option<String> {
    if !node.is_element() {
        return None;
    }
    node.node_name().map(|t| t.to_ascii_lowercase())
}

/// Whether an element node's tag is one of `tags` (lowercase).
#[must_use]
pub fn tag_is(node: &NodeRef, tags: &[&str]) -> bool {
    node.is_element()
        && node
            .node_name()
            .is_some_and(|name| tags.iter().any(|t| name.eq_ignore_ascii_case(t)))
}

/// Whether any ancestor of `node` is an element with one of `tags`.
#[must_use]
pub fn has_ancestor(node: &NodeRef, tags: &[&str]) -> bool {
    let mut current = node.parent();
    while let Some(parent) = current {
        if tag_is(&parent, tags) {
            return true;
        }
        current = parent.parent();
    }
    false
}

/// Child nodes (elements and text) of a node, in document order.
#[must_use]
pub fn child_nodes<'a>(node: &NodeRef<'a>) -> Vec<NodeRef<'a>> {
    let mut out = Vec::new();
    let mut child = node.first_child();
    while let Some(c) = child {
        child = c.next_sibling();
        out.push(c);
    }
    out
}

// === Text Content ===

/// Get all text content of node and descendants
///
/// Returns `StrTendril` for zero-copy passing. Use `.to_string()` only when
/// you need owned storage.
#[inline]
#[must_use]
pub fn text_content(sel: &Selection) -> StrTendril {
    sel.text()
}

// === Tree Manipulation ===

/// Remove every node matched by a selection.
#[inline]
pub fn remove(sel: &Selection) {
    sel.remove();
}

/// Maximum element nesting depth below `node` (`node` itself is depth 0).
///
/// Stops descending once `limit` is exceeded and returns `limit + 1`.
#[must_use]
pub fn max_depth(node: &NodeRef, limit: usize) -> usize {
    let mut deepest = 0;
    let mut stack = vec![(*node, 0usize)];
    while let Some((current, depth)) = stack.pop() {
        if depth > deepest {
            deepest = depth;
            if deepest > limit {
                return limit + 1;
            }
        }
        let mut child = current.first_child();
        while let Some(c) = child {
            if c.is_element() {
                stack.push((c, depth + 1));
            }
            child = c.next_sibling();
        }
    }
    deepest
}
