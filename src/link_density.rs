//! Link Density Testing
//!
//! Sections that are rich in links are probably navigation, tag lists or
//! "related articles" boxes. This module measures link text against total
//! text, both for whole containers and for single text blocks.

use crate::dom::{self, Selection};
use crate::Options;

/// Heuristics collected over the links of a container.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LinkInfo {
    /// Total characters of (trimmed) link text.
    pub link_chars: usize,
    /// Links whose text is shorter than ten characters.
    pub short_links: usize,
    /// Links with any text at all.
    pub non_empty_links: usize,
}

/// Collect heuristics on link text.
#[must_use]
pub fn collect_link_info(links: &Selection) -> LinkInfo {
    let mut info = LinkInfo::default();

    for link in links.iter() {
        let text = link.text();
        let text_length = text.trim().chars().count();

        if text_length == 0 {
            continue;
        }

        info.link_chars += text_length;
        if text_length < 10 {
            info.short_links += 1;
        }
        info.non_empty_links += 1;
    }

    info
}

/// Ratio of link characters to all characters, `0.0` for empty text.
#[must_use]
pub fn density(link_chars: usize, text_chars: usize) -> f64 {
    if text_chars == 0 {
        0.0
    } else {
        link_chars as f64 / text_chars as f64
    }
}

/// Check whether a container should be removed because it is rich in links.
///
/// Short containers are judged strictly: no real link text, link text above
/// 80% of all text, or mostly short links (a menu) all count as boilerplate.
/// Long containers only go when their link density exceeds
/// `options.max_link_density` by a wide margin.
#[must_use]
pub fn link_density_test(element: &Selection, options: &Options) -> bool {
    let links = element.select("a");
    let n_links = links.length();

    if n_links == 0 {
        return false;
    }

    let text_tendril = dom::text_content(element);
    let text_length = text_tendril.trim().chars().count();
    let info = collect_link_info(&links);

    let has_next_sibling = element
        .nodes()
        .first()
        .and_then(dom_query::NodeRef::next_element_sibling)
        .is_some();
    let limit_length: usize = if has_next_sibling { 100 } else { 300 };

    if text_length < limit_length {
        if info.non_empty_links == 0 {
            return true;
        }

        if (info.link_chars as f64) > (text_length as f64) * 0.8 {
            return true;
        }

        // Typical of navigation menus
        if info.non_empty_links > 1
            && (info.short_links as f64) / (info.non_empty_links as f64) > 0.8
        {
            return true;
        }

        return false;
    }

    density(info.link_chars, text_length) > (options.max_link_density * 2.0).min(0.9)
}
