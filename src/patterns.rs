//! Compiled regex patterns and CSS selectors for content extraction.
//!
//! All patterns are compiled once at first use via `LazyLock`.

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use regex::Regex;

// =============================================================================
// Boilerplate Detection Patterns
// =============================================================================

/// Matches class/id tokens indicating navigation elements.
///
/// "nav" only matches at a token edge so layout containers such as
/// `in-page-nav-container` are left alone.
pub static NAVIGATION_CLASS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(^nav$|^nav[-_]|[-_]nav$|navbar|navigation|top[-_]?nav|main[-_]?menu|site[-_]?nav|\bmenu\b|site[-_]?footer|site[-_]?header|page[-_]?header|page[-_]?footer|breadcrumb(?:s)?|crumb(?:s)?|pagination|pager)",
    )
    .expect("NAVIGATION_CLASS regex")
});

/// Matches the leading class/id token of advertisement elements.
pub static ADVERTISEMENT_CLASS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(ad|ads|adv|advert|advertisement|banner|sponsor|sponsored|promo|dfp)$")
        .expect("ADVERTISEMENT_CLASS regex")
});

/// Matches class/id tokens indicating boilerplate content.
pub static BOILERPLATE_CLASS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(^comments?$|comment[-_]?(?:list|section|form)|shar(?:e|ing)[-_]?(?:bar|btn|buttons?|tools|links)|^share$|social|related|recommend(?:ed)?|\bfooter\b|copyright|disclaimer|more[-_]?from|you[-_]?may[-_]?like|taboola|outbrain|cookie[-_]?(?:consent|notice|banner)|consent[-_]?banner|gdpr|\blogin\b|\bsign[-_]?(?:in|up)\b|\bsubscribe\b|newsletter|trending|popular|most[-_]?read|tag[-_]?cloud|^sidebar|(?:left|right)[-_]sidebar|widget|skip[-_]?link|sr[-_]only|visually[-_]hidden)",
    )
    .expect("BOILERPLATE_CLASS regex")
});

/// Matches class/id names likely to contain main content.
pub static CONTENT_CLASS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(article|content|post|entry|story|body|main|text)")
        .expect("CONTENT_CLASS regex")
});

// =============================================================================
// Text Cleaning Patterns
// =============================================================================

/// Matches multiple whitespace characters for normalization.
pub static WHITESPACE_NORMALIZE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("WHITESPACE_NORMALIZE regex"));

// =============================================================================
// CSS Selectors
// =============================================================================

/// Elements that never carry article text.
pub const DISCARD_SELECTOR: &str = "script, style, noscript, template, iframe, object, embed, \
     svg, canvas, form, button, select, input, textarea, label, nav, aside, menu, dialog, \
     [role='navigation'], [role='banner'], [role='contentinfo'], [role='complementary'], \
     [role='search'], [hidden], [aria-hidden='true']";

/// Page-level header/footer elements, kept only inside an article or main region.
pub const PAGE_CHROME_SELECTOR: &str = "header, footer";

/// Containers whose link density is tested as a whole.
pub const LINK_CONTAINER_SELECTOR: &str = "ul, ol, dl";

/// Elements marking the main content region.
pub const CONTENT_ROOT_TAGS: &[&str] = &["article", "main"];

/// Decide whether a class/id string names a boilerplate element.
///
/// Each whitespace-separated token is checked against the navigation and
/// boilerplate patterns. The advertisement pattern only applies to the first
/// alphanumeric run so that `body-ad-wrapper` is not mistaken for an ad.
#[must_use]
pub fn is_boilerplate_name(name: &str) -> bool {
    for token in name.split_whitespace() {
        if NAVIGATION_CLASS.is_match(token) || BOILERPLATE_CLASS.is_match(token) {
            return true;
        }
        let head = token.split(|c: char| !c.is_ascii_alphanumeric()).next();
        if head.is_some_and(|h| !h.is_empty() && ADVERTISEMENT_CLASS.is_match(h)) {
            return true;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn navigation_class_matches_nav_elements() {
        assert!(NAVIGATION_CLASS.is_match("main-nav"));
        assert!(NAVIGATION_CLASS.is_match("sidebar-menu"));
        assert!(NAVIGATION_CLASS.is_match("site-footer"));
        assert!(!NAVIGATION_CLASS.is_match("article-content"));
        assert!(!NAVIGATION_CLASS.is_match("usa-in-page-nav-container"));
    }

    #[test]
    fn content_class_matches_article_elements() {
        assert!(CONTENT_CLASS.is_match("article-body"));
        assert!(CONTENT_CLASS.is_match("post-content"));
        assert!(!CONTENT_CLASS.is_match("sidebar-widget"));
    }

    #[test]
    fn boilerplate_names() {
        assert!(is_boilerplate_name("share-buttons"));
        assert!(is_boilerplate_name("row related-posts"));
        assert!(is_boilerplate_name("ad-slot"));
        assert!(is_boilerplate_name("cookie-banner"));
        assert!(!is_boilerplate_name("body-ad-wrapper"));
        assert!(!is_boilerplate_name("article-content"));
        assert!(!is_boilerplate_name("entry-content post-body"));
    }

    #[test]
    fn whitespace_normalize_collapses_spaces() {
        let result = WHITESPACE_NORMALIZE.replace_all("hello \n\t world", " ");
        assert_eq!(result, "hello world");
    }
}
