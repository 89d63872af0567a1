//! Configuration options for distillation.
//!
//! The `Options` struct controls content extraction thresholds and how the
//! recognition stage is scheduled.

/// Configuration options for distillation.
///
/// All fields are public for easy configuration. Use `Default::default()`
/// for standard settings.
///
/// # Example
///
/// ```rust
/// use rs_distiller::Options;
///
/// let options = Options {
///     parallel_recognition: false,
///     max_link_density: 0.5,
///     ..Options::default()
/// };
/// assert!(!options.parallel_recognition);
/// ```
#[derive(Debug, Clone)]
pub struct Options {
    /// Minimum number of words for a block to count as content on its own.
    ///
    /// Shorter blocks are kept only when they sit between content blocks
    /// or are headings directly followed by content.
    ///
    /// Default: `10`
    pub min_block_words: usize,

    /// Maximum proportion of link text in a content block.
    ///
    /// Blocks with higher link density are treated as navigation.
    ///
    /// Default: `0.33`
    pub max_link_density: f64,

    /// Maximum DOM nesting depth accepted by the extractor.
    ///
    /// Deeper documents fail with `Error::Extraction` instead of being walked.
    ///
    /// Default: `512`
    pub max_tree_depth: usize,

    /// Use `og:title` / `twitter:title` when the page has no `<title>`.
    ///
    /// Default: `true`
    pub meta_title_fallback: bool,

    /// Maximum ratio of control and replacement characters in the decoded
    /// source before it is rejected as binary.
    ///
    /// Default: `0.1`
    pub max_garbage_ratio: f64,

    /// Run the per-category recognizers concurrently.
    ///
    /// Output is identical either way.
    ///
    /// Default: `true`
    pub parallel_recognition: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            min_block_words: 10,
            max_link_density: 0.33,
            max_tree_depth: 512,
            meta_title_fallback: true,
            max_garbage_ratio: 0.1,
            parallel_recognition: true,
        }
    }
}
