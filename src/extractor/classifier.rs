//! Content/boilerplate classification of text blocks.
//!
//! Three passes over the block sequence:
//!
//! 1. Local rules: link-heavy blocks are boilerplate; long blocks and
//!    sentence-like blocks are content. Inside a main-content region the
//!    length requirement is halved.
//! 2. Context rules over the pass-1 labels: a heading directly followed by
//!    content is content, and a short block sandwiched between two content
//!    blocks is content.
//! 3. If nothing qualified, every low-link-density block inside a
//!    main-content region is kept.

use super::blocks::TextBlock;
use crate::Options;

/// Minimum words for a sentence-like block to count as content.
const MIN_SENTENCE_WORDS: usize = 3;

/// Label each block's `is_content` in place.
pub fn classify(blocks: &mut [TextBlock], options: &Options) {
    for block in blocks.iter_mut() {
        block.is_content = local_rule(block, options);
    }

    let first_pass: Vec<bool> = blocks.iter().map(|b| b.is_content).collect();
    for i in 0..blocks.len() {
        if first_pass[i] || is_link_heavy(&blocks[i], options) {
            continue;
        }
        let prev = i.checked_sub(1).is_some_and(|p| first_pass[p]);
        let next = first_pass.get(i + 1).copied().unwrap_or(false);

        if next && (prev || blocks[i].is_heading()) {
            blocks[i].is_content = true;
        }
    }

    if blocks.iter().all(|b| !b.is_content) {
        for block in blocks.iter_mut() {
            block.is_content = block.in_content_root && !is_link_heavy(block, options);
        }
    }
}

fn local_rule(block: &TextBlock, options: &Options) -> bool {
    if is_link_heavy(block, options) {
        return false;
    }

    let min_words = if block.in_content_root {
        (options.min_block_words / 2).max(1)
    } else {
        options.min_block_words
    };

    block.words >= min_words || (block.words >= MIN_SENTENCE_WORDS && block.ends_sentence())
}

fn is_link_heavy(block: &TextBlock, options: &Options) -> bool {
    block.link_density() > options.max_link_density
}
