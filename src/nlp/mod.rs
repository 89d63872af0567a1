//! Language annotation stages: sentence detection, tokenization and
//! named-entity recognition.
//!
//! Each stage is driven by a serialized model (see [`crate::models`]) and is
//! read-only once loaded, so one instance can serve concurrent requests.

pub mod name_finder;
pub mod sentence;
pub mod tokenizer;

pub use name_finder::{recognize, NameFinder, NameFinderModel};
pub use sentence::{SentenceDetector, SentenceModel};
pub use tokenizer::{Tokenizer, TokenizerModel};

/// Sentences of a document, in reading order.
pub type SentenceSequence = Vec<String>;

/// Tokens of one sentence, in order.
pub type TokenizedSentence = Vec<String>;

/// Half-open range `[start, end)`.
///
/// Sentence and token spans are byte offsets into the annotated text; entity
/// spans are token indices into a tokenized sentence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    #[must_use]
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Slice `text` by this byte span.
    #[must_use]
    pub fn slice<'a>(&self, text: &'a str) -> Option<&'a str> {
        text.get(self.start..self.end)
    }

    /// Surface string of a token span: its tokens joined by single spaces.
    #[must_use]
    pub fn to_surface(&self, tokens: &[String]) -> String {
        tokens
            .get(self.start..self.end)
            .map(|t| t.join(" "))
            .unwrap_or_default()
    }
}
