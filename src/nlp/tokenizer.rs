//! Word tokenization.
//!
//! Splits a sentence on whitespace, then peels punctuation off each chunk.
//! Punctuation the model allows inside a word (`e-mail`, `3.50`, `AT&T`) stays
//! put; other punctuation becomes separate tokens. A trailing period is kept on
//! abbreviations, initials and dotted acronyms (`Corp.`, `J.`, `U.S.`), and
//! English clitics are split off (`don't` → `do` `n't`).

use std::collections::HashSet;

use serde::Deserialize;

use super::{Span, TokenizedSentence};

/// Serialized tokenizer parameters.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenizerModel {
    /// Language tag, informational.
    pub language: String,

    /// Lowercase abbreviations including their final period.
    #[serde(default)]
    pub abbreviations: HashSet<String>,

    /// Suffixes split off as their own token, lowercase, longest first.
    #[serde(default)]
    pub clitics: Vec<String>,

    /// Punctuation allowed inside a word.
    #[serde(default)]
    pub word_internal: Vec<char>,
}

impl TokenizerModel {
    /// Check internal consistency.
    ///
    /// # Errors
    ///
    /// Returns a description of the first problem found.
    pub fn validate(&self) -> std::result::Result<(), String> {
        if let Some(abbr) = self.abbreviations.iter().find(|a| !a.ends_with('.')) {
            return Err(format!("abbreviation '{abbr}' does not end with a period"));
        }
        if self.clitics.iter().any(String::is_empty) {
            return Err("empty clitic".into());
        }
        Ok(())
    }
}

/// Splits sentences into tokens.
#[derive(Debug, Clone)]
pub struct Tokenizer {
    model: TokenizerModel,
}

impl Tokenizer {
    #[must_use]
    pub fn new(mut model: TokenizerModel) -> Self {
        model.clitics.sort_by_key(|c| std::cmp::Reverse(c.chars().count()));
        Self { model }
    }

    #[must_use]
    pub fn model(&self) -> &TokenizerModel {
        &self.model
    }

    /// Tokenize one sentence. Tokens are never empty and never contain whitespace.
    #[must_use]
    pub fn tokenize(&self, sentence: &str) -> TokenizedSentence {
        self.tokenize_spans(sentence)
            .into_iter()
            .filter_map(|span| span.slice(sentence))
            .map(str::to_string)
            .collect()
    }

    /// Byte spans of the tokens of `sentence`.
    #[must_use]
    pub fn tokenize_spans(&self, sentence: &str) -> Vec<Span> {
        let mut spans = Vec::new();
        for (offset, chunk) in whitespace_chunks(sentence) {
            self.split_chunk(chunk, offset, &mut spans);
        }
        spans
    }

    fn split_chunk(&self, chunk: &str, offset: usize, out: &mut Vec<Span>) {
        let mut start = 0;
        let mut end = chunk.len();

        // Leading punctuation, one token per run of identical characters.
        while start < end {
            let Some(c) = chunk[start..end].chars().next() else {
                break;
            };
            if c.is_alphanumeric() {
                break;
            }
            let run = run_len(&chunk[start..end], c);
            out.push(Span::new(offset + start, offset + start + run));
            start += run;
        }
        if start == end {
            return;
        }

        // Trailing punctuation, collected right to left.
        let mut trailing = Vec::new();
        while start < end {
            let core = &chunk[start..end];
            let Some(c) = core.chars().next_back() else {
                break;
            };
            if c.is_alphanumeric() {
                break;
            }
            if c == '.' && self.keeps_period(core) {
                break;
            }
            let run = run_len_back(core, c);
            if run == core.len() {
                break;
            }
            trailing.push(Span::new(offset + end - run, offset + end));
            end -= run;
        }

        let core = &chunk[start..end];
        for (piece_start, piece_end) in self.internal_pieces(core) {
            let base = offset + start + piece_start;
            let piece = &core[piece_start..piece_end];
            match self.clitic_split(piece) {
                Some(split) => {
                    out.push(Span::new(base, base + split));
                    out.push(Span::new(base + split, base + piece.len()));
                }
                None => out.push(Span::new(base, base + piece.len())),
            }
        }

        out.extend(trailing.into_iter().rev());
    }

    /// Split a peeled word at punctuation the model does not allow inside words.
    fn internal_pieces(&self, core: &str) -> Vec<(usize, usize)> {
        let mut pieces = Vec::new();
        let mut piece_start = 0;
        let mut prev: Option<(bool, char)> = None;

        for (i, c) in core.char_indices() {
            let is_word = c.is_alphanumeric() || self.model.word_internal.contains(&c);
            if let Some((prev_word, prev_char)) = prev {
                let same = if is_word { prev_word } else { !prev_word && prev_char == c };
                if !same {
                    pieces.push((piece_start, i));
                    piece_start = i;
                }
            }
            prev = Some((is_word, c));
        }
        if prev.is_some() {
            pieces.push((piece_start, core.len()));
        }
        pieces
    }

    /// Whether `word` (ending in a period) keeps the period attached.
    fn keeps_period(&self, word: &str) -> bool {
        let lower = word.to_lowercase();
        if self.model.abbreviations.contains(&lower) {
            return true;
        }
        let stem = &word[..word.len() - 1];
        let mut chars = stem.chars();
        if let (Some(first), None) = (chars.next(), chars.next()) {
            return first.is_alphabetic();
        }
        // Dotted acronyms: single letters separated by periods.
        stem.contains('.')
            && stem
                .split('.')
                .all(|part| part.chars().count() == 1 && part.chars().all(char::is_alphabetic))
    }

    /// Byte index where a clitic suffix starts, if `word` ends with one.
    fn clitic_split(&self, word: &str) -> Option<usize> {
        let lower = word.to_lowercase();
        if lower.len() != word.len() {
            return None;
        }
        self.model
            .clitics
            .iter()
            .find(|clitic| lower.len() > clitic.len() && lower.ends_with(clitic.as_str()))
            .map(|clitic| word.len() - clitic.len())
            .filter(|split| word.is_char_boundary(*split))
    }
}

/// Whitespace-separated chunks with their byte offsets.
fn whitespace_chunks(text: &str) -> Vec<(usize, &str)> {
    let mut chunks = Vec::new();
    let mut chunk_start = None;
    for (i, c) in text.char_indices() {
        if c.is_whitespace() {
            if let Some(s) = chunk_start.take() {
                chunks.push((s, &text[s..i]));
            }
        } else if chunk_start.is_none() {
            chunk_start = Some(i);
        }
    }
    if let Some(s) = chunk_start {
        chunks.push((s, &text[s..]));
    }
    chunks
}

fn run_len(text: &str, c: char) -> usize {
    text.chars().take_while(|x| *x == c).map(char::len_utf8).sum()
}

fn run_len_back(text: &str, c: char) -> usize {
    text.chars().rev().take_while(|x| *x == c).map(char::len_utf8).sum()
}
