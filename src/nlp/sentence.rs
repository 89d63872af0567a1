//! Sentence boundary detection.
//!
//! A boundary is a run of end-of-sentence characters, optionally followed by
//! closing quotes or brackets, followed by whitespace or the end of the text.
//! The model vetoes boundaries after known abbreviations and single-letter
//! initials, and before a lowercase continuation.

use std::collections::HashSet;

use serde::Deserialize;

use super::{SentenceSequence, Span};

/// Serialized sentence detector parameters.
#[derive(Debug, Clone, Deserialize)]
pub struct SentenceModel {
    /// Language tag, informational.
    pub language: String,

    /// Characters that can end a sentence.
    pub end_of_sentence: Vec<char>,

    /// Lowercase abbreviations including their final period, e.g. `"mr."`.
    #[serde(default)]
    pub abbreviations: HashSet<String>,

    /// Characters that may follow the end-of-sentence run and still belong
    /// to the sentence, e.g. closing quotes.
    #[serde(default)]
    pub closing_punctuation: Vec<char>,

    /// Suppress a boundary when the next word starts with a lowercase letter.
    #[serde(default)]
    pub lowercase_continues: bool,

    /// Treat line breaks as hard boundaries.
    #[serde(default = "default_true")]
    pub paragraph_breaks: bool,
}

fn default_true() -> bool {
    true
}

impl SentenceModel {
    /// Check internal consistency.
    ///
    /// # Errors
    ///
    /// Returns a description of the first problem found.
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.end_of_sentence.is_empty() {
            return Err("no end-of-sentence characters".into());
        }
        if let Some(abbr) = self.abbreviations.iter().find(|a| !a.ends_with('.')) {
            return Err(format!("abbreviation '{abbr}' does not end with a period"));
        }
        Ok(())
    }
}

/// Splits text into sentences.
#[derive(Debug, Clone)]
pub struct SentenceDetector {
    model: SentenceModel,
}

impl SentenceDetector {
    #[must_use]
    pub fn new(model: SentenceModel) -> Self {
        Self { model }
    }

    #[must_use]
    pub fn model(&self) -> &SentenceModel {
        &self.model
    }

    /// Split `text` into trimmed sentences in reading order.
    ///
    /// Empty or whitespace-only text yields no sentences.
    #[must_use]
    pub fn segment(&self, text: &str) -> SentenceSequence {
        self.segment_spans(text)
            .into_iter()
            .filter_map(|span| span.slice(text))
            .map(str::to_string)
            .collect()
    }

    /// Byte spans of the sentences in `text`, trimmed of surrounding whitespace.
    #[must_use]
    pub fn segment_spans(&self, text: &str) -> Vec<Span> {
        let chars: Vec<(usize, char)> = text.char_indices().collect();
        let mut spans = Vec::new();
        let mut start = 0;
        let mut i = 0;

        while i < chars.len() {
            let (pos, c) = chars[i];

            if c == '\n' && self.model.paragraph_breaks {
                push_trimmed(&mut spans, text, start, pos);
                start = pos + 1;
                i += 1;
                continue;
            }
            if !self.is_end_char(c) {
                i += 1;
                continue;
            }

            let run_start = i;
            let mut j = i;
            while j < chars.len() && self.is_end_char(chars[j].1) {
                j += 1;
            }
            let run_len = j - run_start;
            while j < chars.len() && self.model.closing_punctuation.contains(&chars[j].1) {
                j += 1;
            }
            let end = chars.get(j).map_or(text.len(), |(p, _)| *p);
            let at_break = chars.get(j).is_none_or(|(_, next)| next.is_whitespace());

            let vetoed = !at_break
                || (run_len == 1 && c == '.' && self.ends_abbreviation(text, start, pos))
                || (self.model.lowercase_continues && next_word_is_lowercase(&chars[j..]));

            if !vetoed {
                push_trimmed(&mut spans, text, start, end);
                start = end;
            }
            i = j;
        }

        push_trimmed(&mut spans, text, start, text.len());
        spans
    }

    fn is_end_char(&self, c: char) -> bool {
        self.model.end_of_sentence.contains(&c)
    }

    /// Whether the period at `dot` closes an abbreviation or an initial.
    fn ends_abbreviation(&self, text: &str, sentence_start: usize, dot: usize) -> bool {
        let before = &text[sentence_start..dot];
        let word_start = before
            .rfind(char::is_whitespace)
            .map_or(0, |p| p + before[p..].chars().next().map_or(1, char::len_utf8));
        let word = before[word_start..].trim_start_matches(['(', '[', '"', '\'', '\u{201C}', '\u{2018}']);
        if word.is_empty() {
            return false;
        }

        let mut letters = word.chars();
        if let (Some(first), None) = (letters.next(), letters.next()) {
            if first.is_uppercase() {
                return true;
            }
        }

        let candidate = format!("{}.", word.to_lowercase());
        self.model.abbreviations.contains(&candidate)
    }
}

fn next_word_is_lowercase(rest: &[(usize, char)]) -> bool {
    rest.iter()
        .map(|(_, c)| *c)
        .find(|c| !c.is_whitespace())
        .is_some_and(char::is_lowercase)
}

fn push_trimmed(spans: &mut Vec<Span>, text: &str, start: usize, end: usize) {
    let Some(slice) = text.get(start..end) else {
        return;
    };
    let trimmed_start = slice.len() - slice.trim_start().len();
    let trimmed = slice.trim();
    if trimmed.is_empty() {
        return;
    }
    let s = start + trimmed_start;
    spans.push(Span::new(s, s + trimmed.len()));
}
