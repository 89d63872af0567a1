//! Named-entity recognition for one entity category.
//!
//! Candidates are maximal runs of capitalized tokens, optionally joined by
//! lowercase connectors (`Bank of America`). Leading stopwords are stripped
//! from a run. Each candidate is scored by the weighted features of the
//! category model and kept when the score reaches the model threshold.
//!
//! Lexicon lookups are case-insensitive; the surface form reported is the
//! original tokens joined by single spaces.

use std::collections::{HashMap, HashSet};

use serde::Deserialize;

use super::{Span, TokenizedSentence};
use crate::result::EntitySet;

/// Serialized parameters of a name finder.
#[derive(Debug, Clone, Deserialize)]
pub struct NameFinderModel {
    /// Language tag, informational.
    pub language: String,

    /// Singular category name this model recognizes, e.g. `"person"`.
    pub category: String,

    /// Minimum score for a candidate to be reported.
    pub threshold: f64,

    /// Longest candidate, in tokens.
    #[serde(default = "default_max_span_tokens")]
    pub max_span_tokens: usize,

    /// Lowercase words that may join two capitalized tokens.
    #[serde(default)]
    pub connectors: HashSet<String>,

    /// Capitalized words never starting a candidate.
    #[serde(default)]
    pub stopwords: HashSet<String>,

    /// Named word lists referenced by features.
    #[serde(default)]
    pub lexicons: HashMap<String, HashSet<String>>,

    /// Scoring features.
    pub features: Vec<WeightedFeature>,
}

fn default_max_span_tokens() -> usize {
    6
}

/// A feature and the score it adds when it fires.
#[derive(Debug, Clone, Deserialize)]
pub struct WeightedFeature {
    pub feature: Feature,
    pub weight: f64,
}

/// Evidence about a candidate span.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Feature {
    /// First token of the span is in the lexicon.
    FirstToken { lexicon: String },
    /// Last token of the span is in the lexicon.
    LastToken { lexicon: String },
    /// Some token of the span is in the lexicon.
    AnyToken { lexicon: String },
    /// The whole span, space-joined, is in the lexicon.
    WholeSpan { lexicon: String },
    /// Token before the span is in the lexicon.
    PreviousToken { lexicon: String },
    /// Token after the span is in the lexicon.
    NextToken { lexicon: String },
    /// Span length in tokens lies in `[min, max]`.
    TokenCount { min: usize, max: usize },
    /// Span starts the sentence.
    SentenceInitial,
    /// Every token of the span is written in capitals.
    AllCaps,
}

impl Feature {
    fn lexicon(&self) -> Option<&str> {
        match self {
            Self::FirstToken { lexicon }
            | Self::LastToken { lexicon }
            | Self::AnyToken { lexicon }
            | Self::WholeSpan { lexicon }
            | Self::PreviousToken { lexicon }
            | Self::NextToken { lexicon } => Some(lexicon),
            Self::TokenCount { .. } | Self::SentenceInitial | Self::AllCaps => None,
        }
    }
}

impl NameFinderModel {
    /// Check internal consistency.
    ///
    /// # Errors
    ///
    /// Returns a description of the first problem found.
    pub fn validate(&self) -> std::result::Result<(), String> {
        if !self.threshold.is_finite() {
            return Err("threshold is not a finite number".into());
        }
        if self.max_span_tokens == 0 {
            return Err("max_span_tokens must be positive".into());
        }
        if self.features.is_empty() {
            return Err("model has no features".into());
        }
        for weighted in &self.features {
            if !weighted.weight.is_finite() {
                return Err(format!("feature {:?} has a non-finite weight", weighted.feature));
            }
            if let Some(name) = weighted.feature.lexicon() {
                if !self.lexicons.contains_key(name) {
                    return Err(format!("feature references unknown lexicon '{name}'"));
                }
            }
            if let Feature::TokenCount { min, max } = weighted.feature {
                if min > max {
                    return Err(format!("token_count range {min}..={max} is empty"));
                }
            }
        }
        Ok(())
    }
}

/// Recognizes entities of one category in tokenized sentences.
#[derive(Debug, Clone)]
pub struct NameFinder {
    model: NameFinderModel,
}

impl NameFinder {
    /// Build a finder, lowercasing every word list for lookup.
    #[must_use]
    pub fn new(mut model: NameFinderModel) -> Self {
        model.connectors = lowercase_all(model.connectors);
        model.stopwords = lowercase_all(model.stopwords);
        model.lexicons = model
            .lexicons
            .into_iter()
            .map(|(name, words)| (name, lowercase_all(words)))
            .collect();
        Self { model }
    }

    #[must_use]
    pub fn model(&self) -> &NameFinderModel {
        &self.model
    }

    /// Token spans of the entities in one sentence, in order, non-overlapping.
    #[must_use]
    pub fn find(&self, tokens: &[String]) -> Vec<Span> {
        self.candidates(tokens)
            .into_iter()
            .filter(|span| self.score(tokens, *span) >= self.model.threshold)
            .collect()
    }

    /// Score of a candidate span.
    #[must_use]
    pub fn score(&self, tokens: &[String], span: Span) -> f64 {
        self.model
            .features
            .iter()
            .filter(|weighted| self.fires(&weighted.feature, tokens, span))
            .map(|weighted| weighted.weight)
            .sum()
    }

    fn candidates(&self, tokens: &[String]) -> Vec<Span> {
        let mut spans = Vec::new();
        let mut i = 0;

        while i < tokens.len() {
            if !is_capitalized(&tokens[i]) {
                i += 1;
                continue;
            }

            let mut end = i + 1;
            while end < tokens.len() {
                if is_capitalized(&tokens[end]) {
                    end += 1;
                } else if end + 1 < tokens.len()
                    && self.model.connectors.contains(&tokens[end].to_lowercase())
                    && is_capitalized(&tokens[end + 1])
                {
                    end += 2;
                } else {
                    break;
                }
            }

            let mut start = i;
            while start < end && self.model.stopwords.contains(&tokens[start].to_lowercase()) {
                start += 1;
            }
            // A connector cannot open a name once stopwords are gone.
            while start < end && !is_capitalized(&tokens[start]) {
                start += 1;
            }
            if start < end {
                self.push_run(tokens, Span::new(start, end), &mut spans);
            }
            i = end;
        }

        spans
    }

    /// Push one capitalized run as candidates. A run longer than
    /// `max_span_tokens` is split at its connectors and each piece is then
    /// windowed, so no token of the run goes unscanned.
    fn push_run(&self, tokens: &[String], run: Span, spans: &mut Vec<Span>) {
        let cap = self.model.max_span_tokens.max(1);
        if run.len() <= cap {
            spans.push(run);
            return;
        }

        let mut piece = run.start;
        while piece < run.end {
            if !is_capitalized(&tokens[piece]) {
                piece += 1;
                continue;
            }
            let mut stop = piece + 1;
            while stop < run.end && is_capitalized(&tokens[stop]) {
                stop += 1;
            }
            let mut window = piece;
            while window < stop {
                let capped = stop.min(window + cap);
                spans.push(Span::new(window, capped));
                window = capped;
            }
            piece = stop;
        }
    }

    fn fires(&self, feature: &Feature, tokens: &[String], span: Span) -> bool {
        let Some(inside) = tokens.get(span.start..span.end) else {
            return false;
        };
        match feature {
            Feature::FirstToken { lexicon } => {
                inside.first().is_some_and(|t| self.in_lexicon(lexicon, t))
            }
            Feature::LastToken { lexicon } => {
                inside.last().is_some_and(|t| self.in_lexicon(lexicon, t))
            }
            Feature::AnyToken { lexicon } => inside.iter().any(|t| self.in_lexicon(lexicon, t)),
            Feature::WholeSpan { lexicon } => self.in_lexicon(lexicon, &inside.join(" ")),
            Feature::PreviousToken { lexicon } => span
                .start
                .checked_sub(1)
                .and_then(|p| tokens.get(p))
                .is_some_and(|t| self.in_lexicon(lexicon, t)),
            Feature::NextToken { lexicon } => tokens
                .get(span.end)
                .is_some_and(|t| self.in_lexicon(lexicon, t)),
            Feature::TokenCount { min, max } => (*min..=*max).contains(&span.len()),
            Feature::SentenceInitial => span.start == 0,
            Feature::AllCaps => inside.iter().all(|t| is_all_caps(t)),
        }
    }

    fn in_lexicon(&self, lexicon: &str, word: &str) -> bool {
        self.model
            .lexicons
            .get(lexicon)
            .is_some_and(|words| words.contains(&word.to_lowercase()))
    }
}

/// Run `finder` over every sentence and collect distinct surface strings.
#[must_use]
pub fn recognize(finder: &NameFinder, sentences: &[TokenizedSentence]) -> EntitySet {
    sentences
        .iter()
        .flat_map(|tokens| {
            finder
                .find(tokens)
                .into_iter()
                .map(move |span| span.to_surface(tokens))
        })
        .filter(|surface| !surface.is_empty())
        .collect()
}

fn lowercase_all(words: HashSet<String>) -> HashSet<String> {
    words.into_iter().map(|w| w.to_lowercase()).collect()
}

fn is_capitalized(token: &str) -> bool {
    token.chars().next().is_some_and(char::is_uppercase)
}

fn is_all_caps(token: &str) -> bool {
    let letters: Vec<char> = token.chars().filter(|c| c.is_alphabetic()).collect();
    letters.len() >= 2 && letters.iter().all(|c| c.is_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn finder(json: &str) -> NameFinder {
        let model: NameFinderModel = match serde_json::from_str(json) {
            Ok(model) => model,
            Err(err) => panic!("model is invalid: {err}"),
        };
        if let Err(reason) = model.validate() {
            panic!("model failed validation: {reason}");
        }
        NameFinder::new(model)
    }

    fn toks(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| (*w).to_string()).collect()
    }

    const TOY: &str = r#"{
        "language": "en",
        "category": "person",
        "threshold": 1.0,
        "connectors": ["van"],
        "stopwords": ["The", "Mr."],
        "lexicons": {
            "given": ["john", "ludwig"],
            "titles": ["mr."]
        },
        "features": [
            {"feature": {"kind": "first_token", "lexicon": "given"}, "weight": 1.0},
            {"feature": {"kind": "previous_token", "lexicon": "titles"}, "weight": 1.0},
            {"feature": {"kind": "all_caps"}, "weight": -5.0}
        ]
    }"#;

    #[test]
    fn lexicon_feature_selects_candidates() {
        let f = finder(TOY);
        let tokens = toks(&["John", "Smith", "met", "Mary", "Jones", "."]);
        assert_eq!(f.find(&tokens), vec![Span::new(0, 2)]);
    }

    #[test]
    fn connectors_join_capitalized_tokens() {
        let f = finder(TOY);
        let tokens = toks(&["Ludwig", "van", "Beethoven", "wrote", "music"]);
        let found = f.find(&tokens);
        assert_eq!(found, vec![Span::new(0, 3)]);
        assert_eq!(found[0].to_surface(&tokens), "Ludwig van Beethoven");
    }

    #[test]
    fn stopwords_are_stripped_and_context_is_used() {
        let f = finder(TOY);
        let tokens = toks(&["Mr.", "Brown", "arrived"]);
        assert_eq!(f.find(&tokens), vec![Span::new(1, 2)]);
    }

    #[test]
    fn negative_weights_reject() {
        let f = finder(TOY);
        let tokens = toks(&["JOHN", "SMITH", "arrived"]);
        assert!(f.find(&tokens).is_empty());
    }

    #[test]
    fn recognize_deduplicates_across_sentences() {
        let f = finder(TOY);
        let sentences = vec![
            toks(&["John", "Smith", "spoke", "."]),
            toks(&["Later", ",", "John", "Smith", "left", "."]),
        ];
        let found = recognize(&f, &sentences);
        assert_eq!(found.into_iter().collect::<Vec<_>>(), vec!["John Smith".to_string()]);
    }

    #[test]
    fn unknown_lexicon_fails_validation() {
        let json = r#"{
            "language": "en", "category": "person", "threshold": 1.0,
            "features": [{"feature": {"kind": "first_token", "lexicon": "missing"}, "weight": 1.0}]
        }"#;
        let model: NameFinderModel = match serde_json::from_str(json) {
            Ok(model) => model,
            Err(err) => panic!("expected Ok(_), got Err({err:?})"),
        };
        assert!(model.validate().is_err());
    }

    fn bundled_location_finder() -> NameFinder {
        finder(include_str!("../../models/en-ner-location.json"))
    }

    #[test]
    fn long_run_is_split_at_connectors() {
        let f = bundled_location_finder();
        let tokens = toks(&[
            "Staff", "at", "International", "Business", "Machines", "Corporation", "of", "New",
            "York", "left", ".",
        ]);
        let found = recognize(&f, &[tokens]);
        assert!(found.contains("New York"), "got {found:?}");
    }

    #[test]
    fn tail_of_long_run_is_still_scanned() {
        let f = bundled_location_finder();
        let tokens = toks(&[
            "The", "European", "Union", "Trade", "Council", "Summit", "Meeting", "Paris",
            "ended", ".",
        ]);
        let found = recognize(&f, &[tokens]);
        assert!(found.contains("Paris"), "got {found:?}");
    }

    #[test]
    fn windows_never_exceed_the_cap() {
        let f = bundled_location_finder();
        let words: Vec<String> = (0..15).map(|n| format!("Word{n}")).collect();
        let spans = f.candidates(&words);
        assert_eq!(spans.len(), 3);
        assert!(spans.iter().all(|span| span.len() <= f.model().max_span_tokens));
        assert_eq!(spans.last().map(|span| span.end), Some(15));
    }

    #[test]
    fn token_count_feature() {
        let feature = Feature::TokenCount { min: 2, max: 3 };
        let f = finder(TOY);
        let tokens = toks(&["A", "B", "C", "D"]);
        assert!(f.fires(&feature, &tokens, Span::new(0, 2)));
        assert!(!f.fires(&feature, &tokens, Span::new(0, 4)));
    }
}
