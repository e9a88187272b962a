use crate::config::ScriptorConfig;
use crate::store::Concept;
use crate::text;
use std::collections::{HashMap, HashSet};

/// Raw relevance of a concept for a piece of text.
///
/// Scores are raw and unbounded; the fingerprinter normalises them per call.
/// Negative or non-finite scores count as zero.
pub trait RelevanceScorer {
    fn score(&self, text: &str, concept: &Concept) -> f32;

    /// Short label used in logs
    fn name(&self) -> &str {
        "custom"
    }
}

impl<F> RelevanceScorer for F
where
    F: Fn(&str, &Concept) -> f32,
{
    fn score(&self, text: &str, concept: &Concept) -> f32 {
        self(text, concept)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum Term {
    Word(String),
    Phrase(Vec<String>),
}

/// Default scorer: frequency of a concept's terms among the words of the text.
///
/// Terms come from the description, the key and the explicit keywords. Each
/// distinct term counts once per occurrence in the text; multi-word keywords
/// count as whole phrases.
#[derive(Debug, Clone)]
pub struct KeywordFrequencyScorer {
    min_term_chars: usize,
    stopwords: HashSet<String>,
}

impl KeywordFrequencyScorer {
    pub fn new() -> Self {
        Self::from_config(&ScriptorConfig::default())
    }

    pub fn from_config(config: &ScriptorConfig) -> Self {
        Self {
            min_term_chars: config.min_term_chars.max(1),
            stopwords: config.stopwords.iter().map(|w| text::lowercase(w)).collect(),
        }
    }

    fn keeps(&self, word: &str) -> bool {
        word.chars().count() >= self.min_term_chars && !self.stopwords.contains(word)
    }

    fn terms(&self, concept: &Concept) -> Vec<Term> {
        let mut seen = HashSet::new();
        let mut terms = Vec::new();

        let single_words = text::words(&concept.description)
            .into_iter()
            .chain(text::key_words(&concept.key));
        for word in single_words {
            if self.keeps(&word) && seen.insert(Term::Word(word.clone())) {
                terms.push(Term::Word(word));
            }
        }

        for keyword in &concept.keywords {
            let mut parts = text::words(keyword);
            let term = match parts.len() {
                0 => continue,
                1 => Term::Word(parts.remove(0)),
                _ => Term::Phrase(parts),
            };
            // Explicit keywords bypass the stopword filter
            if seen.insert(term.clone()) {
                terms.push(term);
            }
        }

        terms
    }
}

impl Default for KeywordFrequencyScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl RelevanceScorer for KeywordFrequencyScorer {
    fn score(&self, text: &str, concept: &Concept) -> f32 {
        let tokens = text::words(text);
        if tokens.is_empty() {
            return 0.0;
        }

        let mut counts: HashMap<&str, usize> = HashMap::new();
        for token in &tokens {
            *counts.entry(token.as_str()).or_insert(0) += 1;
        }

        let hits: usize = self
            .terms(concept)
            .iter()
            .map(|term| match term {
                Term::Word(word) => counts.get(word.as_str()).copied().unwrap_or(0),
                Term::Phrase(words) => text::count_phrase(&tokens, words),
            })
            .sum();

        hits as f32
    }

    fn name(&self) -> &str {
        "keyword-frequency"
    }
}
