use crate::config::ScriptorConfig;
use crate::error::{Result, ScriptorError};
use crate::scorer::{KeywordFrequencyScorer, RelevanceScorer};
use crate::store::{Concept, ConceptStore};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Relevance of one concept
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FingerprintEntry {
    pub key: String,
    pub score: f32,
}

/// Concept key -> relevance score, in concept store insertion order.
///
/// Total over the concepts it was computed for: zero-scoring concepts are kept.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Fingerprint {
    entries: Vec<FingerprintEntry>,
}

impl Fingerprint {
    pub fn get(&self, key: &str) -> Option<f32> {
        self.entries
            .iter()
            .find(|entry| entry.key == key)
            .map(|entry| entry.score)
    }

    /// Entries in concept store insertion order
    pub fn iter(&self) -> impl Iterator<Item = &FingerprintEntry> + '_ {
        self.entries.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|entry| entry.key.as_str())
    }

    /// Entries sorted by score descending; equal scores keep insertion order
    pub fn ranked(&self) -> Vec<&FingerprintEntry> {
        let mut ranked: Vec<&FingerprintEntry> = self.entries.iter().collect();
        ranked.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        ranked
    }

    /// The `n` highest-scoring entries
    pub fn top(&self, n: usize) -> Vec<&FingerprintEntry> {
        let mut ranked = self.ranked();
        ranked.truncate(n);
        ranked
    }

    /// Entries with a positive score, in insertion order
    pub fn matched(&self) -> impl Iterator<Item = &FingerprintEntry> + '_ {
        self.entries.iter().filter(|entry| entry.score > 0.0)
    }

    pub fn max_score(&self) -> f32 {
        self.entries
            .iter()
            .map(|entry| entry.score)
            .fold(0.0, f32::max)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn entries_mut(&mut self) -> impl Iterator<Item = &mut FingerprintEntry> + '_ {
        self.entries.iter_mut()
    }
}

impl<'a> IntoIterator for &'a Fingerprint {
    type Item = &'a FingerprintEntry;
    type IntoIter = std::slice::Iter<'a, FingerprintEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Compresses text into a [`Fingerprint`] over the concepts of a store.
///
/// Raw scores come from the injected [`RelevanceScorer`] and are divided by the
/// largest raw score of the call, so the best match is 1.0. When nothing
/// matches, every score is 0.0.
pub struct Fingerprinter {
    scorer: Box<dyn RelevanceScorer>,
}

impl Fingerprinter {
    /// Fingerprinter with the default keyword-frequency scorer
    pub fn new() -> Self {
        Self::with_scorer(KeywordFrequencyScorer::new())
    }

    pub fn from_config(config: &ScriptorConfig) -> Self {
        Self::with_scorer(KeywordFrequencyScorer::from_config(config))
    }

    pub fn with_scorer(scorer: impl RelevanceScorer + 'static) -> Self {
        Self {
            scorer: Box::new(scorer),
        }
    }

    pub fn scorer_name(&self) -> &str {
        self.scorer.name()
    }

    /// Fingerprint of `text` over every concept in `store`
    pub fn compress_context(&self, text: &str, store: &ConceptStore) -> Fingerprint {
        self.compress(text, store.concepts())
    }

    /// Fingerprint of `text` over the selected concepts only.
    ///
    /// Entries follow store insertion order regardless of the order of `keys`;
    /// duplicate keys are ignored.
    pub fn compress_selected<S: AsRef<str>>(
        &self,
        text: &str,
        store: &ConceptStore,
        keys: &[S],
    ) -> Result<Fingerprint> {
        let mut selected = HashSet::new();
        for key in keys {
            let key = key.as_ref();
            if !store.contains(key) {
                return Err(ScriptorError::concept_not_found(key));
            }
            selected.insert(key);
        }

        Ok(self.compress(
            text,
            store
                .concepts()
                .filter(|concept| selected.contains(concept.key.as_str())),
        ))
    }

    fn compress<'a>(&self, text: &str, concepts: impl Iterator<Item = &'a Concept>) -> Fingerprint {
        let raw: Vec<(&str, f32)> = concepts
            .map(|concept| {
                let score = self.scorer.score(text, concept);
                let score = if score.is_finite() && score > 0.0 {
                    score
                } else {
                    0.0
                };
                (concept.key.as_str(), score)
            })
            .collect();

        let max = raw.iter().map(|(_, score)| *score).fold(0.0, f32::max);

        log::debug!(
            "Fingerprinted {} chars over {} concepts with {} (max raw score {:.2})",
            text.len(),
            raw.len(),
            self.scorer.name(),
            max
        );

        let entries = raw
            .into_iter()
            .map(|(key, score)| FingerprintEntry {
                key: key.to_string(),
                score: if max > 0.0 { score / max } else { 0.0 },
            })
            .collect();

        Fingerprint { entries }
    }
}

impl Default for Fingerprinter {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Fingerprinter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fingerprinter")
            .field("scorer", &self.scorer.name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_store() -> ConceptStore {
        let mut store = ConceptStore::new();
        store.add_concept("alpha_artist", "Paints with watercolor");
        store.add_concept("beta_chef", "Cooks dinner");
        store.add_concept("gamma_gardener", "Grows watercolor flowers");
        store
    }

    #[test]
    fn test_scores_are_normalised() {
        let store = sample_store();
        let fp = Fingerprinter::new()
            .compress_context("She paints with watercolor and joy", &store);

        assert_eq!(fp.len(), 3);
        assert_eq!(fp.get("alpha_artist"), Some(1.0));
        assert_eq!(fp.get("beta_chef"), Some(0.0));
        assert_eq!(fp.get("gamma_gardener"), Some(1.0 / 3.0));
    }

    #[test]
    fn test_descriptions_of_common_words_match() {
        let mut store = ConceptStore::new();
        store.add_concept("x", "It is with");
        store.add_concept("y", "A");

        let fp = Fingerprinter::new().compress_context("it is with a", &store);
        assert_eq!(fp.get("x"), Some(1.0));
        assert!(fp.get("y").unwrap() > 0.0);
    }

    #[test]
    fn test_no_matches_all_zero() {
        let store = sample_store();
        let fp = Fingerprinter::new().compress_context("nothing relevant here", &store);

        assert_eq!(fp.len(), store.len());
        assert!(fp.iter().all(|entry| entry.score == 0.0));
        assert_eq!(fp.matched().count(), 0);
    }

    #[test]
    fn test_empty_text() {
        let store = sample_store();
        let fp = Fingerprinter::new().compress_context("", &store);
        assert_eq!(fp.max_score(), 0.0);
        assert_eq!(fp.len(), 3);
    }

    #[test]
    fn test_empty_store() {
        let fp = Fingerprinter::new().compress_context("paints", &ConceptStore::new());
        assert!(fp.is_empty());
        assert!(fp.top(3).is_empty());
    }

    #[test]
    fn test_entries_follow_insertion_order() {
        let store = sample_store();
        let fp = Fingerprinter::new().compress_context("dinner", &store);
        let keys: Vec<_> = fp.keys().collect();
        assert_eq!(keys, vec!["alpha_artist", "beta_chef", "gamma_gardener"]);
    }

    #[test]
    fn test_ties_ranked_by_insertion_order() {
        let mut store = ConceptStore::new();
        store.add_concept("second", "river stone");
        store.add_concept("first", "river stone");
        store.add_concept("third", "mountain");

        let fp = Fingerprinter::new().compress_context("river", &store);
        let ranked: Vec<_> = fp.ranked().into_iter().map(|e| e.key.as_str()).collect();
        assert_eq!(ranked, vec!["second", "first", "third"]);

        let top: Vec<_> = fp.top(1).into_iter().map(|e| e.key.as_str()).collect();
        assert_eq!(top, vec!["second"]);
    }

    #[test]
    fn test_compress_selected() {
        let store = sample_store();
        let fp = Fingerprinter::new()
            .compress_selected("watercolor flowers", &store, &["gamma_gardener", "alpha_artist"])
            .unwrap();

        let keys: Vec<_> = fp.keys().collect();
        assert_eq!(keys, vec!["alpha_artist", "gamma_gardener"]);
        assert_eq!(fp.get("gamma_gardener"), Some(1.0));
        assert_eq!(fp.get("alpha_artist"), Some(0.5));
        assert_eq!(fp.get("beta_chef"), None);
    }

    #[test]
    fn test_compress_selected_unknown_key() {
        let store = sample_store();
        let err = Fingerprinter::new()
            .compress_selected("text", &store, &["missing"])
            .unwrap_err();
        assert!(matches!(err, ScriptorError::ConceptNotFound(ref k) if k == "missing"));
    }

    #[test]
    fn test_custom_scorer_injected() {
        let store = sample_store();
        let fingerprinter = Fingerprinter::with_scorer(|_: &str, concept: &Concept| -> f32 {
            match concept.key.as_str() {
                "beta_chef" => 4.0,
                "gamma_gardener" => f32::NAN,
                _ => -1.0,
            }
        });

        let fp = fingerprinter.compress_context("anything", &store);
        assert_eq!(fp.get("beta_chef"), Some(1.0));
        assert_eq!(fp.get("gamma_gardener"), Some(0.0));
        assert_eq!(fp.get("alpha_artist"), Some(0.0));
        assert_eq!(fingerprinter.scorer_name(), "custom");
        assert_eq!(Fingerprinter::new().scorer_name(), "keyword-frequency");
        assert_eq!(format!("{fingerprinter:?}"), "Fingerprinter { scorer: \"custom\" }");
    }

    #[test]
    fn test_deterministic() {
        let store = sample_store();
        let fingerprinter = Fingerprinter::new();
        let text = "Cooks dinner, paints watercolor";
        assert_eq!(
            fingerprinter.compress_context(text, &store),
            fingerprinter.compress_context(text, &store)
        );
    }
}
