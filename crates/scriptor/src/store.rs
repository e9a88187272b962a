use crate::error::{Result, ScriptorError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Named semantic unit matched against free text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Concept {
    /// Unique key (e.g., "alpha_user_context")
    pub key: String,

    /// Human-readable description; its words are the concept's default terms
    pub description: String,

    /// Extra terms or phrases counted alongside the description
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
}

impl Concept {
    pub fn new(key: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            description: description.into(),
            keywords: Vec::new(),
        }
    }

    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords = keywords
            .into_iter()
            .map(|kw| kw.into().trim().to_string())
            .filter(|kw| !kw.is_empty())
            .collect();
        self
    }
}

/// Insertion-ordered concept map.
///
/// Re-adding a key overwrites the concept in place (last write wins) and keeps
/// its first position, which is what ranking uses to break ties.
#[derive(Debug, Clone, Default)]
pub struct ConceptStore {
    concepts: Vec<Concept>,

    /// Key -> position in `concepts`
    index: HashMap<String, usize>,
}

impl ConceptStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite the concept under `key`
    pub fn add_concept(&mut self, key: impl Into<String>, description: impl Into<String>) {
        self.insert(Concept::new(key, description));
    }

    /// Insert or overwrite the concept under `key`, with explicit keywords
    pub fn add_concept_with_keywords<I, S>(
        &mut self,
        key: impl Into<String>,
        description: impl Into<String>,
        keywords: I,
    ) where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.insert(Concept::new(key, description).with_keywords(keywords));
    }

    /// Insert a prepared concept, overwriting any concept with the same key
    pub fn insert(&mut self, concept: Concept) {
        match self.index.get(&concept.key) {
            Some(&pos) => {
                log::debug!("Overwriting concept '{}'", concept.key);
                self.concepts[pos] = concept;
            }
            None => {
                self.index.insert(concept.key.clone(), self.concepts.len());
                self.concepts.push(concept);
            }
        }
    }

    /// Description of the concept stored under `key`
    pub fn get_concept(&self, key: &str) -> Result<&str> {
        self.concept(key)
            .map(|c| c.description.as_str())
            .ok_or_else(|| ScriptorError::concept_not_found(key))
    }

    pub fn concept(&self, key: &str) -> Option<&Concept> {
        self.index.get(key).map(|&pos| &self.concepts[pos])
    }

    /// Position of `key` in insertion order
    pub fn position(&self, key: &str) -> Option<usize> {
        self.index.get(key).copied()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// `(key, description)` pairs in insertion order; each call starts afresh
    pub fn list_concepts(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.concepts
            .iter()
            .map(|c| (c.key.as_str(), c.description.as_str()))
    }

    /// Concepts in insertion order
    pub fn concepts(&self) -> impl Iterator<Item = &Concept> + '_ {
        self.concepts.iter()
    }

    pub fn len(&self) -> usize {
        self.concepts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.concepts.is_empty()
    }
}
