use crate::config::ScriptorConfig;
use crate::error::{Result, ScriptorError};
use crate::fingerprint::{Fingerprint, Fingerprinter};
use crate::store::{Concept, ConceptStore};
use crate::text;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use unicode_segmentation::UnicodeSegmentation;

/// Focus lens applied to fingerprints while active
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Role {
    pub name: String,
    pub description: String,

    /// Lowercased, deduplicated keywords
    pub focus_keywords: Vec<String>,

    /// Multiplier applied to every score while the role is active
    pub stimulus: f32,
}

impl Role {
    pub fn new<I, S>(name: impl Into<String>, description: impl Into<String>, focus_keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let focus_keywords = focus_keywords
            .into_iter()
            .map(|kw| text::lowercase(kw.as_ref().trim()))
            .filter(|kw| !kw.is_empty() && seen.insert(kw.clone()))
            .collect();

        Self {
            name: name.into(),
            description: description.into(),
            focus_keywords,
            stimulus: crate::config::DEFAULT_STIMULUS,
        }
    }

    pub fn with_stimulus(mut self, stimulus: f32) -> Self {
        self.stimulus = stimulus;
        self
    }

    /// True when a focus keyword equals a word of the concept's description or
    /// key. Multi-word keywords must appear as a phrase.
    pub fn matches_concept(&self, concept: &Concept) -> bool {
        if self.focus_keywords.is_empty() {
            return false;
        }

        let description = text::words(&concept.description);
        let key = text::key_words(&concept.key);
        let vocabulary: HashSet<&str> = description
            .iter()
            .chain(key.iter())
            .map(String::as_str)
            .collect();

        self.focus_keywords.iter().any(|keyword| {
            let parts = text::words(keyword);
            match parts.as_slice() {
                [] => false,
                [word] => vocabulary.contains(word.as_str()),
                phrase => {
                    text::count_phrase(&description, phrase) > 0
                        || text::count_phrase(&key, phrase) > 0
                }
            }
        })
    }

    /// True when any focus keyword occurs in `sentence` (lowercased substring)
    pub fn mentions(&self, sentence: &str) -> bool {
        let lowered = text::lowercase(sentence);
        self.focus_keywords.iter().any(|kw| lowered.contains(kw.as_str()))
    }
}

/// Named roles, the active one, and role-weighted summarisation.
///
/// The manager holds no concept store; callers pass the store they summarise
/// against, so the store stays freely mutable between calls.
#[derive(Debug)]
pub struct RoleManager {
    roles: Vec<Role>,
    index: HashMap<String, usize>,
    active: Option<String>,
    config: ScriptorConfig,
    fingerprinter: Fingerprinter,
}

impl RoleManager {
    pub fn new() -> Self {
        let config = ScriptorConfig::default();
        let fingerprinter = Fingerprinter::from_config(&config);
        Self::with_parts(config, fingerprinter)
    }

    pub fn from_config(config: ScriptorConfig) -> Result<Self> {
        config.validate().map_err(ScriptorError::InvalidConfig)?;
        let fingerprinter = Fingerprinter::from_config(&config);
        Ok(Self::with_parts(config, fingerprinter))
    }

    /// Use a custom fingerprinter (e.g., one with an injected scorer)
    pub fn with_fingerprinter(config: ScriptorConfig, fingerprinter: Fingerprinter) -> Result<Self> {
        config.validate().map_err(ScriptorError::InvalidConfig)?;
        Ok(Self::with_parts(config, fingerprinter))
    }

    fn with_parts(config: ScriptorConfig, fingerprinter: Fingerprinter) -> Self {
        Self {
            roles: Vec::new(),
            index: HashMap::new(),
            active: None,
            config,
            fingerprinter,
        }
    }

    pub fn config(&self) -> &ScriptorConfig {
        &self.config
    }

    pub fn fingerprinter(&self) -> &Fingerprinter {
        &self.fingerprinter
    }

    /// Insert or overwrite a role; its stimulus starts at the configured default
    pub fn define_role<I, S>(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        focus_keywords: I,
    ) where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let role = Role::new(name, description, focus_keywords)
            .with_stimulus(self.config.default_stimulus);
        self.insert_role(role);
    }

    pub fn define_role_with_stimulus<I, S>(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        focus_keywords: I,
        stimulus: f32,
    ) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        check_stimulus(stimulus)?;
        self.insert_role(Role::new(name, description, focus_keywords).with_stimulus(stimulus));
        Ok(())
    }

    fn insert_role(&mut self, role: Role) {
        match self.index.get(&role.name) {
            Some(&pos) => {
                log::debug!("Redefining role '{}'", role.name);
                self.roles[pos] = role;
            }
            None => {
                self.index.insert(role.name.clone(), self.roles.len());
                self.roles.push(role);
            }
        }
    }

    /// Activate a defined role
    pub fn set_role(&mut self, name: &str) -> Result<()> {
        if !self.index.contains_key(name) {
            return Err(ScriptorError::role_not_found(name));
        }
        log::debug!("Active role: {name}");
        self.active = Some(name.to_string());
        Ok(())
    }

    /// Deactivate the current role, if any
    pub fn clear_role(&mut self) {
        self.active = None;
    }

    pub fn current_role(&self) -> Option<&Role> {
        self.active.as_deref().and_then(|name| self.role(name))
    }

    pub fn role(&self, name: &str) -> Option<&Role> {
        self.index.get(name).map(|&pos| &self.roles[pos])
    }

    /// Roles in definition order
    pub fn roles(&self) -> impl Iterator<Item = &Role> + '_ {
        self.roles.iter()
    }

    pub fn len(&self) -> usize {
        self.roles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }

    /// Set the stimulus of the active role until changed or the role is redefined
    pub fn apply_stimulus(&mut self, weight: f32) -> Result<()> {
        let pos = self
            .active
            .as_deref()
            .and_then(|name| self.index.get(name).copied())
            .ok_or(ScriptorError::NoActiveRole)?;
        check_stimulus(weight)?;

        let role = &mut self.roles[pos];
        log::debug!("Stimulus for role '{}': {} -> {}", role.name, role.stimulus, weight);
        role.stimulus = weight;
        Ok(())
    }

    /// Keep only the sentences that mention a focus keyword of the active role.
    ///
    /// Returns the text unchanged when no role is active or the role has no
    /// focus keywords.
    pub fn filter_context(&self, text: &str) -> String {
        let role = match self.current_role() {
            Some(role) if !role.focus_keywords.is_empty() => role,
            _ => return text.to_string(),
        };

        text.split_sentence_bounds()
            .map(str::trim)
            .filter(|sentence| !sentence.is_empty() && role.mentions(sentence))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Fingerprint `text` and re-weight it through the active role.
    ///
    /// Without an active role this is exactly the fingerprinter's output.
    /// Otherwise concepts matching a focus keyword are multiplied by the boost
    /// factor, then every score by the role's stimulus.
    pub fn summarise_context(&self, text: &str, store: &ConceptStore) -> Fingerprint {
        let role = match self.current_role() {
            Some(role) => role,
            None => return self.fingerprinter.compress_context(text, store),
        };

        let mut fingerprint = if self.config.filter_attention {
            self.fingerprinter
                .compress_context(&self.filter_context(text), store)
        } else {
            self.fingerprinter.compress_context(text, store)
        };

        let mut boosted = 0;
        for entry in fingerprint.entries_mut() {
            let focused = store
                .concept(&entry.key)
                .is_some_and(|concept| role.matches_concept(concept));
            if focused {
                entry.score *= self.config.boost_factor;
                boosted += 1;
            }
            entry.score *= role.stimulus;
        }

        log::debug!(
            "Summarised under role '{}': {} focused concepts, stimulus {}",
            role.name,
            boosted,
            role.stimulus
        );

        fingerprint
    }
}

impl Default for RoleManager {
    fn default() -> Self {
        Self::new()
    }
}

fn check_stimulus(weight: f32) -> Result<()> {
    if weight.is_finite() && weight >= 0.0 {
        Ok(())
    } else {
        Err(ScriptorError::InvalidStimulus(weight))
    }
}
