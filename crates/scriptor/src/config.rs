use crate::error::{Result, ScriptorError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Multiplier applied to concepts that match the active role's focus keywords
pub const DEFAULT_BOOST_FACTOR: f32 = 2.0;

/// Stimulus assigned to freshly defined roles
pub const DEFAULT_STIMULUS: f32 = 1.0;

const DEFAULT_STOPWORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "but", "by", "for", "from", "in", "into", "is",
    "it", "its", "of", "on", "or", "that", "the", "this", "to", "with",
];

/// Configuration for fingerprinting and role weighting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScriptorConfig {
    /// Multiplier for focus-matching concepts (must be > 1)
    pub boost_factor: f32,

    /// Stimulus given to roles defined without an explicit one
    pub default_stimulus: f32,

    /// Terms shorter than this (in chars) never count towards a score
    pub min_term_chars: usize,

    /// Terms ignored when scoring (compared case-insensitively)
    pub stopwords: Vec<String>,

    /// Drop sentences without focus keywords before summarising under a role
    pub filter_attention: bool,
}

impl Default for ScriptorConfig {
    fn default() -> Self {
        Self {
            boost_factor: DEFAULT_BOOST_FACTOR,
            default_stimulus: DEFAULT_STIMULUS,
            min_term_chars: 1,
            stopwords: Vec::new(),
            filter_attention: false,
        }
    }
}

impl ScriptorConfig {
    /// Ignore common English stopwords and single-character terms.
    ///
    /// Explicit concept keywords still count.
    pub fn filtered() -> Self {
        Self {
            min_term_chars: 2,
            stopwords: DEFAULT_STOPWORDS.iter().map(|s| (*s).to_string()).collect(),
            ..Default::default()
        }
    }

    /// Stronger role lens: higher boost and sentence-level attention filtering
    pub fn focused() -> Self {
        Self {
            boost_factor: 3.0,
            filter_attention: true,
            ..Default::default()
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> std::result::Result<(), String> {
        if !self.boost_factor.is_finite() || self.boost_factor <= 1.0 {
            return Err(format!(
                "boost_factor ({}) must be a finite value greater than 1",
                self.boost_factor
            ));
        }

        if !self.default_stimulus.is_finite() || self.default_stimulus < 0.0 {
            return Err(format!(
                "default_stimulus ({}) must be finite and non-negative",
                self.default_stimulus
            ));
        }

        if self.min_term_chars == 0 {
            return Err("min_term_chars must be > 0".to_string());
        }

        Ok(())
    }

    /// Parse a JSON or TOML document and validate it
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let config: Self = match serde_json::from_slice(bytes) {
            Ok(config) => config,
            Err(json_err) => {
                let utf8 = std::str::from_utf8(bytes)
                    .map_err(|err| ScriptorError::invalid_config(format!("{json_err}; {err}")))?;
                toml::from_str(utf8).map_err(|toml_err| {
                    ScriptorError::invalid_config(format!(
                        "not valid JSON ({json_err}) or TOML ({toml_err})"
                    ))
                })?
            }
        };

        config.validate().map_err(ScriptorError::InvalidConfig)?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        log::debug!("Loading scriptor config from {}", path.display());
        let bytes = std::fs::read(path)?;
        Self::from_bytes(&bytes)
    }
}
