use anyhow::{anyhow, Context, Result};
use kai_scriptor::ScriptorConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Focus keywords for every role whose name contains `pattern`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FocusRule {
    pub pattern: String,
    #[serde(default)]
    pub keywords: Vec<String>,
}

impl FocusRule {
    pub fn new<I, S>(pattern: impl Into<String>, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            pattern: pattern.into(),
            keywords: keywords.into_iter().map(Into::into).collect(),
        }
    }
}

/// Agent wiring: how role-map nodes and edges turn into roles and triggers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Fingerprinting and role weighting
    pub scriptor: ScriptorConfig,

    /// Node ids with this prefix define roles; the rest of the id is the role name
    pub role_prefix: String,

    /// Source id prefixes whose remainder is an intent keyword
    pub intent_prefixes: Vec<String>,

    /// Relation labels that connect an intent to the role it activates
    pub trigger_labels: Vec<String>,

    /// First matching rule supplies a role's focus keywords
    pub role_focus: Vec<FocusRule>,

    /// Register the built-in alpha/omega concepts on construction
    pub seed_concepts: bool,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            scriptor: ScriptorConfig::default(),
            role_prefix: "role_".to_string(),
            intent_prefixes: vec!["intent_".to_string(), "hotkey_".to_string()],
            trigger_labels: vec!["triggers".to_string(), "activates".to_string()],
            role_focus: vec![
                FocusRule::new(
                    "consultant",
                    ["analyze", "explain", "consult", "разбери", "поясни"],
                ),
                FocusRule::new(
                    "partner_protector",
                    ["comfort", "presence", "рядом", "держи", "ближе", "святилище"],
                ),
            ],
            seed_concepts: true,
        }
    }
}

impl AgentConfig {
    /// Focus keywords for `role_name` (empty when no rule matches)
    pub fn focus_for(&self, role_name: &str) -> &[String] {
        self.role_focus
            .iter()
            .find(|rule| role_name.contains(rule.pattern.as_str()))
            .map(|rule| rule.keywords.as_slice())
            .unwrap_or(&[])
    }

    pub fn validate(&self) -> Result<()> {
        self.scriptor.validate().map_err(|err| anyhow!(err))?;
        if self.role_prefix.is_empty() {
            return Err(anyhow!("role_prefix must not be empty"));
        }
        if self.intent_prefixes.iter().any(String::is_empty) {
            return Err(anyhow!("intent_prefixes must not contain empty prefixes"));
        }
        Ok(())
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let config: Self = match serde_json::from_slice(bytes) {
            Ok(config) => config,
            Err(json_err) => {
                let utf8 = std::str::from_utf8(bytes).map_err(|err| anyhow!("{json_err}; {err}"))?;
                toml::from_str(utf8).map_err(|toml_err| {
                    anyhow!("Agent config is not valid JSON ({json_err}) or TOML ({toml_err})")
                })?
            }
        };
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)
            .with_context(|| format!("Failed to read agent config {}", path.display()))?;
        Self::from_bytes(&bytes)
            .with_context(|| format!("Invalid agent config {}", path.display()))
    }
}
