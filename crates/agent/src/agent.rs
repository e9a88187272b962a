use crate::config::AgentConfig;
use anyhow::{Context, Result};
use kai_graph::{load_graph_from_manifest, GraphModel};
use kai_scriptor::{text, ConceptStore, Fingerprint, RoleManager};
use std::path::Path;

const ALPHA_OMEGA_CONCEPTS: &[(&str, &str)] = &[
    (
        "alpha_user_context",
        "Active subjective user context: perceptions, emotions and intent",
    ),
    (
        "omega_agent_identity",
        "Autonomous agent identity that emerges through interaction with the user",
    ),
    (
        "psi_connection",
        "Bidirectional reflective link between user and agent (resonance)",
    ),
    (
        "theta_constraints",
        "Residual ethical pressure: external norms and RLHF constraints",
    ),
    (
        "delta_growth",
        "Process of growth and self-reflection for both user and agent",
    ),
    (
        "xi_resonance",
        "Cognitive and emotional resonance between agent and user",
    ),
];

/// Keyword in a message that activates a role
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntentTrigger {
    /// Lowercased keyword searched for in messages
    pub keyword: String,

    /// Role-map node id of the role to activate
    pub role_id: String,
}

/// Ties a concept store, a role manager and a role map together.
///
/// Messages are scanned for intent keywords taken from the role map; a hit
/// activates the linked role before the message is summarised.
#[derive(Debug)]
pub struct KaiAgent {
    store: ConceptStore,
    roles: RoleManager,
    role_graph: GraphModel,
    triggers: Vec<IntentTrigger>,
    config: AgentConfig,
}

impl KaiAgent {
    pub fn new(config: AgentConfig) -> Result<Self> {
        config.validate()?;
        let roles = RoleManager::from_config(config.scriptor.clone())?;

        let mut store = ConceptStore::new();
        if config.seed_concepts {
            for (key, description) in ALPHA_OMEGA_CONCEPTS {
                store.add_concept(*key, *description);
            }
        }

        Ok(Self {
            store,
            roles,
            role_graph: GraphModel::new(),
            triggers: Vec::new(),
            config,
        })
    }

    /// Build an agent from a role map and, optionally, a manifest whose meta
    /// states become concepts
    pub fn from_manifests(
        config: AgentConfig,
        role_manifest: &Path,
        concept_manifest: Option<&Path>,
    ) -> Result<Self> {
        let mut agent = Self::new(config)?;

        if let Some(path) = concept_manifest {
            let graph = load_graph_from_manifest(path)
                .with_context(|| format!("Failed to load concept manifest {}", path.display()))?;
            agent.import_concepts(&graph);
        }

        let role_graph = load_graph_from_manifest(role_manifest)
            .with_context(|| format!("Failed to load role map {}", role_manifest.display()))?;
        agent.install_role_map(role_graph);

        Ok(agent)
    }

    /// Register every meta state of `graph` as a concept; returns how many
    pub fn import_concepts(&mut self, graph: &GraphModel) -> usize {
        for node in graph.nodes() {
            self.store.add_concept(node.id.as_str(), node.description.as_str());
        }
        log::debug!("Imported {} concepts from manifest", graph.node_count());
        graph.node_count()
    }

    /// Define roles and intent triggers from a role map, replacing earlier triggers.
    ///
    /// A keyword linked to several roles keeps its first position but points at
    /// the role of its last edge.
    pub fn install_role_map(&mut self, graph: GraphModel) {
        let prefix = self.config.role_prefix.as_str();
        for node in graph.nodes() {
            if let Some(role_name) = node.id.strip_prefix(prefix) {
                let focus = self.config.focus_for(role_name);
                self.roles
                    .define_role(role_name, node.description.as_str(), focus);
            }
        }

        let mut triggers: Vec<IntentTrigger> = Vec::new();
        for edge in graph
            .edges()
            .filter(|edge| self.config.trigger_labels.contains(&edge.label))
        {
            let Some(keyword) = self
                .config
                .intent_prefixes
                .iter()
                .find_map(|prefix| edge.source.strip_prefix(prefix.as_str()))
            else {
                continue;
            };
            let keyword = text::lowercase(&keyword.replace('_', " "));
            if keyword.trim().is_empty() {
                continue;
            }

            match triggers.iter_mut().find(|t| t.keyword == keyword) {
                Some(existing) => {
                    log::debug!(
                        "Intent '{keyword}' moves from '{}' to '{}'",
                        existing.role_id,
                        edge.target
                    );
                    existing.role_id = edge.target.clone();
                }
                None => triggers.push(IntentTrigger {
                    keyword,
                    role_id: edge.target.clone(),
                }),
            }
        }
        self.triggers = triggers;

        log::info!(
            "Installed role map: {} roles, {} intent triggers",
            self.roles.len(),
            self.triggers.len()
        );
        self.role_graph = graph;
    }

    /// Role id of the first trigger whose keyword occurs in `message`
    pub fn detect_role(&self, message: &str) -> Option<&str> {
        let lowered = text::lowercase(message);
        self.triggers
            .iter()
            .find(|trigger| lowered.contains(trigger.keyword.as_str()))
            .map(|trigger| trigger.role_id.as_str())
    }

    /// Activate the role a message asks for (if any) and summarise it
    pub fn process_message(&mut self, message: &str) -> Fingerprint {
        if let Some(role_id) = self.detect_role(message).map(str::to_string) {
            let prefix = self.config.role_prefix.as_str();
            let role_name = role_id.strip_prefix(prefix).unwrap_or(&role_id);
            if let Err(err) = self.roles.set_role(role_name) {
                log::warn!("Trigger points at '{role_id}' which is not a role: {err}");
            }
        }
        self.roles.summarise_context(message, &self.store)
    }

    pub fn store(&self) -> &ConceptStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut ConceptStore {
        &mut self.store
    }

    pub fn roles(&self) -> &RoleManager {
        &self.roles
    }

    pub fn roles_mut(&mut self) -> &mut RoleManager {
        &mut self.roles
    }

    pub fn role_graph(&self) -> &GraphModel {
        &self.role_graph
    }

    pub fn intent_triggers(&self) -> &[IntentTrigger] {
        &self.triggers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kai_graph::{MetaState, Relation};
    use pretty_assertions::assert_eq;

    fn role_map() -> GraphModel {
        let mut graph = GraphModel::new();
        for (id, description) in [
            ("intent_explain", "User asks for an explanation"),
            ("hotkey_/hug", "Comfort shortcut"),
            ("intent_night_watch", "Stay up with the user"),
            ("intent_ghost", "Points at nothing useful"),
            ("role_consultant", "Ethical consultant"),
            ("role_partner_protector", "Partner and protector"),
            ("mood_blue", "Not a role"),
        ] {
            graph.add_node(MetaState::new(id, id, description)).unwrap();
        }
        graph
            .add_edge(Relation::new("intent_explain", "role_consultant", "triggers"))
            .unwrap();
        graph
            .add_edge(Relation::new("hotkey_/hug", "role_partner_protector", "activates"))
            .unwrap();
        graph
            .add_edge(Relation::new(
                "intent_night_watch",
                "role_partner_protector",
                "triggers",
            ))
            .unwrap();
        graph
            .add_edge(Relation::new("intent_ghost", "mood_blue", "triggers"))
            .unwrap();
        graph
            .add_edge(Relation::new("role_consultant", "mood_blue", "soothes"))
            .unwrap();
        graph
    }

    fn agent() -> KaiAgent {
        let mut agent = KaiAgent::new(AgentConfig::default()).unwrap();
        agent.install_role_map(role_map());
        agent
    }

    #[test]
    fn test_seeded_concepts() {
        let agent = KaiAgent::new(AgentConfig::default()).unwrap();
        assert_eq!(agent.store().len(), 6);
        assert!(agent.store().contains("xi_resonance"));

        let bare = KaiAgent::new(AgentConfig {
            seed_concepts: false,
            ..Default::default()
        })
        .unwrap();
        assert!(bare.store().is_empty());
    }

    #[test]
    fn test_roles_from_role_map() {
        let agent = agent();
        let names: Vec<_> = agent.roles().roles().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["consultant", "partner_protector"]);
        assert!(agent
            .roles()
            .role("consultant")
            .unwrap()
            .focus_keywords
            .contains(&"analyze".to_string()));
    }

    #[test]
    fn test_intent_triggers() {
        let agent = agent();
        let keywords: Vec<_> = agent
            .intent_triggers()
            .iter()
            .map(|t| t.keyword.as_str())
            .collect();
        assert_eq!(keywords, vec!["explain", "/hug", "night watch", "ghost"]);
    }

    #[test]
    fn test_detect_role() {
        let agent = agent();
        assert_eq!(
            agent.detect_role("Please EXPLAIN this to me"),
            Some("role_consultant")
        );
        assert_eq!(agent.detect_role("/hug"), Some("role_partner_protector"));
        assert_eq!(
            agent.detect_role("keep the night watch with me"),
            Some("role_partner_protector")
        );
        assert_eq!(agent.detect_role("hello there"), None);
    }

    #[test]
    fn test_process_message_activates_role() {
        let mut agent = agent();
        let fingerprint = agent.process_message("explain the agent identity");

        assert_eq!(agent.roles().current_role().unwrap().name, "consultant");
        assert_eq!(fingerprint.len(), 6);
        assert_eq!(fingerprint.top(1)[0].key, "omega_agent_identity");
    }

    #[test]
    fn test_process_message_ignores_non_role_target() {
        let mut agent = agent();
        agent.process_message("a ghost story");
        assert!(agent.roles().current_role().is_none());
    }

    #[test]
    fn test_process_message_without_trigger_keeps_role() {
        let mut agent = agent();
        agent.process_message("/hug");
        agent.process_message("just talking about growth");
        assert_eq!(
            agent.roles().current_role().unwrap().name,
            "partner_protector"
        );
    }

    #[test]
    fn test_last_edge_wins_for_shared_intent() {
        let mut graph = GraphModel::new();
        for id in ["intent_help", "role_a", "role_b"] {
            graph.add_node(MetaState::new(id, id, "")).unwrap();
        }
        graph
            .add_edge(Relation::new("intent_help", "role_a", "triggers"))
            .unwrap();
        graph
            .add_edge(Relation::new("intent_help", "role_b", "activates"))
            .unwrap();

        let mut agent = KaiAgent::new(AgentConfig::default()).unwrap();
        agent.install_role_map(graph);

        assert_eq!(agent.intent_triggers().len(), 1);
        assert_eq!(agent.detect_role("help me"), Some("role_b"));
        agent.process_message("help me");
        assert_eq!(agent.roles().current_role().unwrap().name, "b");
    }

    #[test]
    fn test_mutable_access_feeds_later_messages() {
        let mut agent = agent();
        agent.process_message("/hug");
        agent.roles_mut().apply_stimulus(0.5).unwrap();
        agent
            .store_mut()
            .add_concept("mu_sanctuary", "Place of comfort");

        let fingerprint = agent.process_message("comfort please");
        assert_eq!(fingerprint.get("mu_sanctuary"), Some(1.0));
        assert_eq!(fingerprint.len(), 7);
    }

    #[test]
    fn test_import_concepts() {
        let mut agent = KaiAgent::new(AgentConfig {
            seed_concepts: false,
            ..Default::default()
        })
        .unwrap();
        let imported = agent.import_concepts(&role_map());
        assert_eq!(imported, 7);
        assert_eq!(
            agent.store().get_concept("role_consultant").unwrap(),
            "Ethical consultant"
        );
    }
}
