use crate::error::{GraphError, Result};
use petgraph::graph::{DiGraph, NodeIndex};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Meta state: an entity or stance of a user or an agent
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MetaState {
    /// Unique node id (e.g., "role_consultant")
    pub id: String,

    /// Display name
    pub name: String,

    pub description: String,
}

impl MetaState {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
        }
    }
}

/// Directed, labelled relation between two meta states
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Relation {
    /// Source node id
    pub source: String,

    /// Target node id
    pub target: String,

    /// Relation label (e.g., "triggers")
    pub label: String,
}

impl Relation {
    pub fn new(
        source: impl Into<String>,
        target: impl Into<String>,
        label: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            label: label.into(),
        }
    }
}

/// Graph of meta states and relations.
///
/// Every relation's endpoints exist; insertion rejects anything else, so the
/// graph never holds a dangling edge. Parallel relations are kept apart.
#[derive(Debug, Clone, Default)]
pub struct GraphModel {
    /// Directed graph (meta state -> meta state with relations)
    pub(crate) graph: DiGraph<MetaState, Relation>,

    /// Node id -> NodeIndex mapping for fast lookup
    pub(crate) id_index: HashMap<String, NodeIndex>,
}

impl GraphModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node; ids must be unique
    pub fn add_node(&mut self, node: MetaState) -> Result<()> {
        if self.id_index.contains_key(&node.id) {
            return Err(GraphError::DuplicateId(node.id));
        }

        let id = node.id.clone();
        let idx = self.graph.add_node(node);
        self.id_index.insert(id, idx);
        Ok(())
    }

    /// Append a relation between two existing nodes
    pub fn add_edge(&mut self, edge: Relation) -> Result<()> {
        let from = self.find_node(&edge.source);
        let to = self.find_node(&edge.target);

        match (from, to) {
            (Some(from), Some(to)) => {
                self.graph.add_edge(from, to, edge);
                Ok(())
            }
            (None, _) => Err(GraphError::DanglingReference {
                missing: edge.source.clone(),
                from: edge.source,
                to: edge.target,
            }),
            (_, None) => Err(GraphError::DanglingReference {
                missing: edge.target.clone(),
                from: edge.source,
                to: edge.target,
            }),
        }
    }

    /// Convenience for [`GraphModel::add_edge`]
    pub fn relate(
        &mut self,
        source: impl Into<String>,
        target: impl Into<String>,
        label: impl Into<String>,
    ) -> Result<()> {
        self.add_edge(Relation::new(source, target, label))
    }

    pub(crate) fn find_node(&self, id: &str) -> Option<NodeIndex> {
        self.id_index.get(id).copied()
    }

    pub fn node(&self, id: &str) -> Option<&MetaState> {
        self.find_node(id)
            .and_then(|idx| self.graph.node_weight(idx))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.id_index.contains_key(id)
    }

    /// Nodes in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = &MetaState> + '_ {
        self.graph.node_weights()
    }

    /// Relations in insertion order
    pub fn edges(&self) -> impl Iterator<Item = &Relation> + '_ {
        self.graph.edge_weights()
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }
}
