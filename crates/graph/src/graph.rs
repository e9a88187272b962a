use crate::error::{GraphError, Result};
use crate::types::{GraphModel, MetaState, Relation};
use petgraph::graph::{EdgeIndex, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;

impl GraphModel {
    /// Relations leaving `id`, in insertion order
    pub fn outgoing(&self, id: &str) -> Result<Vec<&Relation>> {
        let node = self.require(id)?;
        Ok(self.relations_of(node, Direction::Outgoing))
    }

    /// Relations arriving at `id`, in insertion order
    pub fn incoming(&self, id: &str) -> Result<Vec<&Relation>> {
        let node = self.require(id)?;
        Ok(self.relations_of(node, Direction::Incoming))
    }

    /// Relations carrying `label`, in insertion order
    pub fn relations_labelled<'a>(&'a self, label: &'a str) -> impl Iterator<Item = &'a Relation> + 'a {
        self.edges().filter(move |edge| edge.label == label)
    }

    /// Every node id mapped to its outgoing `(target, label)` pairs.
    ///
    /// Nodes without relations are listed with an empty vector.
    pub fn adjacency_list(&self) -> Vec<(&str, Vec<(&str, &str)>)> {
        let mut adjacency: Vec<(&str, Vec<(&str, &str)>)> = self
            .nodes()
            .map(|node| (node.id.as_str(), Vec::new()))
            .collect();

        for edge in self.graph.edge_references() {
            let relation = edge.weight();
            adjacency[edge.source().index()]
                .1
                .push((relation.target.as_str(), relation.label.as_str()));
        }

        adjacency
    }

    /// Human-readable structural summary
    pub fn describe(&self) -> String {
        let mut lines = Vec::with_capacity(self.node_count() + self.edge_count() + 2);
        lines.push(format!(
            "Graph with {} nodes and {} edges:",
            self.node_count(),
            self.edge_count()
        ));
        for node in self.nodes() {
            lines.push(describe_node(node));
        }
        lines.push("Relations:".to_string());
        for edge in self.edges() {
            lines.push(format!("  {} --{}--> {}", edge.source, edge.label, edge.target));
        }
        lines.join("\n")
    }

    fn require(&self, id: &str) -> Result<NodeIndex> {
        self.find_node(id)
            .ok_or_else(|| GraphError::NodeNotFound(id.to_string()))
    }

    fn relations_of(&self, node: NodeIndex, direction: Direction) -> Vec<&Relation> {
        // petgraph walks adjacency lists newest-first
        let mut edges: Vec<(EdgeIndex, &Relation)> = self
            .graph
            .edges_directed(node, direction)
            .map(|edge| (edge.id(), edge.weight()))
            .collect();
        edges.sort_by_key(|(idx, _)| idx.index());
        edges.into_iter().map(|(_, relation)| relation).collect()
    }
}

fn describe_node(node: &MetaState) -> String {
    if node.description.is_empty() {
        format!("  {}: {}", node.id, node.name)
    } else {
        format!("  {}: {} - {}", node.id, node.name, node.description)
    }
}
