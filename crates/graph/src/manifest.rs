use crate::error::{GraphError, Result};
use crate::types::{GraphModel, MetaState, Relation};
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;

#[derive(Debug, Default, Deserialize)]
struct RawManifest {
    #[serde(default, alias = "meta_states")]
    nodes: Vec<Value>,
    #[serde(default, alias = "edges")]
    relations: Vec<Value>,
}

#[derive(Debug, Default, Deserialize)]
struct RawNode {
    id: Option<String>,
    name: Option<String>,
    description: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawRelation {
    #[serde(alias = "from")]
    source: Option<String>,
    #[serde(alias = "to")]
    target: Option<String>,
    #[serde(alias = "relation")]
    label: Option<String>,
}

/// Load a graph from a JSON or TOML manifest file.
///
/// The file is read in one go and closed before parsing starts. Loading is
/// all-or-nothing: any bad record fails the whole call.
pub fn load_graph_from_manifest(path: impl AsRef<Path>) -> Result<GraphModel> {
    let path = path.as_ref();
    log::debug!("Loading manifest {}", path.display());
    let bytes = std::fs::read(path)?;
    let graph = graph_from_manifest_bytes(&bytes)?;
    log::info!(
        "Loaded manifest {}: {} nodes, {} edges",
        path.display(),
        graph.node_count(),
        graph.edge_count()
    );
    Ok(graph)
}

pub fn graph_from_manifest_str(manifest: &str) -> Result<GraphModel> {
    graph_from_manifest_bytes(manifest.as_bytes())
}

/// Build a graph from manifest contents (JSON, falling back to TOML)
pub fn graph_from_manifest_bytes(bytes: &[u8]) -> Result<GraphModel> {
    let value = parse_document(bytes)?;
    let raw: RawManifest = serde_json::from_value(value)
        .map_err(|err| GraphError::manifest_format(format!("manifest root: {err}")))?;

    let mut graph = GraphModel::new();

    for (i, record) in raw.nodes.into_iter().enumerate() {
        let node: RawNode = serde_json::from_value(record)
            .map_err(|err| GraphError::manifest_format(format!("nodes[{i}]: {err}")))?;
        graph.add_node(MetaState {
            id: required(node.id, "nodes", i, "id")?,
            name: required(node.name, "nodes", i, "name")?,
            description: required(node.description, "nodes", i, "description")?,
        })?;
    }

    for (i, record) in raw.relations.into_iter().enumerate() {
        let relation: RawRelation = serde_json::from_value(record)
            .map_err(|err| GraphError::manifest_format(format!("relations[{i}]: {err}")))?;
        graph.add_edge(Relation {
            source: required(relation.source, "relations", i, "source")?,
            target: required(relation.target, "relations", i, "target")?,
            label: required(relation.label, "relations", i, "label")?,
        })?;
    }

    Ok(graph)
}

fn required(field: Option<String>, list: &str, index: usize, name: &str) -> Result<String> {
    field.ok_or_else(|| {
        GraphError::manifest_format(format!("{list}[{index}]: missing field `{name}`"))
    })
}

fn parse_document(bytes: &[u8]) -> Result<Value> {
    match serde_json::from_slice(bytes) {
        Ok(value) => Ok(value),
        Err(json_err) => {
            let utf8 = std::str::from_utf8(bytes)
                .map_err(|err| GraphError::manifest_format(format!("{json_err}; {err}")))?;
            let toml_value: toml::Value = toml::from_str(utf8).map_err(|toml_err| {
                GraphError::manifest_format(format!(
                    "not valid JSON ({json_err}) or TOML ({toml_err})"
                ))
            })?;
            serde_json::to_value(toml_value).map_err(|err| {
                GraphError::manifest_format(format!("failed to convert TOML manifest: {err}"))
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_minimal_manifest() {
        let graph = graph_from_manifest_str(
            r#"{
                "nodes": [
                    {"id": "a", "name": "A", "description": "first", "color": "red"},
                    {"id": "b", "name": "B", "description": "second"}
                ],
                "relations": [{"source": "a", "target": "b", "label": "knows", "weight": 3}]
            }"#,
        )
        .unwrap();

        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(
            graph.edges().next().unwrap(),
            &Relation::new("a", "b", "knows")
        );
    }

    #[test]
    fn test_aliases() {
        let graph = graph_from_manifest_str(
            r#"{
                "meta_states": [
                    {"id": "intent_help", "name": "Help", "description": "asks for help"},
                    {"id": "role_consultant", "name": "Consultant", "description": "explains"}
                ],
                "edges": [{"from": "intent_help", "to": "role_consultant", "relation": "triggers"}]
            }"#,
        )
        .unwrap();

        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.relations_labelled("triggers").count(), 1);
    }

    #[test]
    fn test_missing_lists_are_empty() {
        let graph = graph_from_manifest_str("{}").unwrap();
        assert!(graph.is_empty());
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_toml_manifest() {
        let graph = graph_from_manifest_str(
            r#"
[[nodes]]
id = "a"
name = "A"
description = "first"

[[nodes]]
id = "b"
name = "B"
description = "second"

[[relations]]
source = "b"
target = "a"
label = "follows"
"#,
        )
        .unwrap();

        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.outgoing("b").unwrap()[0].label, "follows");
    }

    #[test]
    fn test_missing_node_field() {
        let err = graph_from_manifest_str(
            r#"{"nodes": [{"id": "a", "name": "A", "description": ""}, {"id": "b", "name": "B"}]}"#,
        )
        .unwrap_err();

        match err {
            GraphError::ManifestFormat(msg) => {
                assert_eq!(msg, "nodes[1]: missing field `description`")
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_missing_relation_field() {
        let err = graph_from_manifest_str(
            r#"{
                "nodes": [{"id": "a", "name": "A", "description": ""}],
                "relations": [{"source": "a", "target": "a"}]
            }"#,
        )
        .unwrap_err();
        assert!(matches!(err, GraphError::ManifestFormat(ref msg) if msg.contains("`label`")));
    }

    #[test]
    fn test_wrong_types_and_garbage() {
        let err = graph_from_manifest_str(r#"{"nodes": [{"id": 7, "name": "A", "description": ""}]}"#)
            .unwrap_err();
        assert!(matches!(err, GraphError::ManifestFormat(ref msg) if msg.starts_with("nodes[0]")));

        let err = graph_from_manifest_str(r#"{"nodes": "not a list"}"#).unwrap_err();
        assert!(matches!(err, GraphError::ManifestFormat(_)));

        let err = graph_from_manifest_str("[1, 2, 3]").unwrap_err();
        assert!(matches!(err, GraphError::ManifestFormat(_)));

        let err = graph_from_manifest_str("nodes = [").unwrap_err();
        assert!(matches!(err, GraphError::ManifestFormat(_)));

        let err = graph_from_manifest_bytes(&[0xff, 0xfe, 0x00]).unwrap_err();
        assert!(matches!(err, GraphError::ManifestFormat(_)));
    }

    #[test]
    fn test_duplicate_node_in_manifest() {
        let err = graph_from_manifest_str(
            r#"{"nodes": [
                {"id": "a", "name": "A", "description": ""},
                {"id": "a", "name": "A2", "description": ""}
            ]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, GraphError::DuplicateId(ref id) if id == "a"));
    }

    #[test]
    fn test_dangling_relation() {
        let err = graph_from_manifest_str(
            r#"{
                "nodes": [{"id": "a", "name": "A", "description": ""}],
                "relations": [{"source": "a", "target": "nowhere", "label": "points"}]
            }"#,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            GraphError::DanglingReference { ref missing, .. } if missing == "nowhere"
        ));
    }
}
