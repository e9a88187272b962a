//! # Kai Graph
//!
//! A small directed graph of meta states (entities or stances of a user and
//! an agent) connected by labelled relations.
//!
//! ## Architecture
//!
//! ```text
//! Manifest (JSON / TOML)
//!     │
//!     ├──> Manifest Loader
//!     │      ├─ Validate node records (id, name, description)
//!     │      ├─ Validate relation records (source, target, label)
//!     │      └─ All-or-nothing: no partial graph on failure
//!     │
//!     └──> Graph Model (petgraph)
//!            ├─ Nodes: meta states, unique by id
//!            ├─ Edges: labelled relations, never dangling
//!            └─ describe / adjacency / outgoing / incoming
//! ```
//!
//! ## Example
//!
//! ```rust
//! use kai_graph::graph_from_manifest_str;
//!
//! let graph = graph_from_manifest_str(r#"{
//!     "nodes": [
//!         {"id": "alpha", "name": "Alpha", "description": "User context"},
//!         {"id": "omega", "name": "Omega", "description": "Agent identity"}
//!     ],
//!     "relations": [{"source": "alpha", "target": "omega", "label": "shapes"}]
//! }"#).unwrap();
//!
//! assert!(graph.describe().starts_with("Graph with 2 nodes and 1 edges:"));
//! ```

mod error;
mod graph;
mod manifest;
mod types;

pub use error::{GraphError, Result};
pub use manifest::{graph_from_manifest_bytes, graph_from_manifest_str, load_graph_from_manifest};
pub use types::{GraphModel, MetaState, Relation};
