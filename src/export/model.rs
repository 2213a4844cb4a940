use serde::{Deserialize, Serialize};

use crate::graph::ImportGraph;
use crate::graph::node::NodeKind;

/// Output format for graph export.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum, Serialize, Deserialize)]
pub enum ExportFormat {
    /// `{ nodes: [...], edges: [...] }` JSON document (default). The renderer contract.
    #[default]
    Json,
    /// Graphviz DOT digraph.
    Dot,
    /// Mermaid flowchart. Best for small graphs embedded in markdown.
    Mermaid,
}

/// One node as seen by the rendering boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeRecord {
    pub id: String,
    pub kind: NodeKind,
    pub imports: Vec<String>,
    pub is_external: bool,
}

/// One `source imports target` edge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub source: String,
    pub target: String,
}

/// Self-contained snapshot of a built graph. A renderer needs nothing else,
/// in particular no filesystem access.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphDocument {
    pub nodes: Vec<NodeRecord>,
    pub edges: Vec<EdgeRecord>,
}

impl GraphDocument {
    /// Snapshot `graph`, preserving node and edge insertion order.
    pub fn from_graph(graph: &ImportGraph) -> Self {
        let nodes = graph
            .nodes()
            .map(|n| NodeRecord {
                id: n.id.clone(),
                kind: n.kind,
                imports: n.imports.clone(),
                is_external: n.is_external,
            })
            .collect();
        let edges = graph
            .edges()
            .map(|(source, target)| EdgeRecord {
                source: source.to_owned(),
                target: target.to_owned(),
            })
            .collect();
        Self { nodes, edges }
    }

    /// Position of each node id in `nodes`, used by the text renderers.
    pub(crate) fn node_positions(&self) -> std::collections::HashMap<&str, usize> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (n.id.as_str(), i))
            .collect()
    }
}
