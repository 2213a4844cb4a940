pub mod dot;
pub mod mermaid;
pub mod model;

use anyhow::Context;

use crate::graph::ImportGraph;

use model::{ExportFormat, GraphDocument};

/// Result of a graph export operation.
pub struct ExportResult {
    /// The rendered graph (JSON, DOT or Mermaid text).
    pub content: String,
    /// Number of nodes in the exported graph.
    pub node_count: usize,
    /// Number of edges in the exported graph.
    pub edge_count: usize,
}

/// Serialize `graph` for the rendering boundary.
///
/// `pretty` only affects JSON output.
pub fn export_graph(
    graph: &ImportGraph,
    format: ExportFormat,
    pretty: bool,
) -> anyhow::Result<ExportResult> {
    let doc = GraphDocument::from_graph(graph);

    let content = match format {
        ExportFormat::Json if pretty => {
            serde_json::to_string_pretty(&doc).context("failed to serialize graph")?
        }
        ExportFormat::Json => serde_json::to_string(&doc).context("failed to serialize graph")?,
        ExportFormat::Dot => dot::render_dot(&doc).context("failed to render DOT")?,
        ExportFormat::Mermaid => mermaid::render_mermaid(&doc).context("failed to render Mermaid")?,
    };

    Ok(ExportResult {
        content,
        node_count: doc.nodes.len(),
        edge_count: doc.edges.len(),
    })
}
