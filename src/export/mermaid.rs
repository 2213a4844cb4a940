use std::fmt::{self, Write};

use crate::export::model::GraphDocument;
use crate::graph::node::NodeKind;

/// Escape a string for safe use in Mermaid node labels (quotes inside labels break the syntax).
fn escape_mermaid_label(s: &str) -> String {
    s.replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('{', "&#123;")
        .replace('}', "&#125;")
}

/// Render the document as a Mermaid flowchart.
///
/// Files are rectangles, folders subroutine boxes, dependencies stadiums.
pub fn render_mermaid(doc: &GraphDocument) -> Result<String, fmt::Error> {
    let positions = doc.node_positions();
    let mut out = String::new();

    writeln!(out, "flowchart LR")?;

    for (i, node) in doc.nodes.iter().enumerate() {
        let label = escape_mermaid_label(&node.id);
        match node.kind {
            NodeKind::File => writeln!(out, "    n{}[\"{}\"]", i, label)?,
            NodeKind::Folder => writeln!(out, "    n{}[[\"{}\"]]", i, label)?,
            NodeKind::Dependency => writeln!(out, "    n{}([\"{}\"])", i, label)?,
        }
    }

    for edge in &doc.edges {
        let (Some(src), Some(tgt)) = (
            positions.get(edge.source.as_str()),
            positions.get(edge.target.as_str()),
        ) else {
            continue;
        };
        writeln!(out, "    n{} --> n{}", src, tgt)?;
    }

    Ok(out)
}
