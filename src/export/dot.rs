use std::fmt::{self, Write};

use crate::export::model::GraphDocument;
use crate::graph::node::NodeKind;

/// Escape a string for use inside a double-quoted DOT label.
pub fn escape_dot_label(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

/// DOT shape and fill color for a node kind.
fn node_style(kind: NodeKind) -> (&'static str, &'static str) {
    match kind {
        NodeKind::File => ("box", "#AED6F1"),
        NodeKind::Folder => ("folder", "#F9E79F"),
        NodeKind::Dependency => ("ellipse", "#EAECEE"),
    }
}

/// Render the document as a Graphviz digraph.
///
/// Node ids are positional (`n0`, `n1`, ...) so arbitrary specifiers never
/// need to be valid DOT identifiers; the real id goes into the label.
/// Duplicate edges are emitted once per import statement.
pub fn render_dot(doc: &GraphDocument) -> Result<String, fmt::Error> {
    let positions = doc.node_positions();
    let mut out = String::new();

    writeln!(out, "digraph import_graph {{")?;
    writeln!(out, "    rankdir=LR;")?;
    writeln!(out, "    node [style=filled fontname=monospace];")?;

    for (i, node) in doc.nodes.iter().enumerate() {
        let (shape, fill) = node_style(node.kind);
        writeln!(
            out,
            "    n{} [label=\"{}\" shape={} fillcolor=\"{}\"];",
            i,
            escape_dot_label(&node.id),
            shape,
            fill
        )?;
    }

    for edge in &doc.edges {
        let (Some(src), Some(tgt)) = (
            positions.get(edge.source.as_str()),
            positions.get(edge.target.as_str()),
        ) else {
            continue;
        };
        writeln!(out, "    n{} -> n{};", src, tgt)?;
    }

    writeln!(out, "}}")?;
    Ok(out)
}
