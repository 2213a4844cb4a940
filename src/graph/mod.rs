pub mod node;

use std::collections::HashMap;

use petgraph::Directed;
use petgraph::stable_graph::{EdgeIndex, NodeIndex, StableGraph};
use petgraph::visit::{EdgeRef, IntoEdgeReferences};

use node::{GraphNode, NodeKind};

/// The in-memory import graph: a directed petgraph StableGraph with an O(1) id index.
///
/// Each build owns a fresh instance. Nodes are keyed by `id`; registering an
/// id twice returns the existing node (first writer wins). Edges are addressed
/// by [`NodeIndex`], so an edge can never point at an unregistered node.
pub struct ImportGraph {
    /// The underlying directed graph.
    pub graph: StableGraph<GraphNode, (), Directed>,
    /// Maps node ids to their indices.
    id_index: HashMap<String, NodeIndex>,
}

impl ImportGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self {
            graph: StableGraph::new(),
            id_index: HashMap::new(),
        }
    }

    /// Register a node. If `id` is already present the existing index is
    /// returned and `kind` / `is_external` are ignored.
    pub fn add_node(&mut self, id: &str, kind: NodeKind, is_external: bool) -> NodeIndex {
        if let Some(&existing) = self.id_index.get(id) {
            return existing;
        }
        let idx = self.graph.add_node(GraphNode::new(id, kind, is_external));
        self.id_index.insert(id.to_owned(), idx);
        idx
    }

    /// Attach the extracted import list to a file node.
    ///
    /// No-op when the node at `idx` was first registered as something other
    /// than a file.
    pub fn set_imports(&mut self, idx: NodeIndex, imports: Vec<String>) {
        if let Some(node) = self.graph.node_weight_mut(idx)
            && node.kind == NodeKind::File
        {
            node.imports = imports;
        }
    }

    /// Append a `source -> target` edge. Duplicates are kept: two import
    /// statements for the same specifier are two edges.
    pub fn add_edge(&mut self, source: NodeIndex, target: NodeIndex) -> EdgeIndex {
        self.graph.add_edge(source, target, ())
    }

    /// Look up a node by id.
    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.id_index
            .get(id)
            .and_then(|&idx| self.graph.node_weight(idx))
    }

    /// Iterate nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &GraphNode> + '_ {
        self.graph.node_indices().map(move |idx| &self.graph[idx])
    }

    /// Iterate edges as `(source id, target id)` in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.graph.edge_references().map(move |edge| {
            (
                self.graph[edge.source()].id.as_str(),
                self.graph[edge.target()].id.as_str(),
            )
        })
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Remove every node that is neither the source nor the target of an edge.
    /// Edges are never removed. Returns the number of nodes dropped.
    ///
    /// Survivors are copied into a fresh graph in their original order, so no
    /// freed slot is left for a later `add_node` to reuse out of order.
    pub fn prune_orphans(&mut self) -> usize {
        let before = self.graph.node_count();
        let mut compacted = StableGraph::with_capacity(before, self.graph.edge_count());
        let mut id_index = HashMap::with_capacity(before);
        let mut remap: HashMap<NodeIndex, NodeIndex> = HashMap::with_capacity(before);

        for idx in self.graph.node_indices() {
            if self.graph.neighbors_undirected(idx).next().is_none() {
                continue;
            }
            let node = &self.graph[idx];
            let new_idx = compacted.add_node(node.clone());
            id_index.insert(node.id.clone(), new_idx);
            remap.insert(idx, new_idx);
        }

        for edge in self.graph.edge_references() {
            if let (Some(&source), Some(&target)) =
                (remap.get(&edge.source()), remap.get(&edge.target()))
            {
                compacted.add_edge(source, target, ());
            }
        }

        self.graph = compacted;
        self.id_index = id_index;
        before - self.graph.node_count()
    }

    /// Edges whose source or target id is not registered in the node set.
    /// Empty for every graph this type can produce.
    pub fn dangling_edges(&self) -> Vec<(String, String)> {
        self.graph
            .edge_references()
            .filter_map(|edge| {
                let source = self.graph.node_weight(edge.source());
                let target = self.graph.node_weight(edge.target());
                match (source, target) {
                    (Some(s), Some(t))
                        if self.id_index.contains_key(&s.id)
                            && self.id_index.contains_key(&t.id) =>
                    {
                        None
                    }
                    (s, t) => Some((
                        s.map(|n| n.id.clone()).unwrap_or_default(),
                        t.map(|n| n.id.clone()).unwrap_or_default(),
                    )),
                }
            })
            .collect()
    }
}

impl Default for ImportGraph {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_node_first_writer_wins() {
        let mut graph = ImportGraph::new();
        let a = graph.add_node("src/app.ts", NodeKind::File, false);
        let b = graph.add_node("src/app.ts", NodeKind::Dependency, true);
        assert_eq!(a, b, "duplicate add_node should return the same index");
        assert_eq!(graph.node_count(), 1);
        let node = graph.node("src/app.ts").unwrap();
        assert_eq!(node.kind, NodeKind::File);
        assert!(!node.is_external);
    }

    #[test]
    fn test_duplicate_edges_are_kept() {
        let mut graph = ImportGraph::new();
        let f = graph.add_node("a.ts", NodeKind::File, false);
        let d = graph.add_node("./util", NodeKind::Dependency, true);
        graph.add_edge(f, d);
        graph.add_edge(f, d);
        let edges: Vec<_> = graph.edges().collect();
        assert_eq!(edges, vec![("a.ts", "./util"), ("a.ts", "./util")]);
    }

    #[test]
    fn test_set_imports_only_touches_files() {
        let mut graph = ImportGraph::new();
        let d = graph.add_node("lib/x.ts", NodeKind::Dependency, true);
        graph.set_imports(d, vec!["react".into()]);
        assert!(graph.node("lib/x.ts").unwrap().imports.is_empty());

        let f = graph.add_node("main.ts", NodeKind::File, false);
        graph.set_imports(f, vec!["react".into()]);
        assert_eq!(graph.node("main.ts").unwrap().imports, vec!["react"]);
    }

    #[test]
    fn test_nodes_iterate_in_insertion_order() {
        let mut graph = ImportGraph::new();
        for id in ["z", "a", "m"] {
            graph.add_node(id, NodeKind::Folder, false);
        }
        let ids: Vec<_> = graph.nodes().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["z", "a", "m"]);
    }

    #[test]
    fn test_prune_removes_unconnected_nodes_only() {
        let mut graph = ImportGraph::new();
        graph.add_node("src", NodeKind::Folder, false);
        let f = graph.add_node("src/a.ts", NodeKind::File, false);
        let d = graph.add_node("react", NodeKind::Dependency, true);
        graph.add_node("lodash", NodeKind::Dependency, true);
        graph.add_edge(f, d);

        let removed = graph.prune_orphans();
        assert_eq!(removed, 2);
        let ids: Vec<_> = graph.nodes().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["src/a.ts", "react"]);
        assert_eq!(graph.edge_count(), 1);
        assert!(graph.node("lodash").is_none());
    }

    #[test]
    fn test_prune_is_idempotent() {
        let mut graph = ImportGraph::new();
        let f = graph.add_node("a.ts", NodeKind::File, false);
        let d = graph.add_node("b", NodeKind::Dependency, true);
        graph.add_node("c", NodeKind::Dependency, true);
        graph.add_edge(f, d);

        graph.prune_orphans();
        let first: Vec<GraphNode> = graph.nodes().cloned().collect();
        assert_eq!(graph.prune_orphans(), 0);
        let second: Vec<GraphNode> = graph.nodes().cloned().collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_add_after_prune_keeps_insertion_order() {
        let mut graph = ImportGraph::new();
        let a = graph.add_node("a.ts", NodeKind::File, false);
        graph.add_node("orphan", NodeKind::Dependency, true);
        let c = graph.add_node("c", NodeKind::Dependency, true);
        graph.add_edge(a, c);

        graph.prune_orphans();
        let late = graph.add_node("late", NodeKind::Dependency, true);
        graph.add_edge(a, late);

        let ids: Vec<_> = graph.nodes().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["a.ts", "c", "late"]);
        let edges: Vec<_> = graph.edges().collect();
        assert_eq!(edges, vec![("a.ts", "c"), ("a.ts", "late")]);
        assert_eq!(graph.node("c").unwrap().kind, NodeKind::Dependency);
    }

    #[test]
    fn test_prune_without_edges_empties_graph() {
        let mut graph = ImportGraph::new();
        graph.add_node("lonely.ts", NodeKind::File, false);
        graph.prune_orphans();
        assert_eq!(graph.node_count(), 0);
    }

    #[test]
    fn test_no_dangling_edges_after_prune() {
        let mut graph = ImportGraph::new();
        let a = graph.add_node("a.ts", NodeKind::File, false);
        let b = graph.add_node("b.ts", NodeKind::File, false);
        let c = graph.add_node("./c", NodeKind::Dependency, true);
        graph.add_edge(a, c);
        graph.add_edge(b, a);
        graph.add_edge(a, b);
        graph.prune_orphans();
        assert!(graph.dangling_edges().is_empty());
    }
}
