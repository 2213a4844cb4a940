//! Node payloads stored in the import graph.

use serde::{Deserialize, Serialize};

/// What a graph node stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// A parsed source file (`.js`, `.jsx`, `.ts`, `.tsx`).
    File,
    /// A directory inside the project root.
    Folder,
    /// An import specifier or a package declared in `package.json`.
    Dependency,
}

/// A node in the import graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphNode {
    /// Project-relative path (forward slashes) for files and folders, raw
    /// specifier or package name for dependencies. Unique across the graph.
    pub id: String,
    pub kind: NodeKind,
    /// Raw specifiers imported by this file, in source order, duplicates kept.
    /// Always empty for folders and dependencies.
    pub imports: Vec<String>,
    /// True when the node is not a file inside the project root.
    pub is_external: bool,
}

impl GraphNode {
    pub fn new(id: impl Into<String>, kind: NodeKind, is_external: bool) -> Self {
        Self {
            id: id.into(),
            kind,
            imports: Vec::new(),
            is_external,
        }
    }
}
