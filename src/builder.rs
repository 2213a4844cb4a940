//! Graph construction: walk, extract, inject manifest dependencies, prune.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::ImportGraphConfig;
use crate::error::BuildError;
use crate::graph::ImportGraph;
use crate::graph::node::NodeKind;
use crate::ignore_rules::IgnoreMatcher;
use crate::manifest;
use crate::parser::{Extraction, extract_imports};
use crate::walker::{WalkEvent, walk_project};

/// Knobs for a single build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOptions {
    /// Remove nodes with no incident edge once the graph is assembled.
    pub prune_orphans: bool,
    /// Extra gitignore-style exclusions applied after `.gitignore`.
    pub exclude: Vec<String>,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            prune_orphans: true,
            exclude: Vec::new(),
        }
    }
}

impl BuildOptions {
    /// Options taken from the project's configuration file.
    pub fn from_config(config: &ImportGraphConfig) -> Self {
        Self {
            prune_orphans: config.prune_orphans.unwrap_or(true),
            exclude: config.exclude_patterns().to_vec(),
        }
    }
}

/// Aggregate statistics produced by a build.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct BuildStats {
    /// Folder nodes registered during traversal.
    pub folders: usize,
    /// Source files read and registered.
    pub source_files: usize,
    /// Source files registered with no imports because they failed to parse.
    pub parse_failures: usize,
    /// Files or directories skipped because they could not be read.
    pub unreadable: usize,
    /// Entries excluded by the ignore rules.
    pub ignored: usize,
    /// Directories skipped because their real path was already visited.
    pub revisits_skipped: usize,
    /// Dependencies declared in package.json and registered as nodes.
    pub manifest_dependencies: usize,
    /// True when package.json existed but could not be read or parsed.
    pub manifest_malformed: bool,
    /// Nodes removed by the orphan pruning pass.
    pub pruned: usize,
    /// Final node count.
    pub nodes: usize,
    /// Final edge count.
    pub edges: usize,
}

/// A finished graph and the statistics of the build that produced it.
pub struct BuildOutcome {
    pub graph: ImportGraph,
    pub stats: BuildStats,
}

/// Build the import graph of the project at `root`.
///
/// Steps:
/// 1. Load ignore rules rooted at `root`.
/// 2. Walk the tree depth-first: register a folder node per directory, and for
///    every source file a file node, one dependency node per imported
///    specifier, and one edge per import statement.
/// 3. Register every production dependency declared in `package.json`.
/// 4. Unless disabled, prune nodes with no incident edge.
///
/// Specifiers are recorded as written; `./util` and `../lib/util` stay two
/// distinct dependency nodes even when they name the same file.
///
/// # Errors
/// Only an invalid root fails the build. Missing configuration, unreadable
/// files, syntax errors and a malformed manifest all degrade gracefully.
pub fn build_graph(root: &Path, options: &BuildOptions) -> Result<BuildOutcome, BuildError> {
    check_root(root)?;

    let matcher = IgnoreMatcher::load(root, &options.exclude);
    debug!(patterns = matcher.pattern_count(), "ignore rules loaded");
    let mut graph = ImportGraph::new();
    let mut stats = BuildStats::default();

    let walk = walk_project(root, &matcher, |event| match event {
        WalkEvent::Folder { relative } => {
            graph.add_node(&relative, NodeKind::Folder, false);
            stats.folders += 1;
        }
        WalkEvent::SourceFile { path, relative } => {
            add_source_file(&mut graph, &mut stats, &path, &relative);
        }
    });
    stats.ignored = walk.ignored;
    stats.unreadable += walk.unreadable;
    stats.revisits_skipped = walk.revisits_skipped;

    inject_manifest_dependencies(root, &mut graph, &mut stats);

    if options.prune_orphans {
        stats.pruned = graph.prune_orphans();
    }
    debug_assert!(graph.dangling_edges().is_empty());

    stats.nodes = graph.node_count();
    stats.edges = graph.edge_count();
    info!(
        root = %root.display(),
        nodes = stats.nodes,
        edges = stats.edges,
        files = stats.source_files,
        pruned = stats.pruned,
        "import graph built"
    );

    Ok(BuildOutcome { graph, stats })
}

fn check_root(root: &Path) -> Result<(), BuildError> {
    match fs::metadata(root) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(BuildError::RootNotDirectory(root.to_path_buf())),
        Err(err) if err.kind() == ErrorKind::NotFound => {
            Err(BuildError::RootNotFound(root.to_path_buf()))
        }
        Err(source) => Err(BuildError::Io {
            path: root.to_path_buf(),
            source,
        }),
    }
}

/// Read, parse and register one source file with its import edges.
fn add_source_file(graph: &mut ImportGraph, stats: &mut BuildStats, path: &Path, relative: &str) {
    let source = match fs::read_to_string(path) {
        Ok(s) => s,
        Err(err) => {
            debug!(path = %relative, error = %err, "skipping unreadable file");
            stats.unreadable += 1;
            return;
        }
    };

    let imports = match extract_imports(&source, path) {
        Extraction::ParseFailure => {
            debug!(path = %relative, "syntax error, recording file without imports");
            stats.parse_failures += 1;
            Vec::new()
        }
        other => other.into_imports(),
    };

    let file_idx = graph.add_node(relative, NodeKind::File, false);
    stats.source_files += 1;

    for specifier in &imports {
        let dep_idx = graph.add_node(specifier, NodeKind::Dependency, true);
        graph.add_edge(file_idx, dep_idx);
    }
    graph.set_imports(file_idx, imports);
}

fn inject_manifest_dependencies(root: &Path, graph: &mut ImportGraph, stats: &mut BuildStats) {
    match manifest::load(root) {
        Ok(Some(pkg)) => {
            for name in pkg.dependency_names() {
                graph.add_node(name, NodeKind::Dependency, true);
                stats.manifest_dependencies += 1;
            }
        }
        Ok(None) => debug!(root = %root.display(), "no package.json at project root"),
        Err(err) => {
            warn!(error = %err, "skipping package.json dependencies");
            stats.manifest_malformed = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::node::GraphNode;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn project(files: &[(&str, &str)]) -> TempDir {
        let dir = tempfile::tempdir().expect("tempdir");
        for (rel, contents) in files {
            let path = dir.path().join(rel);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).unwrap();
            }
            fs::write(path, contents).unwrap();
        }
        dir
    }

    fn build(dir: &TempDir) -> BuildOutcome {
        build_graph(dir.path(), &BuildOptions::default()).expect("build")
    }

    fn ids(graph: &ImportGraph) -> Vec<String> {
        graph.nodes().map(|n| n.id.clone()).collect()
    }

    fn assert_no_dangling(graph: &ImportGraph) {
        let ids: std::collections::HashSet<_> = graph.nodes().map(|n| n.id.as_str()).collect();
        for (source, target) in graph.edges() {
            assert!(ids.contains(source), "dangling source {source}");
            assert!(ids.contains(target), "dangling target {target}");
        }
    }

    #[test]
    fn test_basic_graph() {
        let dir = project(&[
            ("src/index.ts", "import { a } from './a';\nimport React from 'react';\n"),
            ("src/a.ts", "export const a = 1;\n"),
        ]);
        let BuildOutcome { graph, stats } = build(&dir);

        assert_eq!(ids(&graph), vec!["src/index.ts", "./a", "react"]);
        let edges: Vec<_> = graph.edges().collect();
        assert_eq!(edges, vec![("src/index.ts", "./a"), ("src/index.ts", "react")]);

        let index = graph.node("src/index.ts").unwrap();
        assert_eq!(index.kind, NodeKind::File);
        assert!(!index.is_external);
        assert_eq!(index.imports, vec!["./a", "react"]);

        let dep = graph.node("./a").unwrap();
        assert_eq!(dep.kind, NodeKind::Dependency);
        assert!(dep.is_external);

        assert_eq!(stats.source_files, 2);
        assert_eq!(stats.folders, 1);
        // src folder and src/a.ts have no edges
        assert_eq!(stats.pruned, 2);
        assert_no_dangling(&graph);
    }

    #[test]
    fn test_lone_file_without_imports_yields_empty_graph() {
        let dir = project(&[("only.ts", "export const x = 1;\n")]);
        let BuildOutcome { graph, stats } = build(&dir);
        assert_eq!(graph.node_count(), 0);
        assert_eq!(graph.edge_count(), 0);
        assert_eq!(stats.source_files, 1);
    }

    #[test]
    fn test_duplicate_imports_give_two_edges_one_node() {
        let dir = project(&[(
            "main.js",
            "import { a } from \"./util\";\nimport { b } from './util';\n",
        )]);
        let BuildOutcome { graph, .. } = build(&dir);
        let edges: Vec<_> = graph.edges().collect();
        assert_eq!(edges, vec![("main.js", "./util"), ("main.js", "./util")]);
        assert_eq!(graph.nodes().filter(|n| n.id == "./util").count(), 1);
        assert_eq!(graph.node("main.js").unwrap().imports, vec!["./util", "./util"]);
    }

    #[test]
    fn test_gitignored_directory_is_excluded() {
        let dir = project(&[
            (".gitignore", "dist/\n"),
            ("dist/bundle.js", "import x from 'should-not-appear';\n"),
            ("src/app.js", "import y from 'kept';\n"),
        ]);
        let BuildOutcome { graph, stats } = build(&dir);
        assert!(graph.nodes().all(|n| !n.id.starts_with("dist")));
        assert!(graph.node("should-not-appear").is_none());
        assert!(graph.node("kept").is_some());
        assert_eq!(stats.ignored, 1);
    }

    #[test]
    fn test_node_modules_always_excluded() {
        let dir = project(&[
            ("node_modules/react/index.js", "import a from 'scheduler';\n"),
            ("app.ts", "import React from 'react';\n"),
        ]);
        let BuildOutcome { graph, .. } = build(&dir);
        assert_eq!(ids(&graph), vec!["app.ts", "react"]);
    }

    #[test]
    fn test_manifest_dependencies() {
        let dir = project(&[
            (
                "package.json",
                r#"{"dependencies": {"react": "^18", "lodash": "^4"}, "devDependencies": {"jest": "^29"}}"#,
            ),
            ("src/app.tsx", "import React from 'react';\nexport const App = () => <div />;\n"),
        ]);
        let BuildOutcome { graph, stats } = build(&dir);
        assert_eq!(stats.manifest_dependencies, 2);
        assert!(graph.node("lodash").is_none(), "unused declared dependency is pruned");
        assert!(graph.node("jest").is_none());
        let react: Vec<&GraphNode> = graph.nodes().filter(|n| n.id == "react").collect();
        assert_eq!(react.len(), 1);
        assert!(react[0].is_external);
        assert_eq!(react[0].kind, NodeKind::Dependency);
    }

    #[test]
    fn test_manifest_dependencies_kept_without_pruning() {
        let dir = project(&[("package.json", r#"{"dependencies": {"lodash": "^4"}}"#)]);
        let options = BuildOptions {
            prune_orphans: false,
            ..BuildOptions::default()
        };
        let BuildOutcome { graph, .. } = build_graph(dir.path(), &options).unwrap();
        assert_eq!(ids(&graph), vec!["lodash"]);
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_malformed_manifest_keeps_traversal_graph() {
        let dir = project(&[
            ("package.json", "{ \"dependencies\": { \"react\": "),
            ("index.js", "import r from 'react';\nimport u from './u';\n"),
        ]);
        let BuildOutcome { graph, stats } = build(&dir);
        assert!(stats.manifest_malformed);
        assert_eq!(ids(&graph), vec!["index.js", "react", "./u"]);
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn test_parse_failure_still_registers_file() {
        let dir = project(&[
            ("broken.ts", "import { a } from './a';\nconst = ;\n"),
            ("ok.ts", "import b from './broken';\n"),
        ]);
        let options = BuildOptions {
            prune_orphans: false,
            ..BuildOptions::default()
        };
        let BuildOutcome { graph, stats } = build_graph(dir.path(), &options).unwrap();
        assert_eq!(stats.parse_failures, 1);
        let broken = graph.node("broken.ts").expect("broken file still registered");
        assert_eq!(broken.kind, NodeKind::File);
        assert!(broken.imports.is_empty());
        assert!(graph.node("./a").is_none());
    }

    #[test]
    fn test_keep_orphans_shows_folders() {
        let dir = project(&[("src/lib/a.ts", "export {};\n")]);
        let options = BuildOptions {
            prune_orphans: false,
            ..BuildOptions::default()
        };
        let BuildOutcome { graph, .. } = build_graph(dir.path(), &options).unwrap();
        assert_eq!(ids(&graph), vec!["src", "src/lib", "src/lib/a.ts"]);
        assert_eq!(graph.node("src/lib").unwrap().kind, NodeKind::Folder);
    }

    #[test]
    fn test_exclude_option() {
        let dir = project(&[
            ("src/a.test.ts", "import x from 'vitest';\n"),
            ("src/a.ts", "import y from 'zod';\n"),
        ]);
        let options = BuildOptions {
            exclude: vec!["*.test.ts".to_string()],
            ..BuildOptions::default()
        };
        let BuildOutcome { graph, .. } = build_graph(dir.path(), &options).unwrap();
        assert_eq!(ids(&graph), vec!["src/a.ts", "zod"]);
    }

    #[test]
    fn test_missing_root_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing: PathBuf = dir.path().join("nope");
        let result = build_graph(&missing, &BuildOptions::default());
        assert!(matches!(result, Err(BuildError::RootNotFound(_))));
    }

    #[test]
    fn test_file_root_is_an_error() {
        let dir = project(&[("file.ts", "")]);
        let result = build_graph(&dir.path().join("file.ts"), &BuildOptions::default());
        assert!(matches!(result, Err(BuildError::RootNotDirectory(_))));
    }

    #[test]
    fn test_specifiers_are_not_resolved() {
        let dir = project(&[
            ("src/a/x.ts", "import u from '../util';\n"),
            ("src/b.ts", "import u from './util';\n"),
            ("src/util.ts", "export default 1;\n"),
        ]);
        let BuildOutcome { graph, .. } = build(&dir);
        assert!(graph.node("../util").is_some());
        assert!(graph.node("./util").is_some());
        assert!(graph.node("src/util.ts").is_none(), "unimported by literal path, pruned");
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_cycle_build_terminates() {
        let dir = project(&[("pkg/a.js", "import b from './b';\n")]);
        std::os::unix::fs::symlink(dir.path().join("pkg"), dir.path().join("pkg/self")).unwrap();
        let BuildOutcome { graph, stats } = build(&dir);
        assert_eq!(ids(&graph), vec!["pkg/a.js", "./b"]);
        assert_eq!(stats.revisits_skipped, 1);
    }

    #[test]
    fn test_unreadable_file_is_skipped() {
        let dir = project(&[
            ("bad.ts", "import a from 'a';\n"),
            ("good.ts", "import b from 'b';\n"),
        ]);
        // Invalid UTF-8 cannot be read as source text.
        fs::write(dir.path().join("bad.ts"), [0xff, 0xfe, 0xfd]).unwrap();
        let BuildOutcome { graph, stats } = build(&dir);
        assert_eq!(ids(&graph), vec!["good.ts", "b"]);
        assert_eq!(stats.unreadable, 1);
    }

    #[test]
    fn test_repeated_builds_are_isolated() {
        let dir = project(&[("m.ts", "import a from 'a';\n")]);
        let first = build(&dir);
        let second = build(&dir);
        assert_eq!(ids(&first.graph), ids(&second.graph));
        assert_eq!(first.graph.edge_count(), second.graph.edge_count());
    }
}
