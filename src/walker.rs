//! Depth-first project traversal that reports folders and source files.

use std::collections::HashSet;
use std::fs;
use std::path::{Component, Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use crate::ignore_rules::IgnoreMatcher;
use crate::parser::languages::SOURCE_EXTENSIONS;

/// An entry the walker hands to its visitor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalkEvent {
    /// A directory below the root that passed the ignore rules.
    Folder { relative: String },
    /// A `.js`/`.jsx`/`.ts`/`.tsx` file that passed the ignore rules.
    SourceFile { path: PathBuf, relative: String },
}

/// Counters collected while walking.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct WalkSummary {
    /// Entries skipped by the ignore rules (ignored directories count once).
    pub ignored: usize,
    /// Entries whose metadata or directory listing could not be read.
    pub unreadable: usize,
    /// Directories skipped because their real path was already visited.
    pub revisits_skipped: usize,
}

/// Walk `root` depth-first and report folders and source files to `visit`.
///
/// Entries of each directory are visited in file-name order, so the event
/// sequence is deterministic. Symlinks are followed. Links back to an
/// ancestor are reported by `walkdir` as loops; any other directory whose
/// canonical path was already entered is pruned by the entry filter, so each
/// real directory is walked at most once. Ignored directories are never
/// descended into.
///
/// The root itself is not reported. Per-entry I/O failures are logged and
/// counted, never fatal.
pub fn walk_project(
    root: &Path,
    matcher: &IgnoreMatcher,
    mut visit: impl FnMut(WalkEvent),
) -> WalkSummary {
    let mut summary = WalkSummary::default();
    let mut visited: HashSet<PathBuf> = HashSet::new();
    let mut loops_skipped = 0;

    let walker = WalkDir::new(root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            let is_dir = entry.file_type().is_dir();
            if entry.depth() == 0 {
                if let Ok(real_root) = fs::canonicalize(entry.path()) {
                    visited.insert(real_root);
                }
                return true;
            }

            let relative = relative_path(root, entry.path());
            if matcher.should_ignore(&relative, is_dir) {
                debug!(path = %relative, "ignored");
                summary.ignored += 1;
                return false;
            }

            if is_dir {
                let real = fs::canonicalize(entry.path())
                    .unwrap_or_else(|_| entry.path().to_path_buf());
                if !visited.insert(real) {
                    debug!(path = %relative, "directory already visited, skipping");
                    summary.revisits_skipped += 1;
                    return false;
                }
            }
            true
        });

    for result in walker {
        let entry = match result {
            Ok(entry) => entry,
            Err(err) if err.loop_ancestor().is_some() => {
                debug!(error = %err, "symlink loop, skipping");
                loops_skipped += 1;
                continue;
            }
            Err(err) => {
                // Dangling links and unlistable directories end up here.
                debug!(error = %err, "skipping unreadable entry");
                summary.unreadable += 1;
                continue;
            }
        };
        if entry.depth() == 0 {
            continue;
        }

        let relative = relative_path(root, entry.path());
        if entry.file_type().is_dir() {
            visit(WalkEvent::Folder { relative });
            continue;
        }

        let ext = entry
            .path()
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("");
        if !SOURCE_EXTENSIONS.contains(&ext) {
            continue;
        }

        visit(WalkEvent::SourceFile {
            path: entry.into_path(),
            relative,
        });
    }

    summary.revisits_skipped += loops_skipped;
    summary
}

/// Path of `path` relative to `root`, joined with forward slashes whatever
/// the host separator is.
pub fn relative_path(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}
