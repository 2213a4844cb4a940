//! Gitignore-style path filtering for the project walk.

use std::path::Path;

use ignore::gitignore::{Gitignore, GitignoreBuilder};
use tracing::{debug, warn};

/// Directory names that are never traversed, whatever the pattern file says.
pub const ALWAYS_IGNORED_DIRS: &[&str] = &["node_modules", ".git"];

/// Decides whether a project-relative path is excluded from traversal.
///
/// Patterns come from `<root>/.gitignore` (optional) followed by any extra
/// gitignore-style lines from the configuration file. Matching follows
/// gitignore semantics: negation, directory-only patterns, wildcards and
/// anchoring all behave as they do in git.
pub struct IgnoreMatcher {
    gitignore: Gitignore,
}

impl IgnoreMatcher {
    /// Load the ignore rules for `root`.
    ///
    /// A missing `.gitignore` means "no patterns". Malformed lines are logged
    /// and skipped; the remaining lines still apply.
    pub fn load(root: &Path, extra_patterns: &[String]) -> Self {
        let mut builder = GitignoreBuilder::new(root);

        let gitignore_path = root.join(".gitignore");
        if gitignore_path.is_file() {
            if let Some(err) = builder.add(&gitignore_path) {
                warn!(path = %gitignore_path.display(), error = %err, "ignoring malformed .gitignore lines");
            }
        } else {
            debug!(root = %root.display(), "no .gitignore at project root");
        }

        for pattern in extra_patterns {
            if let Err(err) = builder.add_line(None, pattern) {
                warn!(pattern = %pattern, error = %err, "skipping invalid exclude pattern");
            }
        }

        let gitignore = builder.build().unwrap_or_else(|err| {
            warn!(error = %err, "failed to compile ignore patterns, continuing without them");
            Gitignore::empty()
        });

        Self { gitignore }
    }

    /// Number of patterns loaded (not counting the hard-coded directories).
    pub fn pattern_count(&self) -> usize {
        self.gitignore.num_ignores() as usize + self.gitignore.num_whitelists() as usize
    }

    /// Returns true if `relative_path` (relative to the project root) must be
    /// skipped. `is_dir` selects directory-only patterns such as `dist/`.
    ///
    /// Backslashes are normalized to `/` first, and the path's parents are
    /// checked too, so a file under an ignored directory is ignored even when
    /// asked about directly.
    pub fn should_ignore(&self, relative_path: &str, is_dir: bool) -> bool {
        let normalized = relative_path.replace('\\', "/");
        let normalized = normalized.trim_start_matches("./").trim_matches('/');
        if normalized.is_empty() {
            return false;
        }

        if normalized
            .split('/')
            .any(|segment| ALWAYS_IGNORED_DIRS.contains(&segment))
        {
            return true;
        }

        self.gitignore
            .matched_path_or_any_parents(Path::new(normalized), is_dir)
            .is_ignore()
    }
}
