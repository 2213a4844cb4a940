//! Error types for graph construction.
//!
//! Only failures that make a graph impossible are surfaced as [`BuildError`].
//! Everything that concerns a single file, the ignore file, or the manifest is
//! recovered inside the builder and reported through logs and `BuildStats`.

use std::path::PathBuf;

use thiserror::Error;

/// Fatal errors returned by [`crate::builder::build_graph`].
#[derive(Debug, Error)]
pub enum BuildError {
    /// The project root does not exist.
    #[error("root directory not found: {}", .0.display())]
    RootNotFound(PathBuf),

    /// The project root exists but is not a directory.
    #[error("root path is not a directory: {}", .0.display())]
    RootNotDirectory(PathBuf),

    /// The project root exists but could not be inspected.
    #[error("cannot access root {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors reading `package.json`. Recovered by the builder: dependency
/// injection is skipped and the traversal-derived graph is kept.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("failed to read manifest: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse manifest JSON: {0}")]
    Json(#[from] serde_json::Error),
}
