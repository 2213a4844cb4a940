//! Reader for the project's `package.json` dependency manifest.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::ManifestError;

/// File name of the dependency manifest at the project root.
pub const MANIFEST_FILE: &str = "package.json";

/// Minimal package.json representation: only production dependencies matter.
///
/// Versions are kept as raw JSON values; only the keys are consumed, so a
/// workspace-protocol or object-valued entry does not make the file malformed.
#[derive(Debug, Default, Deserialize)]
pub struct PackageManifest {
    #[serde(default)]
    pub dependencies: BTreeMap<String, serde_json::Value>,
}

impl PackageManifest {
    /// Names of the declared production dependencies, sorted.
    pub fn dependency_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.dependencies.keys().map(String::as_str)
    }
}

/// Parse a manifest from its JSON text.
pub fn parse_str(content: &str) -> Result<PackageManifest, ManifestError> {
    Ok(serde_json::from_str(content)?)
}

/// Load `<root>/package.json`.
///
/// Returns `Ok(None)` when the file does not exist (absent configuration is
/// not an error) and `Err` when it exists but cannot be read or parsed.
pub fn load(root: &Path) -> Result<Option<PackageManifest>, ManifestError> {
    let path = root.join(MANIFEST_FILE);
    if !path.is_file() {
        return Ok(None);
    }
    let content = fs::read_to_string(&path)?;
    parse_str(&content).map(Some)
}
