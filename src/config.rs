//! Optional `import-graph.toml` configuration at the project root.

use std::path::Path;

use serde::Deserialize;
use tracing::warn;

/// File name of the optional per-project configuration.
pub const CONFIG_FILE: &str = "import-graph.toml";

/// Configuration loaded from `import-graph.toml` at the project root.
#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct ImportGraphConfig {
    /// Additional gitignore-style patterns to exclude (beyond .gitignore,
    /// node_modules and .git).
    pub exclude: Option<Vec<String>>,
    /// Drop nodes without incident edges after the build. Defaults to true.
    pub prune_orphans: Option<bool>,
}

impl ImportGraphConfig {
    /// Load configuration from `import-graph.toml` in the given root directory.
    ///
    /// Returns a default (empty) configuration if the file does not exist or cannot be parsed.
    pub fn load(root: &Path) -> Self {
        let config_path = root.join(CONFIG_FILE);

        if !config_path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(&config_path) {
            Ok(contents) => match toml::from_str::<Self>(&contents) {
                Ok(config) => config,
                Err(err) => {
                    warn!("failed to parse {CONFIG_FILE}: {err}. Using defaults.");
                    Self::default()
                }
            },
            Err(err) => {
                warn!("failed to read {CONFIG_FILE}: {err}. Using defaults.");
                Self::default()
            }
        }
    }

    /// Extra exclusion patterns, empty when none are configured.
    pub fn exclude_patterns(&self) -> &[String] {
        self.exclude.as_deref().unwrap_or_default()
    }
}
