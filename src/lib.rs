//! Import graph construction for TypeScript/JavaScript projects.
//!
//! [`builder::build_graph`] walks a project root, extracts the static import
//! specifiers of every `.js`/`.jsx`/`.ts`/`.tsx` file with tree-sitter, and
//! assembles an [`graph::ImportGraph`] of file, folder and dependency nodes.
//! [`export`] turns the result into the JSON document a renderer consumes.

pub mod builder;
pub mod config;
pub mod error;
pub mod export;
pub mod graph;
pub mod ignore_rules;
pub mod manifest;
pub mod parser;
pub mod walker;

pub use builder::{BuildOptions, BuildOutcome, BuildStats, build_graph};
pub use error::BuildError;
pub use export::model::GraphDocument;
pub use graph::ImportGraph;
