pub mod imports;
pub mod languages;

use std::path::Path;

use anyhow::{Context, Result, anyhow};
use tracing::debug;
use tree_sitter::{Parser, Tree};

use imports::extract_import_specifiers;
use languages::SourceDialect;

/// Outcome of extracting imports from one source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    /// The file parsed cleanly; specifiers in source order.
    Imports(Vec<String>),
    /// The file has a syntax error (or could not be parsed at all). The
    /// builder still records the file, with no imports.
    ParseFailure,
    /// The extension is not one of `.js`/`.jsx`/`.ts`/`.tsx`.
    Unsupported,
}

impl Extraction {
    /// The specifier list, empty unless parsing succeeded.
    pub fn into_imports(self) -> Vec<String> {
        match self {
            Extraction::Imports(imports) => imports,
            Extraction::ParseFailure | Extraction::Unsupported => Vec::new(),
        }
    }
}

/// Parse `source` as a module in the given dialect.
///
/// Allocates a fresh `Parser` per call; the builder reads and parses one file
/// at a time, so the overhead is negligible next to the file read.
///
/// # Errors
/// Returns an error if the grammar cannot be loaded or tree-sitter returns
/// `None`. A tree that merely contains error nodes is returned as `Ok`.
pub fn parse_module(source: &str, dialect: SourceDialect) -> Result<Tree> {
    let mut parser = Parser::new();
    parser
        .set_language(&dialect.language())
        .with_context(|| format!("failed to set tree-sitter language for {:?}", dialect))?;
    parser
        .parse(source.as_bytes(), None)
        .ok_or_else(|| anyhow!("tree-sitter returned no tree for {:?} source", dialect))
}

/// Extract the static import specifiers of a source file.
///
/// The grammar is picked from `path`'s extension. Any syntax error in the
/// file yields [`Extraction::ParseFailure`] rather than a partial list.
pub fn extract_imports(source: &str, path: &Path) -> Extraction {
    let Some(dialect) = SourceDialect::from_path(path) else {
        return Extraction::Unsupported;
    };

    let tree = match parse_module(source, dialect) {
        Ok(tree) => tree,
        Err(err) => {
            debug!(path = %path.display(), error = %err, "parser failed");
            return Extraction::ParseFailure;
        }
    };

    if tree.root_node().has_error() {
        debug!(path = %path.display(), "syntax error in source file");
        return Extraction::ParseFailure;
    }

    Extraction::Imports(extract_import_specifiers(&tree, source.as_bytes()))
}
