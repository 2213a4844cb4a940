use std::path::Path;

use tree_sitter::Language;

/// Source file extensions the builder parses.
pub const SOURCE_EXTENSIONS: &[&str] = &["js", "jsx", "ts", "tsx"];

/// The grammar a source file is parsed with.
///
/// Uses a plain enum (not trait objects): the extractor is a single routine
/// and only the grammar differs per dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceDialect {
    /// `.js` and `.jsx`. The JavaScript grammar accepts JSX natively.
    JavaScript,
    /// `.ts`
    TypeScript,
    /// `.tsx`
    Tsx,
}

impl SourceDialect {
    /// Pick a dialect from a bare extension (no leading dot).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            "js" | "jsx" => Some(SourceDialect::JavaScript),
            "ts" => Some(SourceDialect::TypeScript),
            "tsx" => Some(SourceDialect::Tsx),
            _ => None,
        }
    }

    /// Pick a dialect from a file path's extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }

    /// Return the tree-sitter [`Language`] for this dialect.
    ///
    /// `.ts` and `.tsx` MUST use different grammars: the TypeScript grammar
    /// cannot parse JSX, and the TSX grammar rejects angle-bracket type
    /// assertions (`<T>expr`).
    pub fn language(&self) -> Language {
        match self {
            SourceDialect::JavaScript => tree_sitter_javascript::LANGUAGE.into(),
            SourceDialect::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            SourceDialect::Tsx => tree_sitter_typescript::LANGUAGE_TSX.into(),
        }
    }
}
