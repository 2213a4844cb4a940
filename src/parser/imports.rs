use tree_sitter::{Node, Tree};

// ---------------------------------------------------------------------------
// Helper utilities
// ---------------------------------------------------------------------------

fn node_text<'a>(node: Node<'a>, source: &'a [u8]) -> &'a str {
    node.utf8_text(source).unwrap_or("")
}

/// Strip the surrounding quotes from a string literal as written in source.
/// Escape sequences are left untouched.
fn unquote(literal: &str) -> Option<&str> {
    let quote = literal.chars().next().filter(|c| matches!(c, '\'' | '"'))?;
    literal
        .strip_prefix(quote)
        .and_then(|rest| rest.strip_suffix(quote))
}

// ---------------------------------------------------------------------------
// Import extraction
// ---------------------------------------------------------------------------

/// Collect the module specifier of every static import declaration in `tree`,
/// in source order, duplicates included.
///
/// Handles every `import_statement` carrying a `source` string:
/// - Default / named / namespace / aliased: `import A, { b as c } from 'mod'`
/// - Type-only (TypeScript): `import type { T } from './types'`
/// - Side-effect only: `import './polyfill'`
/// - Any of the above spread over several lines
///
/// Not collected: `import()` expressions, `require(...)` calls, TypeScript
/// `import x = require('y')` (the string sits on the nested require clause,
/// not on the statement), and `export ... from` re-exports. Commented-out
/// imports never reach the tree as statements.
pub fn extract_import_specifiers(tree: &Tree, source: &[u8]) -> Vec<String> {
    let root = tree.root_node();
    let mut specifiers = Vec::new();

    // Static imports are only legal at module top level.
    let mut cursor = root.walk();
    for child in root.named_children(&mut cursor) {
        if child.kind() != "import_statement" {
            continue;
        }
        let Some(string_node) = child.child_by_field_name("source") else {
            continue;
        };
        if let Some(specifier) = unquote(node_text(string_node, source)) {
            specifiers.push(specifier.to_owned());
        }
    }

    specifiers
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
