use declscope_core::parser::{DeclarationParser, Forest, ParseError};
use std::path::Path;
use std::time::Instant;
use tracing::debug;
use tree_sitter::{Language, Node, Parser};

mod constants;
mod declarations;

use declarations::DeclarationCollector;

/// Java declaration parser backed by tree-sitter.
///
/// tree-sitter recovers from syntax errors, so by default a broken file
/// still yields every declaration outside the damaged region. A `strict`
/// parser reports the first error instead.
#[derive(Clone)]
pub struct JavaDeclarationParser {
    language: Language,
    strict: bool,
}

impl Default for JavaDeclarationParser {
    fn default() -> Self {
        Self::new()
    }
}

impl JavaDeclarationParser {
    pub fn new() -> Self {
        Self {
            language: tree_sitter_java::LANGUAGE.into(),
            strict: false,
        }
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
}

impl DeclarationParser for JavaDeclarationParser {
    fn language(&self) -> &str {
        "java"
    }

    fn supported_extensions(&self) -> &[&str] {
        &["java"]
    }

    fn parse(&self, source: &str, path: Option<&Path>) -> Result<Forest, ParseError> {
        let start = Instant::now();
        let mut parser = Parser::new();
        parser
            .set_language(&self.language)
            .map_err(|e| ParseError::Unavailable(e.to_string()))?;

        let tree = parser
            .parse(source, None)
            .ok_or_else(|| ParseError::Unavailable("Failed to parse Java file".to_string()))?;
        let root = tree.root_node();

        if self.strict && root.has_error() {
            let at = first_error(root).unwrap_or(root).start_position();
            return Err(ParseError::Syntax {
                line: at.row + 1,
                column: at.column + 1,
            });
        }

        let forest = DeclarationCollector::new(source).collect_program(root);
        debug!(
            "Collected {} top-level declarations from {} in {:?}",
            forest.len(),
            path.map(|p| p.display().to_string())
                .unwrap_or_else(|| "<memory>".to_string()),
            start.elapsed()
        );
        Ok(forest)
    }
}

fn first_error(node: Node<'_>) -> Option<Node<'_>> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    if !node.has_error() {
        return None;
    }
    let mut cursor = node.walk();
    node.children(&mut cursor).find_map(first_error)
}
