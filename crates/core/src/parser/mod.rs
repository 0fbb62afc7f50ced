use crate::model::DeclarationNode;
use std::path::Path;
use thiserror::Error;

/// Ordered top-level declarations of one file, with their nested members.
pub type Forest = Vec<DeclarationNode>;

/// Why a structural parser produced no declarations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("parser unavailable: {0}")]
    Unavailable(String),
    #[error("syntax error at line {line}, column {column}")]
    Syntax { line: usize, column: usize },
    #[error("failed to read source: {0}")]
    Read(String),
}

/// Capability supplied by a language plugin: turn source text into a
/// declaration forest annotated with 1-based positions.
pub trait DeclarationParser: Send + Sync {
    fn language(&self) -> &str;

    fn supported_extensions(&self) -> &[&str];

    fn parse(&self, source: &str, path: Option<&Path>) -> Result<Forest, ParseError>;

    fn supports_path(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.supported_extensions().contains(&ext))
    }
}
