use crate::error::{DeclscopeError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Shared handle to an immutable declaration node.
///
/// Nodes are reference counted so that the name index, the outline and the
/// tree itself can all point at the same declaration. Identity comparisons
/// (`Arc::ptr_eq`) distinguish overloads that share a simple name.
pub type DeclRef = Arc<DeclarationNode>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeclarationKind {
    Type,
    Method,
    Constructor,
    Field,
    EnumConstant,
}

impl DeclarationKind {
    /// Only types may own nested declarations.
    pub fn is_container(&self) -> bool {
        matches!(self, DeclarationKind::Type)
    }
}

impl fmt::Display for DeclarationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DeclarationKind::Type => "type",
            DeclarationKind::Method => "method",
            DeclarationKind::Constructor => "constructor",
            DeclarationKind::Field => "field",
            DeclarationKind::EnumConstant => "enum_constant",
        };
        f.write_str(label)
    }
}

/// Extent of a declaration in the source text.
///
/// Lines and columns are 1-based. `end_line` is inclusive and covers the
/// body when one exists. Columns count bytes, matching the rendered buffer
/// offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRange {
    pub begin_line: usize,
    pub end_line: usize,
    pub begin_column: usize,
}

impl SourceRange {
    pub fn new(begin_line: usize, end_line: usize, begin_column: usize) -> Result<Self> {
        if begin_line == 0 || begin_column == 0 {
            return Err(DeclscopeError::InvalidRange(format!(
                "lines and columns are 1-based, got {}:{}",
                begin_line, begin_column
            )));
        }
        if begin_line > end_line {
            return Err(DeclscopeError::InvalidRange(format!(
                "begin line {} is after end line {}",
                begin_line, end_line
            )));
        }
        Ok(Self {
            begin_line,
            end_line,
            begin_column,
        })
    }
}

impl fmt::Display for SourceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}-{}",
            self.begin_line, self.begin_column, self.end_line
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeclarationNode {
    pub name: String,
    pub kind: DeclarationKind,
    pub range: SourceRange,
    pub children: Vec<DeclRef>,
}

impl DeclarationNode {
    pub fn new(name: impl Into<String>, kind: DeclarationKind, range: SourceRange) -> Self {
        Self {
            name: name.into(),
            kind,
            range,
            children: Vec::new(),
        }
    }

    pub fn with_children(mut self, children: Vec<DeclarationNode>) -> Self {
        self.children = children.into_iter().map(Arc::new).collect();
        self
    }

    pub fn push_child(&mut self, child: DeclarationNode) {
        self.children.push(Arc::new(child));
    }

    pub fn begin_line(&self) -> usize {
        self.range.begin_line
    }

    pub fn end_line(&self) -> usize {
        self.range.end_line
    }

    pub fn begin_column(&self) -> usize {
        self.range.begin_column
    }

    /// Walks this node and its descendants in pre-order.
    pub fn pre_order(self: &Arc<Self>) -> PreOrder {
        PreOrder::new(std::slice::from_ref(self))
    }
}

/// Pre-order traversal over a declaration forest.
pub struct PreOrder {
    stack: Vec<DeclRef>,
}

impl PreOrder {
    pub fn new(roots: &[DeclRef]) -> Self {
        Self {
            stack: roots.iter().rev().cloned().collect(),
        }
    }
}

impl Iterator for PreOrder {
    type Item = DeclRef;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev().cloned());
        Some(node)
    }
}
