use super::constants::*;
use declscope_core::model::{DeclarationKind, DeclarationNode, SourceRange};
use declscope_core::parser::Forest;
use tracing::warn;
use tree_sitter::Node;

/// Walks a Java syntax tree and builds the declaration forest.
///
/// Only type bodies are descended into: members of anonymous and local
/// classes live inside method bodies and are not part of the outline.
pub(crate) struct DeclarationCollector<'s> {
    source: &'s str,
}

impl<'s> DeclarationCollector<'s> {
    pub(crate) fn new(source: &'s str) -> Self {
        Self { source }
    }

    pub(crate) fn collect_program(&self, root: Node<'_>) -> Forest {
        let mut forest = Vec::new();
        self.collect_members(root, &mut forest);
        forest
    }

    fn collect_members(&self, container: Node<'_>, out: &mut Vec<DeclarationNode>) {
        let mut cursor = container.walk();
        for child in container.named_children(&mut cursor) {
            self.collect(child, out);
        }
    }

    fn collect(&self, node: Node<'_>, out: &mut Vec<DeclarationNode>) {
        match node.kind() {
            CLASS_DECLARATION
            | INTERFACE_DECLARATION
            | ENUM_DECLARATION
            | RECORD_DECLARATION
            | ANNOTATION_TYPE_DECLARATION => {
                if let Some(mut decl) = self.declaration(node, node, DeclarationKind::Type) {
                    if let Some(body) = node.child_by_field_name(FIELD_BODY) {
                        let mut members = Vec::new();
                        self.collect_members(body, &mut members);
                        decl = decl.with_children(members);
                    }
                    out.push(decl);
                }
            }
            METHOD_DECLARATION | ANNOTATION_ELEMENT_DECLARATION => {
                out.extend(self.declaration(node, node, DeclarationKind::Method));
            }
            CONSTRUCTOR_DECLARATION | COMPACT_CONSTRUCTOR_DECLARATION => {
                out.extend(self.declaration(node, node, DeclarationKind::Constructor));
            }
            ENUM_CONSTANT => {
                out.extend(self.declaration(node, node, DeclarationKind::EnumConstant));
            }
            FIELD_DECLARATION | CONSTANT_DECLARATION => {
                // `int a, b;` declares two fields sharing one range.
                let mut cursor = node.walk();
                for declarator in node.children_by_field_name(FIELD_DECLARATOR, &mut cursor) {
                    out.extend(self.declaration(node, declarator, DeclarationKind::Field));
                }
            }
            ENUM_BODY_DECLARATIONS => self.collect_members(node, out),
            _ => {}
        }
    }

    /// Builds a declaration spanning `node`, named by `named`'s `name` field.
    fn declaration(
        &self,
        node: Node<'_>,
        named: Node<'_>,
        kind: DeclarationKind,
    ) -> Option<DeclarationNode> {
        let name = named
            .child_by_field_name(FIELD_NAME)?
            .utf8_text(self.source.as_bytes())
            .ok()?;

        let start = node.start_position();
        let end = node.end_position();
        match SourceRange::new(start.row + 1, end.row + 1, start.column + 1) {
            Ok(range) => Some(DeclarationNode::new(name, kind, range)),
            Err(e) => {
                warn!("Skipping {} '{}': {}", node.kind(), name, e);
                None
            }
        }
    }
}
