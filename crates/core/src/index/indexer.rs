use crate::model::source::QUALIFIED_SEPARATOR;
use crate::model::{DeclRef, DeclarationNode, SourceModel};
use crate::parser::{DeclarationParser, Forest, ParseError};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, warn};

/// Turns the parser's declaration forest into a [`SourceModel`].
pub struct SourceIndexer;

#[derive(Default)]
struct IndexState {
    name_index: HashMap<String, DeclRef>,
    qualified_index: HashMap<String, DeclRef>,
    declarations: Vec<DeclRef>,
    seen: HashSet<*const DeclarationNode>,
    ambiguous: usize,
}

impl SourceIndexer {
    /// Parses `source` and indexes the result. A failed parse yields an
    /// empty model.
    pub fn build(
        parser: &dyn DeclarationParser,
        source: &str,
        path: Option<&Path>,
    ) -> SourceModel {
        Self::index_parsed(parser.parse(source, path))
    }

    pub fn index_parsed(result: Result<Forest, ParseError>) -> SourceModel {
        match result {
            Ok(forest) => Self::index(Some(forest)),
            Err(e) => {
                warn!("No declarations available: {}", e);
                SourceModel::empty()
            }
        }
    }

    /// Indexes an optional forest; `None` means the upstream parse failed.
    pub fn index(forest: Option<Forest>) -> SourceModel {
        match forest {
            Some(forest) => Self::index_roots(forest.into_iter().map(Arc::new).collect()),
            None => SourceModel::empty(),
        }
    }

    pub fn index_roots(roots: Vec<DeclRef>) -> SourceModel {
        let mut state = IndexState::default();

        for root in &roots {
            Self::visit(root, None, &mut state);
        }

        debug!(
            "Indexed {} declarations ({} shadowed by later declarations with the same name)",
            state.declarations.len(),
            state.ambiguous
        );

        SourceModel::from_parts(
            roots,
            state.name_index,
            state.qualified_index,
            state.declarations,
        )
    }

    fn visit(node: &DeclRef, parent_path: Option<&str>, state: &mut IndexState) {
        if !state.seen.insert(Arc::as_ptr(node)) {
            warn!(
                "Declaration '{}' at {} is attached to more than one parent, skipping",
                node.name, node.range
            );
            return;
        }

        if let Some(previous) = state.name_index.insert(node.name.clone(), node.clone()) {
            state.ambiguous += 1;
            warn!(
                "Ambiguous name '{}': {} replaces {}",
                node.name, node.range, previous.range
            );
        }
        state.declarations.push(node.clone());

        let path = match parent_path {
            Some(parent) => format!("{}{}{}", parent, QUALIFIED_SEPARATOR, node.name),
            None => node.name.clone(),
        };
        state.qualified_index.insert(path.clone(), node.clone());

        if node.children.is_empty() {
            return;
        }
        if !node.kind.is_container() {
            warn!(
                "{} '{}' cannot own nested declarations, ignoring {} children",
                node.kind,
                node.name,
                node.children.len()
            );
            return;
        }

        for child in &node.children {
            Self::visit(child, Some(&path), state);
        }
    }
}
