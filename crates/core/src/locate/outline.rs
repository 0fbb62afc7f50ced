use crate::model::{DeclRef, DeclarationKind, SourceModel};
use std::collections::VecDeque;

/// Child indices from a root of the outline down to one node.
pub type OutlinePath = Vec<usize>;

#[derive(Debug, Clone)]
pub struct OutlineNode {
    pub label: String,
    pub declaration: DeclRef,
    pub children: Vec<OutlineNode>,
}

impl OutlineNode {
    fn from_declaration(decl: &DeclRef) -> Self {
        let children = if decl.kind.is_container() {
            decl.children.iter().map(Self::from_declaration).collect()
        } else {
            Vec::new()
        };
        Self {
            label: decl.name.clone(),
            declaration: decl.clone(),
            children,
        }
    }

    pub fn kind(&self) -> DeclarationKind {
        self.declaration.kind
    }

    /// This node and everything below it, depth-first, with depths
    /// relative to this node.
    pub fn descendants(&self) -> Vec<(usize, &OutlineNode)> {
        fn walk<'a>(node: &'a OutlineNode, depth: usize, out: &mut Vec<(usize, &'a OutlineNode)>) {
            out.push((depth, node));
            for child in &node.children {
                walk(child, depth + 1, out);
            }
        }

        let mut out = Vec::new();
        walk(self, 0, &mut out);
        out
    }
}

/// The navigable tree mirroring a file's declaration forest.
#[derive(Debug, Clone, Default)]
pub struct Outline {
    roots: Vec<OutlineNode>,
}

impl Outline {
    pub fn from_model(model: &SourceModel) -> Self {
        Self {
            roots: model
                .roots()
                .iter()
                .map(OutlineNode::from_declaration)
                .collect(),
        }
    }

    pub fn roots(&self) -> &[OutlineNode] {
        &self.roots
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    pub fn node(&self, path: &[usize]) -> Option<&OutlineNode> {
        let (first, rest) = path.split_first()?;
        let mut node = self.roots.get(*first)?;
        for idx in rest {
            node = node.children.get(*idx)?;
        }
        Some(node)
    }

    /// Breadth-first search for the first node whose label equals `label`.
    pub fn find_label(&self, label: &str) -> Option<OutlinePath> {
        let mut queue: VecDeque<(OutlinePath, &OutlineNode)> = self
            .roots
            .iter()
            .enumerate()
            .map(|(i, n)| (vec![i], n))
            .collect();

        while let Some((path, node)) = queue.pop_front() {
            if node.label == label {
                return Some(path);
            }
            for (i, child) in node.children.iter().enumerate() {
                let mut child_path = path.clone();
                child_path.push(i);
                queue.push_back((child_path, child));
            }
        }
        None
    }

    /// Depth-first listing as `(depth, node)` pairs, for display.
    pub fn flatten(&self) -> Vec<(usize, &OutlineNode)> {
        self.roots.iter().flat_map(OutlineNode::descendants).collect()
    }
}
