use super::declaration::DeclRef;
use std::collections::HashMap;

/// Separator used to build qualified declaration paths (`Outer.Inner.run`).
pub const QUALIFIED_SEPARATOR: char = '.';

/// Declaration model of one open source file.
///
/// Built once by [`crate::index::SourceIndexer`] and never mutated
/// afterwards. The lookup tables are derived from `roots` at build time, so
/// a published model always has all of them populated together.
#[derive(Debug, Default)]
pub struct SourceModel {
    roots: Vec<DeclRef>,
    name_index: HashMap<String, DeclRef>,
    qualified_index: HashMap<String, DeclRef>,
    /// Indexed declarations in pre-order, parallel to `all_names`.
    declarations: Vec<DeclRef>,
    all_names: Vec<String>,
}

impl SourceModel {
    /// The model of a file whose parse produced nothing.
    pub fn empty() -> Self {
        Self::default()
    }

    pub(crate) fn from_parts(
        roots: Vec<DeclRef>,
        name_index: HashMap<String, DeclRef>,
        qualified_index: HashMap<String, DeclRef>,
        declarations: Vec<DeclRef>,
    ) -> Self {
        let all_names = declarations.iter().map(|d| d.name.clone()).collect();
        Self {
            roots,
            name_index,
            qualified_index,
            declarations,
            all_names,
        }
    }

    /// The top-level declaration of the file, usually its public type.
    pub fn root(&self) -> Option<&DeclRef> {
        self.roots.first()
    }

    pub fn roots(&self) -> &[DeclRef] {
        &self.roots
    }

    /// Resolves a simple name. When several declarations share the name the
    /// one indexed last in pre-order wins.
    pub fn lookup(&self, name: &str) -> Option<&DeclRef> {
        self.name_index.get(name)
    }

    /// Resolves a dotted path such as `Outer.Inner.run`.
    pub fn lookup_qualified(&self, path: &str) -> Option<&DeclRef> {
        self.qualified_index.get(path)
    }

    /// Every declaration carrying `name`, in pre-order.
    pub fn lookup_all(&self, name: &str) -> Vec<DeclRef> {
        self.declarations
            .iter()
            .filter(|n| n.name == name)
            .cloned()
            .collect()
    }

    /// Every declaration name, in pre-order. Names repeat once per
    /// declaration.
    pub fn all_names(&self) -> &[String] {
        &self.all_names
    }

    /// Every indexed declaration, in pre-order.
    pub fn pre_order(&self) -> impl Iterator<Item = DeclRef> + '_ {
        self.declarations.iter().cloned()
    }

    pub fn declaration_count(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }
}
