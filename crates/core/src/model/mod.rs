pub mod declaration;
pub mod source;

pub use declaration::{DeclRef, DeclarationKind, DeclarationNode, PreOrder, SourceRange};
pub use source::SourceModel;
