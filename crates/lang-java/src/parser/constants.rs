// Node kinds of the tree-sitter-java grammar.

pub const CLASS_DECLARATION: &str = "class_declaration";
pub const INTERFACE_DECLARATION: &str = "interface_declaration";
pub const ENUM_DECLARATION: &str = "enum_declaration";
pub const RECORD_DECLARATION: &str = "record_declaration";
pub const ANNOTATION_TYPE_DECLARATION: &str = "annotation_type_declaration";

pub const METHOD_DECLARATION: &str = "method_declaration";
pub const ANNOTATION_ELEMENT_DECLARATION: &str = "annotation_type_element_declaration";
pub const CONSTRUCTOR_DECLARATION: &str = "constructor_declaration";
pub const COMPACT_CONSTRUCTOR_DECLARATION: &str = "compact_constructor_declaration";
pub const FIELD_DECLARATION: &str = "field_declaration";
pub const CONSTANT_DECLARATION: &str = "constant_declaration";
pub const ENUM_CONSTANT: &str = "enum_constant";

pub const ENUM_BODY_DECLARATIONS: &str = "enum_body_declarations";

pub const FIELD_NAME: &str = "name";
pub const FIELD_BODY: &str = "body";
pub const FIELD_DECLARATOR: &str = "declarator";
