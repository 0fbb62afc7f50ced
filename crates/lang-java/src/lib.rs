pub mod parser;

pub use parser::JavaDeclarationParser;
