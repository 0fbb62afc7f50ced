use declscope_core::model::{DeclarationKind, DeclarationNode, SourceRange};
use declscope_core::parser::{DeclarationParser, Forest, ParseError};
use std::path::Path;

/// A small Java file with a constructor sharing the type's name, two
/// `process` overloads (one wrapped over two lines) and a nested enum.
#[allow(dead_code)]
pub const ACCOUNT_SOURCE: &str = concat!(
    "package demo;\n",                                   // 1
    "\n",                                                // 2
    "public class Account {\n",                          // 3
    "    private long balance;\n",                       // 4
    "\n",                                                // 5
    "    public Account(long opening) {\n",              // 6
    "        balance = opening;\n",                      // 7
    "    }\n",                                           // 8
    "\n",                                                // 9
    "    public void process(long amount) {\n",          // 10
    "        balance += amount;\n",                      // 11
    "    }\n",                                           // 12
    "\n",                                                // 13
    "    public void process(String memo,\n",            // 14
    "                        long amount) {\n",          // 15
    "        process(amount);\n",                        // 16
    "    }\n",                                           // 17
    "\n",                                                // 18
    "    enum Kind {\n",                                 // 19
    "        DEBIT, CREDIT;\n",                          // 20
    "    }\n",                                           // 21
    "}\n",                                               // 22
);

#[allow(dead_code)]
pub fn decl(
    name: &str,
    kind: DeclarationKind,
    begin_line: usize,
    end_line: usize,
    begin_column: usize,
) -> DeclarationNode {
    DeclarationNode::new(
        name,
        kind,
        SourceRange::new(begin_line, end_line, begin_column).unwrap(),
    )
}

#[allow(dead_code)]
pub fn account_forest() -> Forest {
    use DeclarationKind::*;
    vec![decl("Account", Type, 3, 22, 1).with_children(vec![
        decl("balance", Field, 4, 4, 5),
        decl("Account", Constructor, 6, 8, 5),
        decl("process", Method, 10, 12, 5),
        decl("process", Method, 14, 17, 5),
        decl("Kind", Type, 19, 21, 5).with_children(vec![
            decl("DEBIT", EnumConstant, 20, 20, 9),
            decl("CREDIT", EnumConstant, 20, 20, 16),
        ]),
    ])]
}

/// Stands in for a language plugin: returns a canned forest or failure.
#[allow(dead_code)]
pub struct MockParser {
    pub result: Result<Forest, ParseError>,
}

#[allow(dead_code)]
impl MockParser {
    pub fn returning(forest: Forest) -> Self {
        Self { result: Ok(forest) }
    }

    pub fn failing() -> Self {
        Self {
            result: Err(ParseError::Syntax { line: 1, column: 1 }),
        }
    }
}

impl DeclarationParser for MockParser {
    fn language(&self) -> &str {
        "mock"
    }

    fn supported_extensions(&self) -> &[&str] {
        &["java"]
    }

    fn parse(&self, _source: &str, _path: Option<&Path>) -> Result<Forest, ParseError> {
        self.result.clone()
    }
}
