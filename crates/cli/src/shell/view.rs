use declscope_core::locate::OutlineNode;
use declscope_core::model::SourceRange;
use tabled::{Table, Tabled, settings::Style};

/// One outline entry as a table row.
#[derive(Tabled)]
pub struct OutlineRow {
    pub kind: String,
    pub name: String,
    pub lines: String,
}

impl OutlineRow {
    pub fn from_node(node: &OutlineNode, depth: usize) -> Self {
        let name = if node.kind().is_container() {
            format!("{}/", node.label)
        } else {
            node.label.clone()
        };
        Self {
            kind: node.kind().to_string(),
            name: format!("{}{}", "  ".repeat(depth), name),
            lines: format_lines(&node.declaration.range),
        }
    }
}

fn format_lines(range: &SourceRange) -> String {
    if range.begin_line == range.end_line {
        range.begin_line.to_string()
    } else {
        format!("{}-{}", range.begin_line, range.end_line)
    }
}

/// Indented table of `roots` and everything below them.
pub fn outline_table(roots: &[OutlineNode]) -> String {
    let rows: Vec<OutlineRow> = roots
        .iter()
        .flat_map(OutlineNode::descendants)
        .map(|(depth, node)| OutlineRow::from_node(node, depth))
        .collect();

    if rows.is_empty() {
        return "NO DECLARATIONS FOUND".to_string();
    }
    Table::new(&rows).with(Style::psql()).to_string()
}
