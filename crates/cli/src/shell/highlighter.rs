use declscope_core::view::SourceView;
use nu_ansi_term::{Color, Style};
use reedline::{Highlighter, StyledText};
use std::sync::Arc;

pub struct DeclscopeHighlighter {
    commands: Vec<String>,
    view: Arc<SourceView>,
}

impl DeclscopeHighlighter {
    pub fn new(commands: Vec<String>, view: Arc<SourceView>) -> Self {
        Self { commands, view }
    }
}

impl Highlighter for DeclscopeHighlighter {
    fn highlight(&self, line: &str, _cursor: usize) -> StyledText {
        let mut styled_text = StyledText::new();
        let mut current_pos = 0;

        for word in line.split_inclusive(char::is_whitespace) {
            let trimmed = word.trim();
            let style = if trimmed.is_empty() {
                Style::new()
            } else if line[..current_pos].trim().is_empty() {
                if self.commands.iter().any(|c| c == trimmed) {
                    Style::new().fg(Color::LightGreen).bold()
                } else {
                    Style::new()
                }
            } else if trimmed.starts_with('-') {
                Style::new().fg(Color::Cyan)
            } else if self.view.lookup(trimmed).is_some() {
                // Names that resolve to a declaration rather than free text
                Style::new().fg(Color::Yellow)
            } else {
                Style::new()
            };

            styled_text.push((style, word.to_string()));
            current_pos += word.len();
        }

        styled_text
    }
}
