use super::command::ShellCommand;
use declscope_core::view::SourceView;
use reedline::{Completer, Suggestion};
use std::sync::Arc;

/// Maximum suggestions offered for one tab press
const MAX_SUGGESTIONS: usize = 50;

pub struct DeclscopeCompleter {
    pub commands: Vec<String>,
    pub view: Arc<SourceView>,
}

impl DeclscopeCompleter {
    pub fn new(commands: Vec<String>, view: Arc<SourceView>) -> Self {
        Self { commands, view }
    }
}

fn suggestion(value: String, description: Option<String>, start: usize, end: usize) -> Suggestion {
    Suggestion {
        value,
        description,
        style: None,
        extra: None,
        span: reedline::Span { start, end },
        append_whitespace: true,
        match_indices: None,
    }
}

impl Completer for DeclscopeCompleter {
    fn complete(&mut self, line: &str, pos: usize) -> Vec<Suggestion> {
        let line = &line[..pos.min(line.len())];
        let trimmed = line.trim_start();

        // 1. Command completion (at start of line)
        if !trimmed.contains(' ') {
            return self
                .commands
                .iter()
                .filter(|cmd| cmd.starts_with(trimmed))
                .map(|cmd| suggestion(cmd.clone(), None, pos - trimmed.len(), pos))
                .collect();
        }

        // 2. Declaration names from the prefix index
        let parts: Vec<&str> = trimmed.split_whitespace().collect();
        let Some(cmd) = parts.first() else {
            return vec![];
        };
        if !ShellCommand::takes_name(cmd) {
            return vec![];
        }

        let last_word = if line.ends_with(char::is_whitespace) {
            ""
        } else {
            parts.last().copied().unwrap_or("")
        };
        let span_start = pos - last_word.len();

        let mut suggestions: Vec<Suggestion> = self
            .view
            .autocomplete_prefix(last_word)
            .into_iter()
            .map(|name| {
                let kind = self.view.lookup(&name).map(|n| n.kind.to_string());
                suggestion(name, kind, span_start, pos)
            })
            .collect();

        suggestions.sort_by(|a, b| a.value.len().cmp(&b.value.len()).then(a.value.cmp(&b.value)));
        suggestions.truncate(MAX_SUGGESTIONS);
        suggestions
    }
}
