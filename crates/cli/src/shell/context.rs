use super::command::ShellCommand;
use super::view::outline_table;
use crate::render;
use declscope_core::locate::Notification;
use declscope_core::view::{NavigationRequest, SourceView, StatusEvent};
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedReceiver;

/// State the shell loop threads through every command.
pub struct ShellContext {
    pub view: Arc<SourceView>,
    context_lines: usize,
    status: UnboundedReceiver<StatusEvent>,
}

impl ShellContext {
    pub fn new(
        view: Arc<SourceView>,
        context_lines: usize,
        status: UnboundedReceiver<StatusEvent>,
    ) -> Self {
        Self {
            view,
            context_lines,
            status,
        }
    }

    /// Label of the outline entry last selected with `find`.
    pub fn selected_label(&self) -> Option<String> {
        let path = self.view.selected_outline_path()?;
        let loaded = self.view.loaded()?;
        loaded.outline.node(&path).map(|n| n.label.clone())
    }

    pub fn execute(&mut self, cmd: &ShellCommand) -> Result<String, Box<dyn std::error::Error>> {
        let output = match cmd {
            ShellCommand::Goto { key } => {
                let notification = self
                    .view
                    .navigate_to(NavigationRequest::Key(key.join(" ")));
                self.show(&notification)
            }
            ShellCommand::Find { label } => {
                let notification = self.view.search_outline(label);
                self.show(&notification)
            }
            ShellCommand::Top => {
                let notification = self.view.highlight_enclosing();
                self.show(&notification)
            }
            ShellCommand::Ls { label } => self.list(label.as_deref())?,
            ShellCommand::Complete { prefix } => self.view.autocomplete_prefix(prefix).join("\n"),
            ShellCommand::Clear => String::new(),
        };
        self.flush_status();
        Ok(output)
    }

    /// Prints pending status events (parse progress, failed searches).
    pub fn flush_status(&mut self) {
        render::drain_status(&mut self.status);
    }

    // Failures are reported through the status channel.
    fn show(&self, notification: &Notification) -> String {
        if !notification.is_found() {
            return String::new();
        }
        self.view.with_buffer(|buffer| {
            render::render_selection(buffer, self.context_lines, render::highlight_style())
        })
    }

    fn list(&self, label: Option<&str>) -> Result<String, Box<dyn std::error::Error>> {
        let loaded = self.view.loaded().ok_or("File is not indexed")?;
        let Some(label) = label else {
            return Ok(outline_table(loaded.outline.roots()));
        };
        let node = loaded
            .outline
            .find_label(label)
            .and_then(|path| loaded.outline.node(&path))
            .ok_or_else(|| format!("No outline entry labelled '{}'", label))?;
        Ok(outline_table(std::slice::from_ref(node)))
    }
}
