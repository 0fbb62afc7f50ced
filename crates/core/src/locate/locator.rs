use super::buffer::{Span, TextBuffer};
use super::outline::{Outline, OutlinePath};
use super::search::{SearchOptions, SearchQuery};
use super::signature::extract_signature;
use crate::model::{DeclarationNode, SourceModel};
use tracing::{debug, warn};

/// Outcome of one navigation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    /// The span now selected in the buffer.
    Found(Span),
    /// Nothing matched; carries the text that was searched for.
    NotFound(String),
    /// The search pattern did not compile.
    SearchError(String),
}

impl Notification {
    pub fn is_found(&self) -> bool {
        matches!(self, Notification::Found(_))
    }
}

/// What the user asked to navigate to.
#[derive(Debug, Clone, Copy)]
pub enum NavigationTarget<'a> {
    /// A node picked from the outline; resolved by identity.
    Node(&'a DeclarationNode),
    /// A typed name, resolved through the name index.
    Key(&'a str),
}

enum Phase<'a> {
    Resolve(&'a str),
    ExtractSignature(&'a DeclarationNode),
    TextSearch {
        text: String,
        options: SearchOptions,
        origin: Option<usize>,
    },
    Done(Notification),
}

/// Turns declarations and free-text keys into selected spans.
///
/// The locator is stateless; cursor and selection live in the buffer it is
/// handed. Callers serialize requests per buffer.
pub struct DeclarationLocator<'m> {
    model: &'m SourceModel,
    options: SearchOptions,
}

impl<'m> DeclarationLocator<'m> {
    /// `options` apply to free-text searches; signatures are always
    /// matched literally.
    pub fn new(model: &'m SourceModel, options: SearchOptions) -> Self {
        Self { model, options }
    }

    pub fn navigate_to<B: TextBuffer + ?Sized>(
        &self,
        buffer: &mut B,
        target: NavigationTarget<'_>,
    ) -> Notification {
        let mut phase = match target {
            NavigationTarget::Node(node) => Phase::ExtractSignature(node),
            NavigationTarget::Key(key) => Phase::Resolve(key),
        };

        loop {
            phase = match phase {
                Phase::Resolve(key) => match self.model.lookup(key) {
                    Some(node) => Phase::ExtractSignature(node.as_ref()),
                    None => Phase::TextSearch {
                        text: key.to_string(),
                        options: self.options,
                        origin: None,
                    },
                },
                Phase::ExtractSignature(node) => Self::signature_phase(&*buffer, node),
                Phase::TextSearch {
                    text,
                    options,
                    origin,
                } => Phase::Done(search_from(&mut *buffer, &text, &options, origin)),
                Phase::Done(notification) => return notification,
            };
        }
    }

    /// Highlights the file's top-level declaration.
    pub fn highlight_enclosing<B: TextBuffer + ?Sized>(&self, buffer: &mut B) -> Notification {
        match self.model.root() {
            Some(root) => self.navigate_to(buffer, NavigationTarget::Node(root.as_ref())),
            None => Notification::NotFound(String::new()),
        }
    }

    /// Searches the outline breadth-first for a node labelled exactly
    /// `label`, then searches the buffer for the label text.
    ///
    /// Returns the matched outline path alongside the notification so the
    /// caller can reflect the selection.
    pub fn search_outline<B: TextBuffer + ?Sized>(
        &self,
        buffer: &mut B,
        outline: &Outline,
        label: &str,
    ) -> (Option<OutlinePath>, Notification) {
        if label.is_empty() {
            return (None, Notification::NotFound(String::new()));
        }
        match outline.find_label(label) {
            Some(path) => {
                let notification = find_text(buffer, label, &self.options);
                (Some(path), notification)
            }
            None => {
                debug!("No outline node labelled '{}'", label);
                (None, Notification::NotFound(label.to_string()))
            }
        }
    }

    /// The signature search starts at the declaration's own offset rather
    /// than the caret, so a signature repeated earlier in the file still
    /// resolves to this node. The usual wrap pass follows.
    fn signature_phase<'a, B: TextBuffer + ?Sized>(
        buffer: &B,
        node: &'a DeclarationNode,
    ) -> Phase<'a> {
        match extract_signature(buffer, &node.range) {
            Ok(signature) if !signature.needle().is_empty() => Phase::TextSearch {
                text: signature.needle().to_string(),
                options: SearchOptions::literal(),
                origin: Some(signature.start),
            },
            Ok(_) => {
                warn!("Empty signature for '{}' at {}", node.name, node.range);
                Phase::Done(Notification::NotFound(node.name.clone()))
            }
            Err(e) => {
                warn!(
                    "Bad location for '{}' at {}: {}",
                    node.name, node.range, e
                );
                Phase::Done(Notification::NotFound(node.name.clone()))
            }
        }
    }
}

/// Searches forward from the caret, wrapping to the start of the buffer once.
///
/// On success the match is selected with the caret at its start. On
/// failure the caret and selection are left exactly as they were.
pub fn find_text<B: TextBuffer + ?Sized>(
    buffer: &mut B,
    text: &str,
    options: &SearchOptions,
) -> Notification {
    search_from(buffer, text, options, None)
}

/// Like [`find_text`], but the forward pass starts at `origin` instead of
/// the caret when one is given.
fn search_from<B: TextBuffer + ?Sized>(
    buffer: &mut B,
    text: &str,
    options: &SearchOptions,
    origin: Option<usize>,
) -> Notification {
    let query = match SearchQuery::new(text, options) {
        Ok(query) => query,
        Err(e) => {
            debug!("Search syntax error for '{}': {}", text, e);
            return Notification::SearchError(e.to_string());
        }
    };

    let start = origin.unwrap_or_else(|| buffer.caret()).min(buffer.len());
    let found = query
        .find_from(buffer.text(), start)
        .or_else(|| query.find_from(buffer.text(), 0));

    let Some(span) = found else {
        debug!("Nothing found for '{}'", text);
        return Notification::NotFound(text.to_string());
    };

    match buffer.select(span) {
        Ok(()) => Notification::Found(span),
        Err(e) => {
            warn!("Could not select {}: {}", span, e);
            Notification::NotFound(text.to_string())
        }
    }
}
