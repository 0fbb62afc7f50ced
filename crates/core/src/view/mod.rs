//! One open source file: its rendered buffer, the published declaration
//! model and the navigation entry points the UI calls.

mod slot;
mod status;

pub use slot::{ModelSlot, Ticket};
pub use status::{StatusEvent, StatusSender};

use crate::config::ViewerConfig;
use crate::error::{DeclscopeError, Result};
use crate::index::{PrefixIndex, SourceIndexer};
use crate::locate::{
    DeclarationLocator, NavigationTarget, Notification, Outline, OutlinePath, SearchOptions,
    StringBuffer, TextBuffer,
};
use crate::model::{DeclRef, SourceModel};
use crate::parser::{DeclarationParser, ParseError};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};
use std::time::Instant;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

/// Everything derived from one parse, published as a unit.
#[derive(Debug)]
pub struct LoadedSource {
    pub model: SourceModel,
    pub outline: Outline,
}

/// Owned form of [`NavigationTarget`] for callers outside the view.
#[derive(Debug, Clone)]
pub enum NavigationRequest {
    Node(DeclRef),
    Key(String),
}

pub struct SourceView<B = StringBuffer> {
    path: PathBuf,
    file_name: String,
    /// Single writer. Held for the whole of a navigation request, which
    /// queues concurrent requests on the same file.
    buffer: Mutex<B>,
    loaded: ModelSlot<LoadedSource>,
    completions: RwLock<PrefixIndex>,
    selected: Mutex<Option<OutlinePath>>,
    options: SearchOptions,
    status: Option<StatusSender>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl SourceView<StringBuffer> {
    /// Reads `path`, then parses and indexes it in the background. Resolves
    /// once the model is published. An unreadable file fails with
    /// [`DeclscopeError::Parsing`].
    pub async fn open(
        path: impl Into<PathBuf>,
        parser: Arc<dyn DeclarationParser>,
        config: &ViewerConfig,
        status: Option<StatusSender>,
    ) -> Result<Arc<Self>> {
        let path = path.into();
        if let Some(tx) = &status {
            let _ = tx.send(StatusEvent::Loading(display_name(&path)));
        }
        let text = tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| ParseError::Read(format!("{}: {}", path.display(), e)))?;
        let view = Arc::new(Self::new(path, StringBuffer::new(text), config.search, status));
        view.load(parser).await?;
        Ok(view)
    }
}

impl<B: TextBuffer + Send + 'static> SourceView<B> {
    pub fn new(
        path: PathBuf,
        buffer: B,
        options: SearchOptions,
        status: Option<StatusSender>,
    ) -> Self {
        Self {
            file_name: display_name(&path),
            path,
            buffer: Mutex::new(buffer),
            loaded: ModelSlot::new(),
            completions: RwLock::new(PrefixIndex::new()),
            selected: Mutex::new(None),
            options,
            status,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn options(&self) -> SearchOptions {
        self.options
    }

    /// Parses the current buffer text on a blocking worker and publishes
    /// the result. The task yields `false` when the result was discarded
    /// because the view closed or a newer load started.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn_load(self: &Arc<Self>, parser: Arc<dyn DeclarationParser>) -> JoinHandle<bool> {
        let view = Arc::clone(self);
        let ticket = self.loaded.begin();
        let source = self.with_buffer(|b| b.text().to_string());

        tokio::spawn(async move {
            view.emit(StatusEvent::Parsing(view.file_name.clone()));
            let start = Instant::now();
            let path = view.path.clone();

            let built = tokio::task::spawn_blocking(move || {
                let model = SourceIndexer::build(parser.as_ref(), &source, Some(&path));
                let outline = Outline::from_model(&model);
                LoadedSource { model, outline }
            })
            .await;

            let loaded = match built {
                Ok(loaded) => loaded,
                Err(e) => {
                    error!("Indexing task for {} failed: {}", view.file_name, e);
                    return false;
                }
            };

            if view.loaded.is_closed() {
                debug!("View for {} closed, discarding parse result", view.file_name);
                return false;
            }

            let declarations = loaded.model.declaration_count();
            let names = loaded.model.all_names().to_vec();

            if !view.loaded.publish(ticket, loaded) {
                debug!("Discarding superseded parse of {}", view.file_name);
                return false;
            }
            view.completions
                .write()
                .unwrap_or_else(PoisonError::into_inner)
                .extend(names);

            let elapsed = start.elapsed();
            info!(
                "Parsed {} in {:.2?}: {} declarations",
                view.file_name, elapsed, declarations
            );
            view.emit(StatusEvent::Parsed {
                file: view.file_name.clone(),
                declarations,
                elapsed,
            });
            true
        })
    }

    /// Loads and waits for the result. Returns whether it was published.
    pub async fn load(self: &Arc<Self>, parser: Arc<dyn DeclarationParser>) -> Result<bool> {
        self.spawn_load(parser)
            .await
            .map_err(|e| DeclscopeError::Internal(e.to_string()))
    }

    /// The published model and outline, if indexing has completed.
    pub fn loaded(&self) -> Option<Arc<LoadedSource>> {
        self.loaded.snapshot()
    }

    pub fn lookup(&self, name: &str) -> Option<DeclRef> {
        self.loaded()?.model.lookup(name).cloned()
    }

    pub fn all_names(&self) -> Vec<String> {
        self.loaded()
            .map(|l| l.model.all_names().to_vec())
            .unwrap_or_default()
    }

    pub fn autocomplete_prefix(&self, prefix: &str) -> Vec<String> {
        self.completions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .complete(prefix)
    }

    /// Seeds autocomplete with words from elsewhere, e.g. another file.
    pub fn add_completion_words<S: AsRef<str>>(&self, words: impl IntoIterator<Item = S>) {
        self.completions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .extend(words);
    }

    pub fn navigate_to(&self, request: NavigationRequest) -> Notification {
        let mut buffer = lock(&self.buffer);
        let loaded = self.loaded();
        let empty = SourceModel::empty();
        let model = loaded.as_deref().map(|l| &l.model).unwrap_or(&empty);

        let locator = DeclarationLocator::new(model, self.options);
        let target = match &request {
            NavigationRequest::Node(node) => NavigationTarget::Node(node.as_ref()),
            NavigationRequest::Key(key) => NavigationTarget::Key(key.as_str()),
        };
        let notification = locator.navigate_to(&mut *buffer, target);
        self.report(&notification);
        notification
    }

    /// Highlights the file's top-level declaration.
    pub fn highlight_enclosing(&self) -> Notification {
        let mut buffer = lock(&self.buffer);
        let notification = match self.loaded() {
            Some(loaded) => {
                DeclarationLocator::new(&loaded.model, self.options)
                    .highlight_enclosing(&mut *buffer)
            }
            None => Notification::NotFound(String::new()),
        };
        self.report(&notification);
        notification
    }

    /// Finds an outline node by exact label, selects it, and searches the
    /// buffer for the label.
    pub fn search_outline(&self, label: &str) -> Notification {
        let mut buffer = lock(&self.buffer);
        let Some(loaded) = self.loaded() else {
            return Notification::NotFound(label.to_string());
        };

        let locator = DeclarationLocator::new(&loaded.model, self.options);
        let (path, notification) = locator.search_outline(&mut *buffer, &loaded.outline, label);
        if let Some(path) = path {
            *lock(&self.selected) = Some(path);
        }
        self.report(&notification);
        notification
    }

    pub fn selected_outline_path(&self) -> Option<OutlinePath> {
        lock(&self.selected).clone()
    }

    /// Read access to the buffer for rendering.
    pub fn with_buffer<R>(&self, f: impl FnOnce(&B) -> R) -> R {
        let buffer = lock(&self.buffer);
        f(&*buffer)
    }

    /// Discards the model. Any parse still running is dropped when it ends.
    pub fn close(&self) {
        self.loaded.close();
        debug!("Closed view for {}", self.file_name);
    }

    pub fn is_closed(&self) -> bool {
        self.loaded.is_closed()
    }

    fn report(&self, notification: &Notification) {
        match notification {
            Notification::Found(_) => {}
            Notification::NotFound(text) => self.emit(StatusEvent::NothingFound(text.clone())),
            Notification::SearchError(message) => {
                self.emit(StatusEvent::RegexError(message.clone()))
            }
        }
    }

    fn emit(&self, event: StatusEvent) {
        if let Some(tx) = &self.status {
            let _ = tx.send(event);
        }
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}
