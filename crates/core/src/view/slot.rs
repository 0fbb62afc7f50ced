use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

/// Identifies one build. Only the most recent ticket may publish.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// Build-then-publish handoff for a value produced off the foreground.
///
/// Readers see either nothing or a complete value, never a partial one.
/// A build that was superseded by a newer [`ModelSlot::begin`] or by
/// [`ModelSlot::close`] is dropped on completion.
#[derive(Debug)]
pub struct ModelSlot<T> {
    current: RwLock<Option<Arc<T>>>,
    epoch: AtomicU64,
    closed: AtomicBool,
}

impl<T> Default for ModelSlot<T> {
    fn default() -> Self {
        Self {
            current: RwLock::new(None),
            epoch: AtomicU64::new(0),
            closed: AtomicBool::new(false),
        }
    }
}

impl<T> ModelSlot<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a build, invalidating any build still in flight.
    pub fn begin(&self) -> Ticket {
        Ticket(self.epoch.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Installs `value` if `ticket` is still current. Returns whether the
    /// value became visible.
    pub fn publish(&self, ticket: Ticket, value: T) -> bool {
        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        if self.closed.load(Ordering::SeqCst) || self.epoch.load(Ordering::SeqCst) != ticket.0 {
            return false;
        }
        *current = Some(Arc::new(value));
        true
    }

    pub fn snapshot(&self) -> Option<Arc<T>> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Drops the published value and refuses every later publish.
    pub fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
        self.epoch.fetch_add(1, Ordering::SeqCst);
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}
