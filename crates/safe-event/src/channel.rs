//! Per-event-type listener list.

use std::any::{Any, type_name};
use std::fmt;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;

use tracing::warn;

/// A typed listener for events of type `E`.
pub type Listener<E> = Arc<dyn Fn(&E) + Send + Sync>;

/// Ordered listeners for one event type.
///
/// The listener list is shared copy-on-write: cloning a channel is an
/// `Arc` bump and yields a snapshot that later [`add_listener`] calls on the
/// original do not affect. The dispatcher relies on this to invoke listeners
/// without holding its lock.
///
/// [`add_listener`]: EventChannel::add_listener
pub struct EventChannel<E> {
    listeners: Arc<Vec<Listener<E>>>,
}

impl<E> Default for EventChannel<E> {
    fn default() -> Self {
        Self {
            listeners: Arc::new(Vec::new()),
        }
    }
}

impl<E> Clone for EventChannel<E> {
    fn clone(&self) -> Self {
        Self {
            listeners: Arc::clone(&self.listeners),
        }
    }
}

impl<E> fmt::Debug for EventChannel<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventChannel")
            .field("event_type", &type_name::<E>())
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl<E> EventChannel<E> {
    /// Create a channel with no listeners.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a listener. Listeners run in the order they were added.
    pub fn add_listener<F>(&mut self, listener: F)
    where
        F: Fn(&E) + Send + Sync + 'static,
    {
        self.push(Arc::new(listener));
    }

    /// Append an already shared listener.
    pub fn push(&mut self, listener: Listener<E>) {
        Arc::make_mut(&mut self.listeners).push(listener);
    }

    /// Invoke every listener with `event`, in subscription order.
    ///
    /// A panicking listener unwinds out of this call; see the dispatcher's
    /// `isolate_panics` setting for the guarded variant.
    pub fn dispatch(&self, event: &E) {
        for listener in self.listeners.iter() {
            listener(event);
        }
    }

    /// Copy of the current listener list.
    #[must_use]
    pub fn listeners(&self) -> Vec<Listener<E>> {
        self.listeners.to_vec()
    }

    /// Number of listeners.
    #[must_use]
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    /// Check whether the channel has no listeners.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl<E: 'static> EventChannel<E> {
    /// Invoke every listener, catching and logging panics so that one
    /// failing listener does not starve the rest.
    pub(crate) fn dispatch_isolated(&self, event: &E, dispatcher: &str) {
        for (index, listener) in self.listeners.iter().enumerate() {
            run_isolated(dispatcher, type_name::<E>(), index, || listener(event));
        }
    }
}

/// Run one listener call under `catch_unwind`.
pub(crate) fn run_isolated(dispatcher: &str, event_type: &str, index: usize, call: impl FnOnce()) {
    if let Err(payload) = catch_unwind(AssertUnwindSafe(call)) {
        warn!(
            dispatcher,
            event_type,
            listener = index,
            panic = panic_message(payload.as_ref()),
            "Listener panicked"
        );
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(msg) = payload.downcast_ref::<&'static str>() {
        msg
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.as_str()
    } else {
        "<non-string panic payload>"
    }
}
