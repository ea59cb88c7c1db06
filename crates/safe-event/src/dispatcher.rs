//! The dispatcher façade: registration, subscription, publication.

use std::any::type_name;
use std::fmt;
use std::mem;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, trace};

use crate::channel::{EventChannel, run_isolated};
use crate::config::DispatcherConfig;
use crate::envelope::EventEnvelope;
use crate::error::{EventError, EventResult};
use crate::registry::TypeRegistry;

/// A listener that receives every published event, type-erased.
pub type WildcardListener = Arc<dyn Fn(&EventEnvelope<'_>) + Send + Sync>;

/// Everything guarded by the dispatcher lock.
#[derive(Default)]
struct State {
    /// One `EventChannel<E>` per registered event type.
    channels: TypeRegistry,
    /// Copy-on-write so `publish` can snapshot it with an `Arc` bump.
    wildcard: Arc<Vec<WildcardListener>>,
}

/// Synchronous, type-keyed publish/subscribe dispatcher.
///
/// All operations take `&self`; share a dispatcher between threads by
/// wrapping it in an `Arc`. A single mutex serializes structural changes
/// (creating a channel, appending a listener). `publish` only holds it long
/// enough to snapshot the listener lists, then runs the listeners on the
/// calling thread with the lock released, so listeners may freely call back
/// into the dispatcher.
///
/// A listener added while a `publish` is in flight is not guaranteed to see
/// that event, but sees every later one.
///
/// **WARNING:** a listener that owns an `Arc` of its own dispatcher creates
/// a reference cycle and the dispatcher is never dropped. Capture a
/// `std::sync::Weak` instead.
///
/// ```rust
/// use safe_event::Dispatcher;
///
/// #[derive(Debug)]
/// struct Ping { id: u32 }
///
/// let dispatcher = Dispatcher::new();
/// assert!(dispatcher.register_event::<Ping>());
/// assert!(!dispatcher.register_event::<Ping>());
///
/// dispatcher.subscribe(|ping: &Ping| println!("typed ping {}", ping.id));
/// dispatcher.subscribe_any(|envelope| {
///     if let Ok(ping) = envelope.unwrap::<Ping>() {
///         println!("wildcard ping {}", ping.id);
///     }
/// });
///
/// assert!(dispatcher.publish(&Ping { id: 7 }));
/// assert!(!dispatcher.publish(&42u32));
/// ```
pub struct Dispatcher {
    state: Mutex<State>,
    config: DispatcherConfig,
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.lock();
        f.debug_struct("Dispatcher")
            .field("name", &self.config.name)
            .field("channels", &state.channels)
            .field("wildcard_listeners", &state.wildcard.len())
            .finish()
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Dispatcher {
    /// Create a dispatcher with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(DispatcherConfig::default())
    }

    /// Create a dispatcher with the given settings.
    #[must_use]
    pub fn with_config(config: DispatcherConfig) -> Self {
        Self {
            state: Mutex::new(State::default()),
            config,
        }
    }

    /// The settings this dispatcher was built with.
    #[must_use]
    pub fn config(&self) -> &DispatcherConfig {
        &self.config
    }

    /// Listeners never run under the lock, so a poisoned guard still
    /// protects consistent state.
    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Create the channel for `E`.
    ///
    /// Returns `false` without touching the existing channel if `E` is
    /// already registered.
    pub fn register_event<E: 'static>(&self) -> bool {
        self.try_register_event::<E>().is_ok()
    }

    /// Create the channel for `E`, reporting a duplicate as an error.
    ///
    /// # Errors
    ///
    /// Returns [`EventError::DuplicateRegistration`] if `E` already has a
    /// channel.
    pub fn try_register_event<E: 'static>(&self) -> EventResult<()> {
        let created = self.lock().channels.register_default::<EventChannel<E>>();

        if created {
            debug!(
                dispatcher = %self.config.name,
                event_type = type_name::<E>(),
                "Event type registered"
            );
            Ok(())
        } else {
            debug!(
                dispatcher = %self.config.name,
                event_type = type_name::<E>(),
                "Event type already registered"
            );
            Err(EventError::DuplicateRegistration {
                event_type: type_name::<E>(),
            })
        }
    }

    /// Append a typed listener for `E`, registering `E` first if needed.
    ///
    /// The existence check and the insert happen under one lock hold, so
    /// concurrent first subscriptions still create a single channel.
    pub fn subscribe<E, F>(&self, listener: F) -> bool
    where
        E: 'static,
        F: Fn(&E) + Send + Sync + 'static,
    {
        let (created, listeners) = {
            let mut state = self.lock();
            let created = state.channels.register_default::<EventChannel<E>>();
            let Some(channel) = state.channels.get_mut::<EventChannel<E>>() else {
                return false;
            };
            channel.add_listener(listener);
            (created, channel.len())
        };

        debug!(
            dispatcher = %self.config.name,
            event_type = type_name::<E>(),
            implicit_registration = created,
            listeners,
            "Listener subscribed"
        );
        true
    }

    /// Append a listener that receives every published event.
    ///
    /// Wildcard listeners do not depend on any event type being registered.
    pub fn subscribe_any<F>(&self, listener: F) -> bool
    where
        F: Fn(&EventEnvelope<'_>) + Send + Sync + 'static,
    {
        let listeners = {
            let mut state = self.lock();
            let wildcard = Arc::make_mut(&mut state.wildcard);
            wildcard.push(Arc::new(listener));
            wildcard.len()
        };

        debug!(
            dispatcher = %self.config.name,
            listeners,
            "Wildcard listener subscribed"
        );
        true
    }

    /// Publish `event` to the listeners of `E`, then to wildcard listeners.
    ///
    /// Returns `false` and calls nothing if `E` is not registered.
    pub fn publish<E: 'static>(&self, event: &E) -> bool {
        self.try_publish(event).is_ok()
    }

    /// Publish `event`, reporting an unregistered type as an error.
    ///
    /// Typed listeners run first, in subscription order; wildcard listeners
    /// run after all of them, also in subscription order, each receiving an
    /// [`EventEnvelope`] wrapping `event`. Every call completes before this
    /// returns.
    ///
    /// # Errors
    ///
    /// Returns [`EventError::UnregisteredEvent`] if `E` has no channel.
    pub fn try_publish<E: 'static>(&self, event: &E) -> EventResult<()> {
        let (channel, wildcard) = {
            let state = self.lock();
            let Some(channel) = state.channels.get::<EventChannel<E>>() else {
                trace!(
                    dispatcher = %self.config.name,
                    event_type = type_name::<E>(),
                    "Publish to unregistered event type"
                );
                return Err(EventError::UnregisteredEvent {
                    event_type: type_name::<E>(),
                });
            };
            (channel.clone(), Arc::clone(&state.wildcard))
        };

        trace!(
            dispatcher = %self.config.name,
            event_type = type_name::<E>(),
            listeners = channel.len(),
            wildcard_listeners = wildcard.len(),
            "Publishing event"
        );

        let name = self.config.name.as_str();
        if self.config.isolate_panics {
            channel.dispatch_isolated(event, name);
        } else {
            channel.dispatch(event);
        }

        if !wildcard.is_empty() {
            let envelope = EventEnvelope::new(event);
            for (index, listener) in wildcard.iter().enumerate() {
                if self.config.isolate_panics {
                    run_isolated(name, envelope.type_name(), index, || listener(&envelope));
                } else {
                    listener(&envelope);
                }
            }
        }

        Ok(())
    }

    /// Drop every channel and wildcard listener.
    ///
    /// Afterwards the dispatcher behaves as if freshly built. Listeners are
    /// dropped after the lock is released, so their destructors may use the
    /// dispatcher. Calling this repeatedly is harmless.
    pub fn teardown(&self) {
        let (channels, wildcard) = {
            let mut state = self.lock();
            (
                mem::take(&mut state.channels),
                mem::take(&mut state.wildcard),
            )
        };

        debug!(
            dispatcher = %self.config.name,
            event_types = channels.len(),
            wildcard_listeners = wildcard.len(),
            "Dispatcher torn down"
        );

        drop(channels);
        drop(wildcard);
    }

    /// Check whether `E` has a channel.
    #[must_use]
    pub fn is_registered<E: 'static>(&self) -> bool {
        self.lock().channels.exists::<EventChannel<E>>()
    }

    /// Number of typed listeners for `E`, or `None` if `E` is unregistered.
    #[must_use]
    pub fn listener_count<E: 'static>(&self) -> Option<usize> {
        self.lock()
            .channels
            .get::<EventChannel<E>>()
            .map(EventChannel::len)
    }

    /// Number of wildcard listeners.
    #[must_use]
    pub fn wildcard_count(&self) -> usize {
        self.lock().wildcard.len()
    }

    /// Number of registered event types.
    #[must_use]
    pub fn event_type_count(&self) -> usize {
        self.lock().channels.len()
    }
}
