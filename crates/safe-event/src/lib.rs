//! Safe Event - a type-safe, in-process publish/subscribe dispatcher.
//!
//! This crate provides:
//! - A [`Dispatcher`] that keeps one listener channel per event *type*
//! - Typed listeners that receive `&E` for the event type they subscribed to
//! - Wildcard listeners that receive every event through an [`EventEnvelope`]
//! - The [`TypeRegistry`] the dispatcher stores its channels in
//!
//! # Architecture
//!
//! Events are plain Rust values. Publishing `&E` looks up the
//! [`EventChannel<E>`] for `E` and runs its listeners synchronously, in
//! subscription order, on the calling thread. Wildcard listeners run next,
//! each receiving an envelope that can be checked with
//! [`EventEnvelope::is`] and recovered with [`EventEnvelope::unwrap`].
//!
//! A single lock guards the dispatcher's structure. It is never held while a
//! listener runs, so listeners may subscribe, register, or publish.
//!
//! # Example
//!
//! ```rust
//! use safe_event::{Dispatcher, EventError};
//!
//! #[derive(Debug)]
//! struct Hello;
//!
//! let dispatcher = Dispatcher::new();
//! dispatcher.register_event::<Hello>();
//!
//! dispatcher.subscribe(|_: &Hello| println!("typed listener"));
//! dispatcher.subscribe_any(|event| {
//!     if event.is::<Hello>() {
//!         println!("wildcard listener saw {}", event.type_name());
//!     }
//! });
//!
//! assert!(dispatcher.publish(&Hello));
//! assert!(matches!(
//!     dispatcher.try_publish(&1u8),
//!     Err(EventError::UnregisteredEvent { .. })
//! ));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod prelude;

mod channel;
mod config;
mod dispatcher;
mod envelope;
mod error;
mod registry;

pub use channel::{EventChannel, Listener};
pub use config::{DEFAULT_DISPATCHER_NAME, DispatcherConfig};
pub use dispatcher::{Dispatcher, WildcardListener};
pub use envelope::{EventEnvelope, into, is};
pub use error::{EventError, EventResult};
pub use registry::TypeRegistry;
