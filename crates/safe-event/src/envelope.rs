//! Type-erased view of a published event.

use std::any::{Any, TypeId, type_name};
use std::fmt;

use crate::error::{EventError, EventResult};

/// A borrowed, type-erased event handed to wildcard listeners.
///
/// The envelope only lives for the duration of the `publish` call that
/// built it. It remembers the concrete type of the event and will only hand
/// the value back as that exact type.
///
/// ```rust
/// use safe_event::EventEnvelope;
///
/// #[derive(Debug, PartialEq)]
/// struct Ping { id: u32 }
///
/// let ping = Ping { id: 7 };
/// let envelope = EventEnvelope::new(&ping);
///
/// assert!(envelope.is::<Ping>());
/// assert_eq!(envelope.unwrap::<Ping>().map(|p| p.id), Ok(7));
/// assert!(envelope.unwrap::<u32>().is_err());
/// ```
#[derive(Clone, Copy)]
pub struct EventEnvelope<'a> {
    value: &'a dyn Any,
    type_id: TypeId,
    type_name: &'static str,
}

impl<'a> EventEnvelope<'a> {
    /// Wrap a reference to `event`.
    #[must_use]
    pub fn new<T: Any>(event: &'a T) -> Self {
        Self {
            value: event,
            type_id: TypeId::of::<T>(),
            type_name: type_name::<T>(),
        }
    }

    /// Check whether the event is a `T`.
    #[must_use]
    pub fn is<T: Any>(&self) -> bool {
        self.type_id == TypeId::of::<T>()
    }

    /// Recover the event as a `T`.
    ///
    /// # Errors
    ///
    /// Returns [`EventError::TypeMismatch`] if the event is not a `T`.
    pub fn unwrap<T: Any>(&self) -> EventResult<&'a T> {
        self.value
            .downcast_ref::<T>()
            .ok_or(EventError::TypeMismatch {
                expected: type_name::<T>(),
                actual: self.type_name,
            })
    }

    /// Recover the event as a `T`, or `None` on mismatch.
    #[must_use]
    pub fn downcast_ref<T: Any>(&self) -> Option<&'a T> {
        self.value.downcast_ref::<T>()
    }

    /// Runtime identity of the wrapped event type.
    #[must_use]
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Name of the wrapped event type, for diagnostics.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }
}

impl fmt::Debug for EventEnvelope<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventEnvelope")
            .field("type_name", &self.type_name)
            .finish_non_exhaustive()
    }
}

/// Check whether `envelope` carries a `T`.
#[must_use]
pub fn is<T: Any>(envelope: &EventEnvelope<'_>) -> bool {
    envelope.is::<T>()
}

/// Recover the event inside `envelope` as a `T`.
///
/// # Errors
///
/// Returns [`EventError::TypeMismatch`] if the envelope does not carry a `T`.
pub fn into<'a, T: Any>(envelope: &EventEnvelope<'a>) -> EventResult<&'a T> {
    envelope.unwrap::<T>()
}
