//! Dispatcher error types.

use thiserror::Error;

/// Errors surfaced by the dispatcher and the event envelope.
///
/// None of these are fatal. The boolean dispatcher operations fold them into
/// `false`; the `try_` variants hand them back to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EventError {
    /// A channel already exists for the event type.
    #[error("event type already registered: {event_type}")]
    DuplicateRegistration {
        /// Name of the event type.
        event_type: &'static str,
    },

    /// No channel exists for the event type.
    #[error("event type not registered: {event_type}")]
    UnregisteredEvent {
        /// Name of the event type.
        event_type: &'static str,
    },

    /// An envelope was unwrapped as the wrong type.
    #[error("type mismatch: expected {expected}, envelope holds {actual}")]
    TypeMismatch {
        /// Type requested by the caller.
        expected: &'static str,
        /// Type actually carried by the envelope.
        actual: &'static str,
    },
}

/// Result type for dispatcher operations.
pub type EventResult<T> = Result<T, EventError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = EventError::TypeMismatch {
            expected: "u32",
            actual: "alloc::string::String",
        };
        assert_eq!(
            err.to_string(),
            "type mismatch: expected u32, envelope holds alloc::string::String"
        );

        let err = EventError::UnregisteredEvent { event_type: "Ping" };
        assert_eq!(err.to_string(), "event type not registered: Ping");
    }
}
