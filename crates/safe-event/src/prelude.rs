//! Prelude module - commonly used types for convenient import.
//!
//! Use `use safe_event::prelude::*;` to import all essential types.

// Dispatcher
pub use crate::{Dispatcher, DispatcherConfig};

// Events
pub use crate::{EventEnvelope, EventError, EventResult};
