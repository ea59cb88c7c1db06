//! Safe Event Test - Shared test utilities for the dispatcher crates.
//!
//! This crate has no dependency on `safe-event` itself, so it can be used as
//! a dev-dependency of the dispatcher crate without pulling in a second copy
//! of its types.
//!
//! # Usage
//!
//! ```toml
//! [dev-dependencies]
//! safe-event-test.workspace = true
//! ```
//!
//! ```rust,ignore
//! use safe_event_test::{Ping, Recorder};
//!
//! let recorder = Recorder::new();
//! dispatcher.subscribe(recorder.typed("ping", |p: &Ping| p.id.to_string()));
//! dispatcher.publish(&Ping { id: 7 });
//! assert_eq!(recorder.calls(), vec!["ping:7"]);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]

pub mod fixtures;
pub mod harness;

pub use fixtures::*;
pub use harness::*;
