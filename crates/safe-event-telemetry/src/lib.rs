//! Safe Event Telemetry - Logging setup for dispatcher applications.
//!
//! The dispatcher crate only emits `tracing` events; this crate installs a
//! subscriber that renders them.
//!
//! # Example
//!
//! ```rust,no_run
//! use safe_event_telemetry::{LogConfig, LogFormat, setup_logging};
//!
//! # fn main() -> Result<(), safe_event_telemetry::TelemetryError> {
//! let config = LogConfig::new("info")
//!     .with_format(LogFormat::Pretty)
//!     .with_directive("safe_event=trace");
//!
//! setup_logging(&config)?;
//! tracing::info!("logging ready");
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

mod error;
mod logging;

pub use error::{TelemetryError, TelemetryResult};
pub use logging::{LogConfig, LogFormat, LogTarget, setup_default_logging, setup_logging};
