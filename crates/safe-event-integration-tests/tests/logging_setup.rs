//! Global subscriber installation.
//!
//! Kept in its own test binary: installing the global subscriber is a
//! process-wide, one-shot operation.

use safe_event::Dispatcher;
use safe_event_telemetry::{LogConfig, TelemetryError, setup_default_logging, setup_logging};
use safe_event_test::Ping;

#[test]
fn test_setup_logging_installs_once() {
    let config = LogConfig::new("debug")
        .without_ansi()
        .with_directive("safe_event=trace");
    setup_logging(&config).unwrap();

    // The installed subscriber receives dispatcher events without issue.
    let dispatcher = Dispatcher::new();
    dispatcher.subscribe(|_: &Ping| {});
    assert!(dispatcher.publish(&Ping { id: 1 }));

    assert!(matches!(
        setup_default_logging(),
        Err(TelemetryError::InitError(_))
    ));
    assert!(matches!(
        setup_logging(&LogConfig::default().without_ansi()),
        Err(TelemetryError::InitError(_))
    ));
}
