//! Listeners calling back into the dispatcher.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Weak};

use safe_event::{Dispatcher, DispatcherConfig};
use safe_event_test::{Ping, Pong, Recorder, Tick, init_test_logging};

#[test]
fn test_listener_registers_new_event_type() {
    init_test_logging();
    let dispatcher = Arc::new(Dispatcher::new());
    let weak: Weak<Dispatcher> = Arc::downgrade(&dispatcher);

    dispatcher.subscribe(move |_: &Ping| {
        if let Some(dispatcher) = weak.upgrade() {
            dispatcher.register_event::<Pong>();
        }
    });

    assert!(!dispatcher.is_registered::<Pong>());
    assert!(dispatcher.publish(&Ping { id: 1 }));
    assert!(dispatcher.is_registered::<Pong>());
}

#[test]
fn test_nested_publish_completes_before_outer_returns() {
    init_test_logging();
    let dispatcher = Arc::new(Dispatcher::new());
    let recorder = Recorder::new();

    let weak = Arc::downgrade(&dispatcher);
    let outer = recorder.clone();
    dispatcher.subscribe(move |ping: &Ping| {
        outer.record("ping:start");
        if let Some(dispatcher) = weak.upgrade() {
            dispatcher.publish(&Tick(u64::from(ping.id)));
        }
        outer.record("ping:end");
    });
    dispatcher.subscribe(recorder.typed("tick", |t: &Tick| t.0.to_string()));
    let any = recorder.clone();
    dispatcher.subscribe_any(move |envelope| any.record(format!("any:{}", envelope.is::<Ping>())));

    assert!(dispatcher.publish(&Ping { id: 9 }));
    assert_eq!(
        recorder.calls(),
        vec!["ping:start", "tick:9", "any:false", "ping:end", "any:true"]
    );
}

#[test]
fn test_wildcard_listener_subscribes_wildcard() {
    init_test_logging();
    let dispatcher = Arc::new(Dispatcher::new());
    let calls = Arc::new(AtomicUsize::new(0));
    dispatcher.register_event::<Pong>();

    let weak = Arc::downgrade(&dispatcher);
    let counter = Arc::clone(&calls);
    dispatcher.subscribe_any(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
        if let Some(dispatcher) = weak.upgrade() {
            dispatcher.subscribe_any(|_| {});
        }
    });

    dispatcher.publish(&Pong);
    assert_eq!(dispatcher.wildcard_count(), 2);
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    dispatcher.publish(&Pong);
    assert_eq!(dispatcher.wildcard_count(), 3);
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn test_listener_tears_down_its_dispatcher() {
    init_test_logging();
    let dispatcher = Arc::new(Dispatcher::new());
    let recorder = Recorder::new();

    let weak = Arc::downgrade(&dispatcher);
    dispatcher.subscribe(move |_: &Ping| {
        if let Some(dispatcher) = weak.upgrade() {
            dispatcher.teardown();
        }
    });
    dispatcher.subscribe(recorder.typed("second", |_: &Ping| String::new()));
    let after = recorder.marker("wildcard");
    dispatcher.subscribe_any(move |_| after());

    // The in-flight publish works from its snapshot.
    assert!(dispatcher.publish(&Ping { id: 1 }));
    assert_eq!(recorder.calls(), vec!["second", "wildcard"]);

    assert!(!dispatcher.publish(&Ping { id: 2 }));
    assert_eq!(dispatcher.event_type_count(), 0);
}

#[test]
fn test_reentrancy_with_panics_propagating() {
    init_test_logging();
    let dispatcher = Arc::new(Dispatcher::with_config(
        DispatcherConfig::new("strict").propagate_panics(),
    ));
    let count = Arc::new(AtomicUsize::new(0));

    let weak = Arc::downgrade(&dispatcher);
    let counter = Arc::clone(&count);
    dispatcher.subscribe(move |_: &Ping| {
        if let Some(dispatcher) = weak.upgrade() {
            let counter = Arc::clone(&counter);
            dispatcher.subscribe(move |_: &Pong| {
                counter.fetch_add(1, Ordering::SeqCst);
            });
        }
    });

    assert!(dispatcher.publish(&Ping { id: 1 }));
    assert!(dispatcher.publish(&Pong));
    assert_eq!(count.load(Ordering::SeqCst), 1);
}
