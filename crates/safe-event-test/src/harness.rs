//! Invocation recording and logging setup for tests.

use std::sync::{Arc, Mutex, Once, PoisonError};

/// Thread-safe, ordered log of listener invocations.
///
/// Clones share the same log.
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    calls: Arc<Mutex<Vec<String>>>,
}

impl Recorder {
    /// Create an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry.
    pub fn record(&self, entry: impl Into<String>) {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(entry.into());
    }

    /// Build a typed listener that records `label`, or `label:detail` when
    /// `describe` returns a non-empty string.
    pub fn typed<E, D>(&self, label: &'static str, describe: D) -> impl Fn(&E) + Send + Sync + 'static
    where
        E: ?Sized + 'static,
        D: Fn(&E) -> String + Send + Sync + 'static,
    {
        let recorder = self.clone();
        move |event: &E| {
            let detail = describe(event);
            if detail.is_empty() {
                recorder.record(label);
            } else {
                recorder.record(format!("{label}:{detail}"));
            }
        }
    }

    /// Build a callback that records `label` each time it is called.
    pub fn marker(&self, label: &'static str) -> impl Fn() + Send + Sync + 'static {
        let recorder = self.clone();
        move || recorder.record(label)
    }

    /// Snapshot of every entry so far, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of entries recorded.
    #[must_use]
    pub fn len(&self) -> usize {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Check whether nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Forget every entry.
    pub fn clear(&self) {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

/// Install a test-friendly `tracing` subscriber once per process.
///
/// Honors `RUST_LOG`; defaults to `safe_event=trace`. Output goes through the
/// libtest capture so it only shows for failing tests.
pub fn init_test_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("safe_event=trace"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}
