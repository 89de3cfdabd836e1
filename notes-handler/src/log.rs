//! Failure log side-channel
//!
//! The wrapper reports each failure through an [`ErrorLog`] it was built
//! with, so tests can observe emissions without a global subscriber.

use std::sync::{Arc, Mutex};

/// Sink receiving one message per failed invocation
pub trait ErrorLog: Send + Sync {
    fn error(&self, message: &str);
}

impl<F> ErrorLog for F
where
    F: Fn(&str) + Send + Sync,
{
    fn error(&self, message: &str) {
        self(message)
    }
}

/// Forwards failures to `tracing` at error level
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLog;

impl ErrorLog for TracingLog {
    fn error(&self, message: &str) {
        tracing::error!("{}", message);
    }
}

/// Keeps every message in memory. Clones share the same buffer.
#[derive(Debug, Default, Clone)]
pub struct MemoryLog {
    messages: Arc<Mutex<Vec<String>>>,
}

impl MemoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the messages emitted so far
    pub fn messages(&self) -> Vec<String> {
        match self.messages.lock() {
            Ok(messages) => messages.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl ErrorLog for MemoryLog {
    fn error(&self, message: &str) {
        match self.messages.lock() {
            Ok(mut messages) => messages.push(message.to_string()),
            Err(poisoned) => poisoned.into_inner().push(message.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn memory_log_clones_share_messages() {
        let log = MemoryLog::new();
        let handle = log.clone();
        handle.error("first");
        log.error("second");
        assert_eq!(log.messages(), vec!["first", "second"]);
    }

    #[test]
    fn closures_are_logs() {
        let count = AtomicUsize::new(0);
        let log = |_: &str| {
            count.fetch_add(1, Ordering::SeqCst);
        };
        log.error("boom");
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }
}
