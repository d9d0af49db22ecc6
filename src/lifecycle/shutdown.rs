//! Shutdown coordination for the service.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::broadcast;

/// Two-phase stop signal shared by the server and the signal handler.
///
/// Shutdown happens in two steps. `begin_draining` flips readiness so the
/// orchestrator stops routing traffic here; `trigger` then tells every
/// subscriber (the HTTP server) to stop accepting and drain.
#[derive(Debug, Clone)]
pub struct Shutdown {
    /// Fires once when the listener should close.
    tx: broadcast::Sender<()>,
    draining: Arc<AtomicBool>,
}

impl Shutdown {
    /// Coordinator in the serving (not draining) state.
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self {
            tx,
            draining: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Receiver that resolves on `trigger`.
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Mark the service as shutting down without stopping it.
    pub fn begin_draining(&self) {
        self.draining.store(true, Ordering::SeqCst);
    }

    pub fn is_draining(&self) -> bool {
        self.draining.load(Ordering::SeqCst)
    }

    /// Trigger the shutdown signal. Implies draining.
    pub fn trigger(&self) {
        self.begin_draining();
        let _ = self.tx.send(());
    }

    /// Number of live receivers still waiting to stop.
    pub fn receiver_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}
