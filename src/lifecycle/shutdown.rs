//! Shutdown coordination.
//!
//! The flag is a `watch` channel rather than a one-shot broadcast: a server
//! that subscribes after [`Shutdown::trigger`] still stops, and dropping the
//! coordinator counts as a trigger.

use tokio::sync::watch;

/// Owner side of the shutdown flag.
pub struct Shutdown {
    tx: watch::Sender<bool>,
}

/// Subscriber side, handed to [`HttpServer::run`](crate::HttpServer::run).
#[derive(Clone)]
pub struct ShutdownSignal {
    rx: watch::Receiver<bool>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(false);
        Self { tx }
    }

    pub fn subscribe(&self) -> ShutdownSignal {
        ShutdownSignal {
            rx: self.tx.subscribe(),
        }
    }

    /// Raise the flag. Idempotent.
    pub fn trigger(&self) {
        self.tx.send_replace(true);
    }

    pub fn is_triggered(&self) -> bool {
        *self.tx.borrow()
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

impl ShutdownSignal {
    /// Resolve once the flag is raised or the coordinator is gone.
    pub async fn triggered(mut self) {
        // Err means the sender was dropped; nothing can lower the flag after that.
        let _ = self.rx.wait_for(|raised| *raised).await;
    }
}
