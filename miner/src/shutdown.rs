//! Graceful shutdown for the miner.
//!
//! Listens for SIGINT/SIGTERM and broadcasts a shutdown signal via a
//! `tokio::sync::broadcast` channel. The participation loop polls a
//! [`ShutdownListener`] at the top of every tick; in-flight tasks always
//! run to completion before the signal is observed.

use tokio::signal;
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::TryRecvError;

/// Coordinates graceful shutdown.
pub struct ShutdownController {
    tx: broadcast::Sender<()>,
}

impl ShutdownController {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    /// Get a listener the loop can poll without blocking.
    pub fn listener(&self) -> ShutdownListener {
        ShutdownListener {
            rx: self.tx.subscribe(),
            triggered: false,
        }
    }

    /// Trigger shutdown programmatically.
    pub fn shutdown(&self) {
        let _ = self.tx.send(());
    }

    /// Wait for SIGTERM or SIGINT, then trigger shutdown.
    pub async fn wait_for_signal(&self) {
        let ctrl_c = signal::ctrl_c();

        #[cfg(unix)]
        let terminate = async {
            signal::unix::signal(signal::unix::SignalKind::terminate())
                .expect("failed to install SIGTERM handler")
                .recv()
                .await;
        };

        #[cfg(not(unix))]
        let terminate = std::future::pending::<()>();

        tokio::select! {
            _ = ctrl_c => { tracing::info!("received SIGINT, shutting down"); }
            _ = terminate => { tracing::info!("received SIGTERM, shutting down"); }
        }

        self.shutdown();
    }
}

impl Default for ShutdownController {
    fn default() -> Self {
        Self::new()
    }
}

/// Non-blocking view of the shutdown signal, polled between ticks.
///
/// Once triggered it stays triggered; a dropped controller also counts as
/// a trigger so the loop cannot outlive its operator.
pub struct ShutdownListener {
    rx: broadcast::Receiver<()>,
    triggered: bool,
}

impl ShutdownListener {
    /// Whether shutdown has been requested.
    pub fn is_triggered(&mut self) -> bool {
        if self.triggered {
            return true;
        }
        self.triggered = !matches!(self.rx.try_recv(), Err(TryRecvError::Empty));
        self.triggered
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn listener_starts_untriggered() {
        let controller = ShutdownController::new();
        let mut listener = controller.listener();
        assert!(!listener.is_triggered());
        assert!(!listener.is_triggered());
    }

    #[tokio::test]
    async fn programmatic_shutdown_triggers_listener() {
        let controller = ShutdownController::new();
        let mut listener = controller.listener();
        controller.shutdown();
        assert!(listener.is_triggered());
    }

    #[tokio::test]
    async fn trigger_latches() {
        let controller = ShutdownController::new();
        let mut listener = controller.listener();
        controller.shutdown();
        assert!(listener.is_triggered());
        assert!(listener.is_triggered(), "trigger must stay latched");
    }

    #[tokio::test]
    async fn dropped_controller_counts_as_trigger() {
        let controller = ShutdownController::new();
        let mut listener = controller.listener();
        drop(controller);
        assert!(listener.is_triggered());
    }

    #[tokio::test]
    async fn multiple_listeners_all_notified() {
        let controller = ShutdownController::new();
        let mut a = controller.listener();
        let mut b = controller.listener();
        controller.shutdown();
        assert!(a.is_triggered());
        assert!(b.is_triggered());
    }
}
