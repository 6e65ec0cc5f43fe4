use tokio::sync::watch;

/// Cooperative shutdown signal for the poll loop. Cloneable; checked at
/// every suspension point instead of a global mutable flag.
#[derive(Clone)]
pub struct ShutdownToken {
    receiver: watch::Receiver<bool>,
}

pub struct ShutdownTrigger {
    sender: watch::Sender<bool>,
}

pub fn shutdown_channel() -> (ShutdownTrigger, ShutdownToken) {
    let (sender, receiver) = watch::channel(false);
    (ShutdownTrigger { sender }, ShutdownToken { receiver })
}

impl ShutdownTrigger {
    pub fn trigger(&self) {
        // Receivers may already be gone during teardown
        let _ = self.sender.send(true);
    }
}

impl ShutdownToken {
    pub fn is_shutdown(&self) -> bool {
        *self.receiver.borrow()
    }

    /// Resolve once shutdown is triggered. Intended for `tokio::select!`
    /// arms racing against sleeps and receives.
    pub async fn cancelled(mut self) {
        while !*self.receiver.borrow() {
            if self.receiver.changed().await.is_err() {
                // Trigger dropped without firing; treat as shutdown
                return;
            }
        }
    }
}
