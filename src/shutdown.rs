// Shutdown coordination module
// Broadcasts a single "shutting down" flag to background tasks over a watch channel

use tokio::sync::watch;

/// Owner side of the shutdown flag
#[derive(Debug)]
pub struct ShutdownSignal {
    tx: watch::Sender<bool>,
}

impl Default for ShutdownSignal {
    fn default() -> Self {
        Self::new()
    }
}

impl ShutdownSignal {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx }
    }

    /// Receiver for a background task; sees `true` once shutdown is signaled
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.tx.subscribe()
    }

    /// Signal that the bot is shutting down
    pub fn signal(&self) {
        self.tx.send_replace(true);
        crate::info!("Shutdown signaled");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shutdown_flag_transitions() {
        let shutdown = ShutdownSignal::new();
        let rx = shutdown.subscribe();
        assert!(!*rx.borrow());

        shutdown.signal();
        assert!(*rx.borrow());
        assert!(*shutdown.subscribe().borrow());
    }

    #[tokio::test]
    async fn test_subscriber_is_woken() {
        let shutdown = ShutdownSignal::new();
        let mut rx = shutdown.subscribe();
        let waiter = tokio::spawn(async move {
            rx.changed().await.unwrap();
            let flag = *rx.borrow();
            flag
        });

        shutdown.signal();
        assert!(waiter.await.unwrap());
    }
}
