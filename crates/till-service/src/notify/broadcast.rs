//! Fan-out notifier for UI subscribers.

use tokio::sync::broadcast;
use tracing::debug;

use till_core::traits::{Notice, Notifier};

/// Publishes notices on a broadcast channel. Each UI surface subscribes and
/// renders its own toasts.
#[derive(Debug, Clone)]
pub struct BroadcastNotifier {
    /// Sender half; receivers come from [`Self::subscribe`].
    tx: broadcast::Sender<Notice>,
}

impl BroadcastNotifier {
    /// Create a notifier buffering up to `capacity` notices per subscriber.
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Subscribe to notices published from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<Notice> {
        self.tx.subscribe()
    }

    /// Number of live subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Notifier for BroadcastNotifier {
    fn notify(&self, notice: Notice) {
        if self.tx.send(notice).is_err() {
            debug!("Notice dropped: no subscribers");
        }
    }
}
