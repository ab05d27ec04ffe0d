use std::sync::Arc;

use tokio::sync::watch;

/// Process-wide "show ratings" flag shared by every dashboard client.
#[derive(Debug, Clone)]
pub struct RatingsVisibility {
    sender: Arc<watch::Sender<bool>>,
}

impl RatingsVisibility {
    /// Creates the flag with ratings shown.
    pub fn new() -> Self {
        let (sender, _) = watch::channel(true);
        Self {
            sender: Arc::new(sender),
        }
    }

    pub fn current(&self) -> bool {
        *self.sender.borrow()
    }

    /// Stores `value` and wakes every subscriber, even when it did not change.
    pub fn set(&self, value: bool) {
        self.sender.send_replace(value);
    }

    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.sender.subscribe()
    }
}

impl Default for RatingsVisibility {
    fn default() -> Self {
        Self::new()
    }
}
