//! Bounded hand-off between the write path and the relay worker

use tokio::sync::mpsc::{self, error::TrySendError};

use fleetban_core::BanCreatedNotice;

/// Sending half of the relay queue
///
/// Cloned into every service context. `enqueue` never waits: when the worker
/// has fallen behind the notice is dropped with a warning.
#[derive(Debug, Clone)]
pub struct RelayQueue {
    sender: mpsc::Sender<BanCreatedNotice>,
}

impl RelayQueue {
    /// Create a queue holding at most `capacity` pending notices
    pub fn bounded(capacity: usize) -> (Self, mpsc::Receiver<BanCreatedNotice>) {
        let (sender, receiver) = mpsc::channel(capacity.max(1));
        (Self { sender }, receiver)
    }

    /// Hand a notice to the worker; `false` if it was dropped
    pub fn enqueue(&self, notice: BanCreatedNotice) -> bool {
        match self.sender.try_send(notice) {
            Ok(()) => true,
            Err(TrySendError::Full(notice)) => {
                tracing::warn!(ban_id = %notice.ban_id, "Relay queue full, notice dropped");
                false
            }
            Err(TrySendError::Closed(notice)) => {
                tracing::warn!(ban_id = %notice.ban_id, "Relay worker gone, notice dropped");
                false
            }
        }
    }

    /// Free slots left
    pub fn capacity(&self) -> usize {
        self.sender.capacity()
    }
}
