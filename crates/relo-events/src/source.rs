//! [`EventSource`] trait and the broadcast-backed [`EventBus`].

use std::sync::{PoisonError, RwLock};

use tokio::sync::broadcast;

use crate::{EventError, EventResult, RelocationRequest};

/// Anything that can hand out a stream of relocation requests.
///
/// Every call returns an independent receiver that sees events published
/// after the call.  Once the producer side is gone the receiver yields
/// `RecvError::Closed`.
pub trait EventSource: Send + Sync {
    fn subscribe(&self) -> broadcast::Receiver<RelocationRequest>;
}

/// In-process event bus over `tokio::sync::broadcast`.
///
/// `capacity` bounds how far a subscriber may fall behind before it starts
/// losing events.
pub struct EventBus {
    sender: RwLock<Option<broadcast::Sender<RelocationRequest>>>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender: RwLock::new(Some(sender)) }
    }

    /// Deliver `request` to every current subscriber.  Returns how many
    /// subscribers it reached.
    pub fn publish(&self, request: RelocationRequest) -> EventResult<usize> {
        let guard = self.sender.read().unwrap_or_else(PoisonError::into_inner);
        let sender = guard.as_ref().ok_or(EventError::Closed)?;
        sender.send(request).map_err(|_| EventError::NoSubscribers)
    }

    pub fn receiver_count(&self) -> usize {
        let guard = self.sender.read().unwrap_or_else(PoisonError::into_inner);
        guard.as_ref().map_or(0, broadcast::Sender::receiver_count)
    }

    /// Drop the producer side.  Existing subscribers drain what is buffered
    /// and then see `Closed`.  Idempotent.
    pub fn close(&self) {
        let mut guard = self.sender.write().unwrap_or_else(PoisonError::into_inner);
        if guard.take().is_some() {
            tracing::debug!("event_bus.closed");
        }
    }

    pub fn is_closed(&self) -> bool {
        self.sender.read().unwrap_or_else(PoisonError::into_inner).is_none()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(256)
    }
}

impl EventSource for EventBus {
    fn subscribe(&self) -> broadcast::Receiver<RelocationRequest> {
        let guard = self.sender.read().unwrap_or_else(PoisonError::into_inner);
        match guard.as_ref() {
            Some(sender) => sender.subscribe(),
            // Closed bus: hand out a receiver whose sender is already gone.
            None => broadcast::channel(1).1,
        }
    }
}
