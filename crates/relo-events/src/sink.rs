//! Fire-and-forget notifications about completed relocations.

use std::sync::{Mutex, PoisonError};

use relo_core::EntityId;

/// What happened to an entity.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum Signal {
    /// The entity was moved and is now at rest at its destination.
    RelocationSucceeded,
}

/// Receives signals from the coordinator.  Must not block.
pub trait NotificationSink: Send + Sync {
    fn notify(&self, entity: EntityId, signal: Signal);
}

/// Discards every signal.
pub struct NoopSink;

impl NotificationSink for NoopSink {
    fn notify(&self, _entity: EntityId, _signal: Signal) {}
}

/// Keeps every signal in arrival order.
#[derive(Default)]
pub struct RecordingSink {
    records: Mutex<Vec<(EntityId, Signal)>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything received so far.
    pub fn records(&self) -> Vec<(EntityId, Signal)> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn len(&self) -> usize {
        self.records.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn count_for(&self, entity: EntityId) -> usize {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|(e, _)| *e == entity)
            .count()
    }

    pub fn clear(&self) {
        self.records.lock().unwrap_or_else(PoisonError::into_inner).clear();
    }
}

impl NotificationSink for RecordingSink {
    fn notify(&self, entity: EntityId, signal: Signal) {
        self.records.lock().unwrap_or_else(PoisonError::into_inner).push((entity, signal));
    }
}
