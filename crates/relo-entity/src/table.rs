//! [`EntityTable`]: one async mutex per registered entity.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;

use relo_core::EntityId;

use crate::lock::{LockCounters, LockStats};
use crate::{Body, EntityLockHandle};

#[cfg(feature = "fx-hash")]
pub(crate) type EntityMap<V> = rustc_hash::FxHashMap<EntityId, V>;
#[cfg(not(feature = "fx-hash"))]
pub(crate) type EntityMap<V> = std::collections::HashMap<EntityId, V>;

/// The lock table.  Membership is fixed at build time; bodies are mutated
/// only through [`EntityLockHandle`]s.
///
/// Share it as `Arc<EntityTable>`; all methods take `&self`.
pub struct EntityTable {
    pub(crate) slots:    EntityMap<Arc<Mutex<Body>>>,
    pub(crate) counters: Arc<LockCounters>,
}

impl EntityTable {
    /// Acquire exclusive rights over `entity`, waiting at most `timeout`.
    ///
    /// Returns `None` if the entity is not registered or the wait expires.
    /// An uncontended lock is granted even when `timeout` is zero.
    pub async fn acquire(&self, entity: EntityId, timeout: Duration) -> Option<EntityLockHandle> {
        let slot = Arc::clone(self.slots.get(&entity)?);
        LockCounters::bump(&self.counters.attempts);

        match tokio::time::timeout(timeout, slot.lock_owned()).await {
            Ok(guard) => Some(EntityLockHandle::new(entity, guard, Arc::clone(&self.counters))),
            Err(_) => {
                LockCounters::bump(&self.counters.timed_out);
                tracing::trace!(%entity, timeout_ms = timeout.as_millis() as u64, "entity_lock.timeout");
                None
            }
        }
    }

    /// Acquire without waiting.  `None` if unregistered or currently held.
    pub fn try_acquire(&self, entity: EntityId) -> Option<EntityLockHandle> {
        let slot = Arc::clone(self.slots.get(&entity)?);
        let guard = slot.try_lock_owned().ok()?;
        Some(EntityLockHandle::new(entity, guard, Arc::clone(&self.counters)))
    }

    /// Copy of the body, read under the entity's lock.
    pub async fn snapshot(&self, entity: EntityId, timeout: Duration) -> Option<Body> {
        self.acquire(entity, timeout).await.map(|handle| *handle)
    }

    /// Drop `handle`, releasing its entity.
    pub fn release(&self, handle: EntityLockHandle) {
        handle.release();
    }

    #[inline]
    pub fn contains(&self, entity: EntityId) -> bool {
        self.slots.contains_key(&entity)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Registered ids in ascending order.
    pub fn entity_ids(&self) -> Vec<EntityId> {
        let mut ids: Vec<EntityId> = self.slots.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    pub fn stats(&self) -> LockStats {
        self.counters.snapshot()
    }
}

impl std::fmt::Debug for EntityTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntityTable")
            .field("entities", &self.slots.len())
            .field("stats", &self.stats())
            .finish()
    }
}
