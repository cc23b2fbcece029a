//! The scoped lock token and acquisition counters.

use std::fmt;
use std::ops::{Deref, DerefMut};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::OwnedMutexGuard;

use relo_core::EntityId;

use crate::Body;

// ── Counters ──────────────────────────────────────────────────────────────────

#[derive(Default)]
pub(crate) struct LockCounters {
    pub(crate) attempts:  AtomicU64,
    pub(crate) acquired:  AtomicU64,
    pub(crate) released:  AtomicU64,
    pub(crate) timed_out: AtomicU64,
}

impl LockCounters {
    pub(crate) fn bump(counter: &AtomicU64) {
        counter.fetch_add(1, Ordering::Release);
    }

    pub(crate) fn snapshot(&self) -> LockStats {
        // Releases trail acquisitions, so read them first.
        let released = self.released.load(Ordering::Acquire);
        LockStats {
            attempts:  self.attempts.load(Ordering::Relaxed),
            acquired:  self.acquired.load(Ordering::Acquire),
            released,
            timed_out: self.timed_out.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time copy of the lock table's counters.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct LockStats {
    /// Waiting acquisitions started (timed or not) on registered entities.
    pub attempts:  u64,
    /// Handles handed out.
    pub acquired:  u64,
    /// Handles dropped.
    pub released:  u64,
    /// Waiting acquisitions that gave up.
    pub timed_out: u64,
}

impl LockStats {
    /// Handles currently alive.
    #[inline]
    pub fn outstanding(&self) -> u64 {
        self.acquired.saturating_sub(self.released)
    }
}

// ── EntityLockHandle ──────────────────────────────────────────────────────────

/// Exclusive mutation rights over one entity's [`Body`].
///
/// Not `Clone`.  Dropping the handle releases the lock, whether the holder
/// returns normally, returns early, or unwinds.  [`release`](Self::release)
/// consumes the handle, so a handle cannot be released twice.
pub struct EntityLockHandle {
    entity:   EntityId,
    guard:    OwnedMutexGuard<Body>,
    counters: Arc<LockCounters>,
}

impl EntityLockHandle {
    pub(crate) fn new(entity: EntityId, guard: OwnedMutexGuard<Body>, counters: Arc<LockCounters>) -> Self {
        LockCounters::bump(&counters.acquired);
        Self { entity, guard, counters }
    }

    #[inline]
    pub fn entity(&self) -> EntityId {
        self.entity
    }

    /// Release the lock now rather than at end of scope.
    pub fn release(self) {}
}

impl Deref for EntityLockHandle {
    type Target = Body;
    fn deref(&self) -> &Body {
        &self.guard
    }
}

impl DerefMut for EntityLockHandle {
    fn deref_mut(&mut self) -> &mut Body {
        &mut self.guard
    }
}

impl Drop for EntityLockHandle {
    fn drop(&mut self) {
        LockCounters::bump(&self.counters.released);
        tracing::trace!(entity = %self.entity, "entity_lock.released");
    }
}

impl fmt::Debug for EntityLockHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityLockHandle")
            .field("entity", &self.entity)
            .field("body", &*self.guard)
            .finish()
    }
}
