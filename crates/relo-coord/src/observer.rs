//! Outcome observer for reporting and data collection.

use relo_events::RelocationRequest;

use crate::RelocationOutcome;

/// Called by the event listener once per handled event, after the entity
/// lock has been released.
///
/// Direct callers of
/// [`RelocationCoordinator::handle`][crate::RelocationCoordinator::handle]
/// get the outcome as the return value and do not go through the observer.
///
/// # Example — outcome counter
///
/// ```rust,ignore
/// struct Counter(AtomicUsize);
///
/// impl OutcomeObserver for Counter {
///     fn on_outcome(&self, _req: &RelocationRequest, outcome: &RelocationOutcome) {
///         if outcome.is_success() {
///             self.0.fetch_add(1, Ordering::Relaxed);
///         }
///     }
/// }
/// ```
pub trait OutcomeObserver: Send + Sync {
    fn on_outcome(&self, _request: &RelocationRequest, _outcome: &RelocationOutcome) {}
}

/// An [`OutcomeObserver`] that does nothing.
pub struct NoopObserver;

impl OutcomeObserver for NoopObserver {}
