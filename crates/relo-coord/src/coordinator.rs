//! The coordinator: request pipeline and listener lifecycle.

use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::broadcast::{self, error::RecvError};
use tracing::Instrument;

use relo_core::{EntityId, PrincipalId, RelocationConfig, Vec3};
use relo_entity::EntityTable;
use relo_events::{EventSource, NotificationSink, RelocationRequest, Signal};
use relo_exec::{RelocationContext, RelocationExecutor};
use relo_spatial::{SafeSpotResolver, SpatialProbe};

use crate::{CoordError, CoordResult, IgnoreReason, OutcomeObserver, RelocationOutcome, Subscription};

// ── Core ──────────────────────────────────────────────────────────────────────

/// Everything the pipeline needs, shared between the coordinator and the
/// per-event tasks spawned by its listener.
pub(crate) struct CoordinatorCore {
    pub(crate) config:     RelocationConfig,
    pub(crate) authorized: PrincipalId,
    pub(crate) entities:   Arc<EntityTable>,
    pub(crate) probe:      Arc<dyn SpatialProbe>,
    pub(crate) resolver:   Arc<dyn SafeSpotResolver>,
    pub(crate) executor:   Arc<dyn RelocationExecutor>,
    pub(crate) sink:       Arc<dyn NotificationSink>,
    pub(crate) observer:   Arc<dyn OutcomeObserver>,
}

impl CoordinatorCore {
    /// Cheap checks done before any lock is touched, in a fixed order.
    fn admit(&self, request: &RelocationRequest) -> Result<(EntityId, Vec3), IgnoreReason> {
        let (Some(principal), Some(subject), Some(target)) =
            (request.principal.as_ref(), request.subject, request.target)
        else {
            return Err(IgnoreReason::Incomplete);
        };
        if *principal != self.authorized {
            return Err(IgnoreReason::Unauthorized);
        }
        if request.readiness != self.config.accepted_readiness {
            return Err(IgnoreReason::NotReady(request.readiness));
        }
        if !target.is_finite() {
            return Err(IgnoreReason::NonFiniteTarget);
        }
        if !self.entities.contains(subject) {
            return Err(IgnoreReason::UnknownEntity);
        }
        Ok((subject, target))
    }

    pub(crate) async fn handle(&self, request: &RelocationRequest) -> RelocationOutcome {
        let span = tracing::info_span!(
            "relocation",
            entity    = ?request.subject,
            principal = ?request.principal.as_ref().map(PrincipalId::as_str),
        );
        self.run_pipeline(request).instrument(span).await
    }

    async fn run_pipeline(&self, request: &RelocationRequest) -> RelocationOutcome {
        let (entity, target) = match self.admit(request) {
            Ok(admitted) => admitted,
            Err(reason) => {
                tracing::trace!(reason = reason.as_str(), "relocation.ignored");
                return RelocationOutcome::Ignored(reason);
            }
        };

        let Some(mut handle) = self.entities.acquire(entity, self.config.lock_timeout()).await else {
            tracing::debug!(%entity, timeout_ms = self.config.lock_timeout_ms, "relocation.lock_timeout");
            return RelocationOutcome::LockTimeout;
        };

        let radius = self.config.probe_radius_m;
        let mask = self.config.probe_mask;
        let mut destination = target;
        let mut corrected = false;

        if self.probe.query(target, radius, mask).conflict {
            match self.resolver.resolve(target, self.config.max_search_radius_m) {
                Some(spot) => {
                    tracing::debug!(%target, destination = %spot, "relocation.corrected");
                    destination = spot;
                    corrected = true;
                }
                None => {
                    tracing::debug!(%target, max_radius = self.config.max_search_radius_m, "relocation.no_safe_spot");
                    return RelocationOutcome::NoSafeSpotFound;
                }
            }
        }

        let ctx = RelocationContext::strict(handle.position, destination);
        if let Err(reason) = self.executor.execute(&mut handle, &ctx) {
            tracing::warn!(%entity, %destination, %reason, "relocation.rejected");
            return RelocationOutcome::Rejected(reason);
        }

        // Redundant with the executor's zeroing when the strict context is
        // honoured; a custom executor may not honour it.
        handle.linear_velocity = Vec3::ZERO;
        handle.release();

        self.sink.notify(entity, Signal::RelocationSucceeded);
        tracing::info!(%entity, %destination, corrected, "relocation.success");
        RelocationOutcome::Success { destination, corrected }
    }
}

// ── Coordinator ───────────────────────────────────────────────────────────────

/// Listens for relocation requests and carries each one through the
/// admit / lock / resolve / execute pipeline.
///
/// Build with [`CoordinatorBuilder`][crate::CoordinatorBuilder].  Requests
/// can be fed directly through [`handle`](Self::handle) or, after
/// [`start`](Self::start), taken from the event source.
pub struct RelocationCoordinator {
    pub(crate) core:         Arc<CoordinatorCore>,
    pub(crate) source:       Arc<dyn EventSource>,
    pub(crate) subscription: Mutex<Option<Subscription>>,
}

impl RelocationCoordinator {
    /// Run one request through the pipeline.  Never fails; every failure
    /// mode is a [`RelocationOutcome`].
    pub async fn handle(&self, request: &RelocationRequest) -> RelocationOutcome {
        self.core.handle(request).await
    }

    /// Subscribe to the event source and spawn the listener task.
    ///
    /// Returns `Ok(false)` if a listener is already running.  Each event is
    /// handled on its own task, so different entities relocate concurrently.
    pub fn start(&self) -> CoordResult<bool> {
        let runtime = tokio::runtime::Handle::try_current().map_err(|_| CoordError::NoRuntime)?;
        let mut slot = self.subscription.lock().unwrap_or_else(PoisonError::into_inner);
        if slot.as_ref().is_some_and(|s| !s.is_finished()) {
            return Ok(false);
        }

        let receiver = self.source.subscribe();
        let task = runtime.spawn(listen(Arc::clone(&self.core), receiver));
        *slot = Some(Subscription::new(task));
        tracing::info!(principal = %self.core.authorized, "coordinator.started");
        Ok(true)
    }

    /// Drop the subscription, aborting the listener.  Requests already
    /// dispatched run to completion.  Returns `false` if not running.
    pub fn stop(&self) -> bool {
        let taken = self.subscription.lock().unwrap_or_else(PoisonError::into_inner).take();
        match taken {
            Some(subscription) => {
                drop(subscription);
                tracing::info!(principal = %self.core.authorized, "coordinator.stopped");
                true
            }
            None => false,
        }
    }

    pub fn is_running(&self) -> bool {
        self.subscription
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .is_some_and(|s| !s.is_finished())
    }

    pub fn config(&self) -> &RelocationConfig {
        &self.core.config
    }

    pub fn authorized(&self) -> &PrincipalId {
        &self.core.authorized
    }

    pub fn entities(&self) -> &Arc<EntityTable> {
        &self.core.entities
    }
}

impl Drop for RelocationCoordinator {
    fn drop(&mut self) {
        self.stop();
    }
}

async fn listen(core: Arc<CoordinatorCore>, mut receiver: broadcast::Receiver<RelocationRequest>) {
    loop {
        match receiver.recv().await {
            Ok(request) => {
                let core = Arc::clone(&core);
                tokio::spawn(async move {
                    let outcome = core.handle(&request).await;
                    core.observer.on_outcome(&request, &outcome);
                });
            }
            Err(RecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "coordinator.lagged");
            }
            Err(RecvError::Closed) => {
                tracing::debug!("coordinator.source_closed");
                break;
            }
        }
    }
}
