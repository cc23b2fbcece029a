//! Fluent builder for constructing a [`RelocationCoordinator`].

use std::sync::{Arc, Mutex};

use relo_core::{PrincipalId, RelocationConfig};
use relo_entity::EntityTable;
use relo_events::{EventSource, NoopSink, NotificationSink};
use relo_exec::{PhysicsExecutor, RelocationExecutor};
use relo_spatial::{ObstacleField, SafeSpotResolver, ShellResolver, SpatialProbe};

use crate::coordinator::CoordinatorCore;
use crate::{CoordError, CoordResult, NoopObserver, OutcomeObserver, RelocationCoordinator};

/// Fluent builder for [`RelocationCoordinator`].
///
/// # Required inputs
///
/// - [`RelocationConfig`] — timeout, probe radius/mask, search radius, …
/// - the authorised [`PrincipalId`]
/// - the world's [`EntityTable`] and [`ObstacleField`]
/// - an [`EventSource`] (e.g. [`relo_events::EventBus`])
///
/// # Optional inputs (have defaults)
///
/// | Method          | Default                                              |
/// |-----------------|------------------------------------------------------|
/// | `.probe(p)`     | the obstacle field                                   |
/// | `.resolver(r)`  | `ShellResolver` over the chosen probe                |
/// | `.executor(e)`  | `PhysicsExecutor` over the obstacle field            |
/// | `.sink(s)`      | `NoopSink`                                           |
/// | `.observer(o)`  | `NoopObserver`                                       |
///
/// # Example
///
/// ```rust,ignore
/// let coordinator = CoordinatorBuilder::new(config, "courier-7", entities, obstacles, bus.clone())
///     .sink(Arc::new(RecordingSink::new()))
///     .build()?;
/// coordinator.start()?;
/// ```
pub struct CoordinatorBuilder {
    config:     RelocationConfig,
    authorized: PrincipalId,
    entities:   Arc<EntityTable>,
    obstacles:  Arc<ObstacleField>,
    source:     Arc<dyn EventSource>,
    probe:      Option<Arc<dyn SpatialProbe>>,
    resolver:   Option<Arc<dyn SafeSpotResolver>>,
    executor:   Option<Arc<dyn RelocationExecutor>>,
    sink:       Option<Arc<dyn NotificationSink>>,
    observer:   Option<Arc<dyn OutcomeObserver>>,
}

impl CoordinatorBuilder {
    pub fn new(
        config:     RelocationConfig,
        authorized: impl Into<PrincipalId>,
        entities:   Arc<EntityTable>,
        obstacles:  Arc<ObstacleField>,
        source:     Arc<dyn EventSource>,
    ) -> Self {
        Self {
            config,
            authorized: authorized.into(),
            entities,
            obstacles,
            source,
            probe:    None,
            resolver: None,
            executor: None,
            sink:     None,
            observer: None,
        }
    }

    /// Probe used for the pre-commit check at the target.
    pub fn probe(mut self, probe: Arc<dyn SpatialProbe>) -> Self {
        self.probe = Some(probe);
        self
    }

    pub fn resolver(mut self, resolver: Arc<dyn SafeSpotResolver>) -> Self {
        self.resolver = Some(resolver);
        self
    }

    pub fn executor(mut self, executor: Arc<dyn RelocationExecutor>) -> Self {
        self.executor = Some(executor);
        self
    }

    pub fn sink(mut self, sink: Arc<dyn NotificationSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn observer(mut self, observer: Arc<dyn OutcomeObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Validate the config and principal, fill in defaults, and return a
    /// coordinator that is not yet listening.
    pub fn build(self) -> CoordResult<RelocationCoordinator> {
        self.config.validate()?;
        if self.authorized.is_empty() {
            return Err(CoordError::EmptyPrincipal);
        }

        let probe: Arc<dyn SpatialProbe> = match self.probe {
            Some(p) => p,
            None => Arc::clone(&self.obstacles) as Arc<dyn SpatialProbe>,
        };
        let resolver: Arc<dyn SafeSpotResolver> = match self.resolver {
            Some(r) => r,
            None => Arc::new(ShellResolver::from_config(Arc::clone(&probe), &self.config)),
        };
        // The commit-time re-check always sees the live field.
        let executor: Arc<dyn RelocationExecutor> = match self.executor {
            Some(e) => e,
            None => Arc::new(PhysicsExecutor::from_config(Arc::clone(&self.obstacles), &self.config)),
        };

        let core = CoordinatorCore {
            config:     self.config,
            authorized: self.authorized,
            entities:   self.entities,
            probe,
            resolver,
            executor,
            sink:       self.sink.unwrap_or_else(|| Arc::new(NoopSink)),
            observer:   self.observer.unwrap_or_else(|| Arc::new(NoopObserver)),
        };

        Ok(RelocationCoordinator {
            core:         Arc::new(core),
            source:       self.source,
            subscription: Mutex::new(None),
        })
    }
}
