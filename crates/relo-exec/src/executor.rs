//! [`RelocationExecutor`] trait and the [`PhysicsExecutor`] default.

use relo_core::{ObstacleMask, Quat, RelocationConfig, Vec3};
use relo_entity::Body;
use relo_spatial::SpatialProbe;

use crate::{ExecResult, RejectReason, RelocationContext};

/// Commits a relocation to a locked body.
///
/// Implementations must be all-or-nothing: on `Err` the body is
/// field-wise identical to what it was on entry.
pub trait RelocationExecutor: Send + Sync {
    fn execute(&self, body: &mut Body, ctx: &RelocationContext) -> ExecResult<()>;
}

/// Default executor: validates the move against the live obstacle field and
/// commits position, velocity, and orientation in a single write.
///
/// # Type parameter
///
/// `P` is the probe used for the commit-time re-check; the coordinator
/// shares one `Arc<ObstacleField>` between its own probe and this one.
pub struct PhysicsExecutor<P: SpatialProbe> {
    probe:    P,
    radius:   f32,
    mask:     ObstacleMask,
    max_jump: Option<f32>,
}

impl<P: SpatialProbe> PhysicsExecutor<P> {
    pub fn new(probe: P, radius: f32, mask: ObstacleMask) -> Self {
        Self { probe, radius, mask, max_jump: None }
    }

    /// Probe radius, mask, and jump limit taken from `config`.
    pub fn from_config(probe: P, config: &RelocationConfig) -> Self {
        Self {
            probe,
            radius:   config.probe_radius_m,
            mask:     config.probe_mask,
            max_jump: config.max_jump_m,
        }
    }

    pub fn with_max_jump(mut self, limit: f32) -> Self {
        self.max_jump = Some(limit);
        self
    }

    fn next_body(&self, body: &Body, ctx: &RelocationContext) -> ExecResult<Body> {
        if body.position != ctx.source {
            return Err(RejectReason::SourceMismatch { expected: ctx.source, actual: body.position });
        }
        if !ctx.destination.is_finite() {
            return Err(RejectReason::NonFinite(ctx.destination));
        }
        if let Some(limit) = self.max_jump {
            let distance = ctx.displacement();
            if distance > limit {
                return Err(RejectReason::OutOfRange { distance, limit });
            }
        }
        // The field may have changed since the coordinator probed.
        if self.probe.query(ctx.destination, self.radius, self.mask).conflict {
            return Err(RejectReason::DestinationOccupied(ctx.destination));
        }

        let mut next = *body;
        next.position = ctx.destination;
        if ctx.preserve_momentum_zero {
            next.linear_velocity = Vec3::ZERO;
            next.angular_velocity = Vec3::ZERO;
        }
        if !ctx.preserve_orientation {
            next.orientation = Quat::IDENTITY;
        }
        Ok(next)
    }
}

impl<P: SpatialProbe> RelocationExecutor for PhysicsExecutor<P> {
    fn execute(&self, body: &mut Body, ctx: &RelocationContext) -> ExecResult<()> {
        let next = self.next_body(body, ctx)?;
        *body = next;
        tracing::trace!(destination = %ctx.destination, "executor.committed");
        Ok(())
    }
}
