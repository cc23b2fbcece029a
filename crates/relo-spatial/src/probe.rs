//! Collision probing.
//!
//! The coordinator asks a [`SpatialProbe`] whether a candidate point is
//! occupied.  The probe holds no policy: radius and obstacle mask are
//! supplied by the caller on every query.

use std::sync::Arc;

use relo_core::{ObstacleId, ObstacleKind, ObstacleMask, Vec3};

use crate::ObstacleField;

/// One obstacle overlapping a probe sphere.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ObstacleHit {
    pub id:       ObstacleId,
    pub kind:     ObstacleKind,
    /// Centre-to-centre distance from the probe point, metres.
    pub distance: f32,
}

/// The answer to one probe query.  A snapshot; it may be stale by the time
/// anyone acts on it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CollisionResult {
    /// `true` if at least one obstacle overlaps the probe sphere.
    pub conflict: bool,
    /// Overlapping obstacles, nearest first.
    pub hits: Vec<ObstacleHit>,
}

impl CollisionResult {
    /// A result with no overlap.
    pub fn clear() -> Self {
        Self::default()
    }

    pub fn from_hits(hits: Vec<ObstacleHit>) -> Self {
        Self { conflict: !hits.is_empty(), hits }
    }
}

/// Read-only collision query against the current world state.
///
/// # Thread safety
///
/// Implementations must be `Send + Sync`: the coordinator shares one probe
/// across every in-flight relocation task.
pub trait SpatialProbe: Send + Sync {
    /// Report obstacles in `mask` overlapping the sphere of `radius` at `point`.
    fn query(&self, point: Vec3, radius: f32, mask: ObstacleMask) -> CollisionResult;
}

impl SpatialProbe for ObstacleField {
    fn query(&self, point: Vec3, radius: f32, mask: ObstacleMask) -> CollisionResult {
        CollisionResult::from_hits(self.overlapping(point, radius, mask))
    }
}

impl<P: SpatialProbe + ?Sized> SpatialProbe for Arc<P> {
    fn query(&self, point: Vec3, radius: f32, mask: ObstacleMask) -> CollisionResult {
        (**self).query(point, radius, mask)
    }
}

impl<P: SpatialProbe + ?Sized> SpatialProbe for &P {
    fn query(&self, point: Vec3, radius: f32, mask: ObstacleMask) -> CollisionResult {
        (**self).query(point, radius, mask)
    }
}
