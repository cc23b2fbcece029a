//! Obstacle field representation and builder.
//!
//! # Data layout
//!
//! Obstacles are spheres tagged with an [`ObstacleKind`].  Their centres are
//! indexed in a 3-D R-tree (via `rstar`); a sphere query of radius `r` first
//! collects every centre within `r + max_obstacle_radius` and then applies
//! the exact sphere-sphere test, so large and small obstacles can share one
//! index.
//!
//! # Sharing
//!
//! The field is internally synchronised with an `RwLock`.  Relocation only
//! ever reads it; the surrounding simulation may insert or remove obstacles
//! (e.g. a parked van arriving) at any time, which is why the executor
//! re-probes immediately before committing.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use rstar::{PointDistance, RTree, RTreeObject, AABB};

use relo_core::{ObstacleId, ObstacleKind, ObstacleMask, Vec3};

use crate::{ObstacleHit, SpatialError, SpatialResult};

// ── Obstacle ──────────────────────────────────────────────────────────────────

/// A spherical obstacle.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Obstacle {
    pub center: Vec3,
    pub radius: f32,
    pub kind:   ObstacleKind,
}

impl Obstacle {
    #[inline]
    pub fn new(center: Vec3, radius: f32, kind: ObstacleKind) -> Self {
        Self { center, radius, kind }
    }

    /// Why this obstacle cannot be indexed, if it cannot.  A non-finite
    /// centre or a non-positive radius would never be reported by a query.
    pub fn defect(&self) -> Option<String> {
        if !self.center.is_finite() {
            return Some(format!("non-finite centre {}", self.center));
        }
        if !self.radius.is_finite() || self.radius <= 0.0 {
            return Some(format!("radius {} must be positive", self.radius));
        }
        None
    }
}

// ── R-tree entry ──────────────────────────────────────────────────────────────

#[derive(Clone, PartialEq)]
struct ObstacleEntry {
    point:  [f32; 3],
    radius: f32,
    kind:   ObstacleKind,
    id:     ObstacleId,
}

impl ObstacleEntry {
    fn to_obstacle(&self) -> Obstacle {
        Obstacle::new(Vec3::from_array(self.point), self.radius, self.kind)
    }
}

impl RTreeObject for ObstacleEntry {
    type Envelope = AABB<[f32; 3]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for ObstacleEntry {
    /// Squared Euclidean distance between the obstacle centre and `point`.
    fn distance_2(&self, point: &[f32; 3]) -> f32 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        let dz = self.point[2] - point[2];
        dx * dx + dy * dy + dz * dz
    }
}

struct FieldIndex {
    tree:       RTree<ObstacleEntry>,
    by_id:      HashMap<ObstacleId, ObstacleEntry>,
    /// Largest radius ever inserted.  Never shrinks on removal, which only
    /// widens the broad-phase search.
    max_radius: f32,
    next_id:    u32,
}

// ── ObstacleField ─────────────────────────────────────────────────────────────

/// Spatial index of every obstacle in the world.
///
/// Construct with [`ObstacleFieldBuilder`] (bulk load) or
/// [`ObstacleField::empty`] followed by [`insert`](Self::insert).
pub struct ObstacleField {
    index: RwLock<FieldIndex>,
}

impl ObstacleField {
    /// A field with no obstacles: every query reports no conflict.
    pub fn empty() -> Self {
        ObstacleFieldBuilder::new().build()
    }

    pub fn len(&self) -> usize {
        self.read().by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().by_id.is_empty()
    }

    /// Add an obstacle and return its id.  Rejects obstacles with a
    /// [`defect`](Obstacle::defect); the field is unchanged in that case.
    pub fn insert(&self, obstacle: Obstacle) -> SpatialResult<ObstacleId> {
        if let Some(reason) = obstacle.defect() {
            return Err(SpatialError::Invalid(reason));
        }
        let mut index = self.write();
        let id = ObstacleId(index.next_id);
        index.next_id += 1;
        let entry = ObstacleEntry {
            point:  obstacle.center.to_array(),
            radius: obstacle.radius,
            kind:   obstacle.kind,
            id,
        };
        index.max_radius = index.max_radius.max(obstacle.radius);
        index.tree.insert(entry.clone());
        index.by_id.insert(id, entry);
        Ok(id)
    }

    /// Remove an obstacle, returning it if it was present.
    pub fn remove(&self, id: ObstacleId) -> Option<Obstacle> {
        let mut index = self.write();
        let entry = index.by_id.remove(&id)?;
        index.tree.remove(&entry);
        Some(entry.to_obstacle())
    }

    pub fn get(&self, id: ObstacleId) -> Option<Obstacle> {
        self.read().by_id.get(&id).map(ObstacleEntry::to_obstacle)
    }

    /// Every obstacle whose kind is in `mask` and whose sphere overlaps the
    /// sphere of `radius` around `point`.
    ///
    /// Touching spheres do not overlap.  Hits are sorted by centre distance,
    /// then id, so results are deterministic.
    pub fn overlapping(&self, point: Vec3, radius: f32, mask: ObstacleMask) -> Vec<ObstacleHit> {
        if mask.is_empty() || !point.is_finite() || !radius.is_finite() || radius < 0.0 {
            return Vec::new();
        }

        let index = self.read();
        let reach = radius + index.max_radius;
        let mut hits: Vec<ObstacleHit> = index
            .tree
            .locate_within_distance(point.to_array(), reach * reach)
            .filter(|e| mask.intersects(e.kind.mask()))
            .filter_map(|e| {
                let distance = e.distance_2(&point.to_array()).sqrt();
                (distance < radius + e.radius).then_some(ObstacleHit {
                    id:   e.id,
                    kind: e.kind,
                    distance,
                })
            })
            .collect();
        drop(index);

        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance).then(a.id.cmp(&b.id)));
        hits
    }

    fn read(&self) -> RwLockReadGuard<'_, FieldIndex> {
        self.index.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, FieldIndex> {
        self.index.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for ObstacleField {
    fn default() -> Self {
        Self::empty()
    }
}

// ── ObstacleFieldBuilder ──────────────────────────────────────────────────────

/// Construct an [`ObstacleField`] incrementally, then call [`build`](Self::build).
///
/// # Example
///
/// ```
/// use relo_core::{ObstacleKind, ObstacleMask, Vec3};
/// use relo_spatial::{ObstacleFieldBuilder, SpatialProbe};
///
/// let mut b = ObstacleFieldBuilder::new();
/// b.add_sphere(Vec3::new(10.0, 0.0, 10.0), 1.0, ObstacleKind::Solid);
/// let field = b.build();
/// assert!(field.query(Vec3::new(10.0, 0.0, 10.0), 0.8, ObstacleMask::RELOCATION).conflict);
/// ```
pub struct ObstacleFieldBuilder {
    obstacles: Vec<Obstacle>,
}

impl ObstacleFieldBuilder {
    pub fn new() -> Self {
        Self { obstacles: Vec::new() }
    }

    pub fn with_capacity(obstacles: usize) -> Self {
        Self { obstacles: Vec::with_capacity(obstacles) }
    }

    /// Add an obstacle and return its `ObstacleId` (sequential from 0).
    ///
    /// Unchecked: the caller supplies a finite centre and a positive radius.
    /// Untrusted input goes through the CSV loader or
    /// [`ObstacleField::insert`], which both reject defective obstacles.
    pub fn add(&mut self, obstacle: Obstacle) -> ObstacleId {
        let id = ObstacleId(self.obstacles.len() as u32);
        self.obstacles.push(obstacle);
        id
    }

    pub fn add_sphere(&mut self, center: Vec3, radius: f32, kind: ObstacleKind) -> ObstacleId {
        self.add(Obstacle::new(center, radius, kind))
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    /// Consume the builder and bulk-load the R-tree.
    pub fn build(self) -> ObstacleField {
        let entries: Vec<ObstacleEntry> = self
            .obstacles
            .iter()
            .enumerate()
            .map(|(i, o)| ObstacleEntry {
                point:  o.center.to_array(),
                radius: o.radius,
                kind:   o.kind,
                id:     ObstacleId(i as u32),
            })
            .collect();

        let max_radius = entries.iter().map(|e| e.radius).fold(0.0_f32, f32::max);
        let by_id = entries.iter().map(|e| (e.id, e.clone())).collect();
        let next_id = entries.len() as u32;

        ObstacleField {
            index: RwLock::new(FieldIndex {
                tree: RTree::bulk_load(entries),
                by_id,
                max_radius,
                next_id,
            }),
        }
    }
}

impl Default for ObstacleFieldBuilder {
    fn default() -> Self {
        Self::new()
    }
}
