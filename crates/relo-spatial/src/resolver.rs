//! Safe-spot search trait and the default expanding-shell implementation.
//!
//! # Search order
//!
//! [`ShellResolver`] walks a square lattice of horizontal offsets
//! `(i·step, 0, j·step)` around the unsafe point, ordered by
//!
//! 1. squared lattice distance `i² + j²` (exact integer, so ties are real ties),
//! 2. angle from +x, counter-clockwise,
//! 3. `(i, j)`.
//!
//! The first offset the probe reports clear is returned.  Because the order is
//! total and sorted by distance, no nearer clear lattice point is ever
//! skipped, and the same world always yields the same answer.
//!
//! The search stays at the unsafe point's height: relocation targets are
//! ground positions and a vertical search would mostly probe the sky.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use relo_core::{ObstacleMask, RelocationConfig, Vec3};

use crate::SpatialProbe;

// ── SafeSpotResolver trait ────────────────────────────────────────────────────

/// Pluggable nearest-clear-point search.
///
/// Implementations must be deterministic and distance-monotonic: a farther
/// point may only be returned when no nearer clear point exists.  `None` is
/// the normal answer for crowded space, not an error.
pub trait SafeSpotResolver: Send + Sync {
    /// Nearest conflict-free point within `max_radius` of `unsafe_point`.
    fn resolve(&self, unsafe_point: Vec3, max_radius: f32) -> Option<Vec3>;
}

// ── ShellResolver ─────────────────────────────────────────────────────────────

/// Lattice search over a [`SpatialProbe`].
///
/// `probe_radius` and `mask` should match what the coordinator uses for its
/// own target check, otherwise the resolver may return a point the
/// coordinator would itself consider occupied.
pub struct ShellResolver<P: SpatialProbe> {
    probe:        P,
    probe_radius: f32,
    mask:         ObstacleMask,
    step:         f32,
}

impl<P: SpatialProbe> ShellResolver<P> {
    pub fn new(probe: P, probe_radius: f32, mask: ObstacleMask, step: f32) -> Self {
        Self { probe, probe_radius, mask, step }
    }

    /// Radius, mask, and lattice step taken from `config`.
    pub fn from_config(probe: P, config: &RelocationConfig) -> Self {
        Self::new(probe, config.probe_radius_m, config.probe_mask, config.search_step_m)
    }

    pub fn step(&self) -> f32 {
        self.step
    }
}

impl<P: SpatialProbe> SafeSpotResolver for ShellResolver<P> {
    fn resolve(&self, unsafe_point: Vec3, max_radius: f32) -> Option<Vec3> {
        if !unsafe_point.is_finite() || !max_radius.is_finite() || max_radius < 0.0 {
            return None;
        }
        if !self.step.is_finite() || self.step <= 0.0 {
            return None;
        }

        let cells = max_radius / self.step;
        if cells > RelocationConfig::MAX_SEARCH_CELLS {
            tracing::trace!(max_radius, step = self.step, "safe_spot.lattice_too_fine");
            return None;
        }

        let found = ShellOffsets::new(cells).find_map(|(i, j)| {
            let candidate = unsafe_point + Vec3::new(i as f32 * self.step, 0.0, j as f32 * self.step);
            (!self.probe.query(candidate, self.probe_radius, self.mask).conflict).then_some(candidate)
        });

        match found {
            Some(p) => tracing::trace!(from = %unsafe_point, to = %p, "safe_spot.found"),
            None => tracing::trace!(from = %unsafe_point, max_radius, "safe_spot.exhausted"),
        }
        found
    }
}

// ── Lattice walk ──────────────────────────────────────────────────────────────

/// Lattice offsets `(i, j)` with `i² + j² <= cells²`, yielded lazily in
/// search order.
///
/// A min-heap holds one cursor per column `i`, keyed by the squared distance
/// of that column's next `|j|`.  Each pop of a distance drains the whole
/// ring, which is then sorted by angle, so an early hit never pays for the
/// outer shells.
pub(crate) struct ShellOffsets {
    max_d2: i64,
    heap:   BinaryHeap<Reverse<(i64, i32, i32)>>,
    ring:   Vec<(i32, i32)>,
    next:   usize,
}

impl ShellOffsets {
    pub(crate) fn new(cells: f32) -> Self {
        // Points whose radius rounds onto the boundary still count.
        let reach = f64::from(cells) + 1e-4;
        let max_d2 = (reach * reach).floor() as i64;
        let n = (max_d2 as f64).sqrt().floor() as i32;

        let heap = (-n..=n)
            .map(|i| Reverse((i64::from(i) * i64::from(i), i, 0)))
            .collect();
        Self { max_d2, heap, ring: Vec::new(), next: 0 }
    }

    fn fill_ring(&mut self) -> bool {
        let Some(&Reverse((d2, _, _))) = self.heap.peek() else {
            return false;
        };
        self.ring.clear();
        self.next = 0;
        while let Some(&Reverse((top, i, j))) = self.heap.peek() {
            if top != d2 {
                break;
            }
            self.heap.pop();
            self.ring.push((i, j));
            if j > 0 {
                self.ring.push((i, -j));
            }
            let next_j = j + 1;
            let next_d2 = i64::from(i) * i64::from(i) + i64::from(next_j) * i64::from(next_j);
            if next_d2 <= self.max_d2 {
                self.heap.push(Reverse((next_d2, i, next_j)));
            }
        }
        self.ring.sort_by(|&a, &b| ring_order(a, b));
        true
    }
}

impl Iterator for ShellOffsets {
    type Item = (i32, i32);

    fn next(&mut self) -> Option<(i32, i32)> {
        if self.next == self.ring.len() && !self.fill_ring() {
            return None;
        }
        let offset = self.ring[self.next];
        self.next += 1;
        Some(offset)
    }
}

/// Order within one ring: angle, then `(i, j)`.
fn ring_order(a: (i32, i32), b: (i32, i32)) -> Ordering {
    angle(a).total_cmp(&angle(b)).then_with(|| a.cmp(&b))
}

/// Angle of a lattice offset in `[0, 2π)`, measured from +x towards +z.
fn angle((i, j): (i32, i32)) -> f64 {
    let a = f64::from(j).atan2(f64::from(i));
    if a < 0.0 { a + std::f64::consts::TAU } else { a }
}
