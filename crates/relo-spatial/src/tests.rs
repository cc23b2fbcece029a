//! Unit tests for relo-spatial.
//!
//! All tests use hand-placed or seeded obstacle fields; no external data.

#[cfg(test)]
mod helpers {
    use relo_core::{ObstacleKind, Vec3};
    use crate::{ObstacleField, ObstacleFieldBuilder};

    /// One solid sphere of `radius` centred on the (10, 0, 10) drop-off.
    pub fn single_obstacle(radius: f32) -> ObstacleField {
        let mut b = ObstacleFieldBuilder::new();
        b.add_sphere(Vec3::new(10.0, 0.0, 10.0), radius, ObstacleKind::Solid);
        b.build()
    }

    pub fn approx(a: Vec3, b: Vec3) -> bool {
        a.distance(b) < 1e-4
    }
}

// ── Obstacle field & probe ────────────────────────────────────────────────────

#[cfg(test)]
mod probe {
    use relo_core::{ObstacleId, ObstacleKind, ObstacleMask, Vec3};
    use crate::{Obstacle, ObstacleField, ObstacleFieldBuilder, SpatialError, SpatialProbe};

    use super::helpers::single_obstacle;

    const MASK: ObstacleMask = ObstacleMask::RELOCATION;

    #[test]
    fn empty_field_never_conflicts() {
        let field = ObstacleField::empty();
        assert!(field.is_empty());
        let r = field.query(Vec3::new(10.0, 0.0, 10.0), 0.8, MASK);
        assert!(!r.conflict);
        assert!(r.hits.is_empty());
    }

    #[test]
    fn sphere_overlap() {
        let field = single_obstacle(1.0);
        let hit = field.query(Vec3::new(10.0, 0.0, 10.0), 0.8, MASK);
        assert!(hit.conflict);
        assert_eq!(hit.hits.len(), 1);
        assert_eq!(hit.hits[0].id, ObstacleId(0));
        assert_eq!(hit.hits[0].kind, ObstacleKind::Solid);

        // 1.5 m away: 1.5 < 0.8 + 1.0 → still overlapping.
        assert!(field.query(Vec3::new(11.5, 0.0, 10.0), 0.8, MASK).conflict);
        // 2.0 m away: clear.
        assert!(!field.query(Vec3::new(12.0, 0.0, 10.0), 0.8, MASK).conflict);
    }

    #[test]
    fn mask_filters_categories() {
        let mut b = ObstacleFieldBuilder::new();
        b.add_sphere(Vec3::ZERO, 1.0, ObstacleKind::Liquid);
        b.add_sphere(Vec3::new(5.0, 0.0, 0.0), 1.0, ObstacleKind::Trigger);
        let field = b.build();

        assert!(field.query(Vec3::ZERO, 0.5, MASK).conflict);
        assert!(!field.query(Vec3::ZERO, 0.5, ObstacleMask::SOLID).conflict);
        // Trigger volumes are not part of the relocation mask.
        assert!(!field.query(Vec3::new(5.0, 0.0, 0.0), 0.5, MASK).conflict);
        assert!(field.query(Vec3::new(5.0, 0.0, 0.0), 0.5, ObstacleMask::ALL).conflict);
        assert!(!field.query(Vec3::ZERO, 0.5, ObstacleMask::NONE).conflict);
    }

    #[test]
    fn large_obstacle_found_by_broad_phase() {
        let mut b = ObstacleFieldBuilder::new();
        b.add_sphere(Vec3::ZERO, 5.0, ObstacleKind::Solid);
        b.add_sphere(Vec3::new(100.0, 0.0, 0.0), 0.1, ObstacleKind::Solid);
        let field = b.build();
        // Centre is 4.5 m away, far beyond the probe radius itself.
        assert!(field.query(Vec3::new(4.5, 0.0, 0.0), 0.1, MASK).conflict);
    }

    #[test]
    fn hits_sorted_nearest_first() {
        let mut b = ObstacleFieldBuilder::new();
        b.add_sphere(Vec3::new(1.0, 0.0, 0.0), 1.0, ObstacleKind::Solid);
        b.add_sphere(Vec3::new(0.5, 0.0, 0.0), 1.0, ObstacleKind::Liquid);
        let field = b.build();
        let r = field.query(Vec3::ZERO, 0.5, MASK);
        assert_eq!(r.hits.len(), 2);
        assert_eq!(r.hits[0].id, ObstacleId(1));
        assert!(r.hits[0].distance <= r.hits[1].distance);
    }

    #[test]
    fn insert_and_remove_at_runtime() {
        let field = ObstacleField::empty();
        let p = Vec3::new(3.0, 0.0, 3.0);
        let id = field.insert(Obstacle::new(p, 0.5, ObstacleKind::Solid)).expect("valid obstacle");
        assert_eq!(field.len(), 1);
        assert!(field.query(p, 0.8, MASK).conflict);
        assert_eq!(field.get(id).map(|o| o.center), Some(p));

        let removed = field.remove(id).expect("obstacle present");
        assert_eq!(removed.radius, 0.5);
        assert!(!field.query(p, 0.8, MASK).conflict);
        assert!(field.remove(id).is_none());
    }

    #[test]
    fn runtime_ids_continue_after_bulk_load() {
        let field = single_obstacle(1.0);
        let id = field.insert(Obstacle::new(Vec3::ZERO, 1.0, ObstacleKind::Dynamic));
        assert_eq!(id.ok(), Some(ObstacleId(1)));
    }

    #[test]
    fn defective_obstacles_rejected_at_runtime() {
        let field = single_obstacle(1.0);
        let bad = [
            Obstacle::new(Vec3::new(0.0, 0.0, 0.0), f32::NAN, ObstacleKind::Solid),
            Obstacle::new(Vec3::new(0.0, 0.0, 0.0), 0.0, ObstacleKind::Solid),
            Obstacle::new(Vec3::new(0.0, 0.0, 0.0), -1.0, ObstacleKind::Liquid),
            Obstacle::new(Vec3::new(f32::INFINITY, 0.0, 0.0), 1.0, ObstacleKind::Solid),
        ];
        for obstacle in bad {
            assert!(obstacle.defect().is_some(), "{obstacle:?}");
            assert!(matches!(field.insert(obstacle), Err(SpatialError::Invalid(_))), "{obstacle:?}");
        }
        assert_eq!(field.len(), 1);

        // The next valid obstacle still gets the next id.
        let id = field.insert(Obstacle::new(Vec3::ZERO, 0.5, ObstacleKind::Solid)).expect("valid obstacle");
        assert_eq!(id, ObstacleId(1));
    }

    #[test]
    fn non_finite_point_reports_clear() {
        let field = single_obstacle(1.0);
        assert!(!field.query(Vec3::new(f32::NAN, 0.0, 0.0), 0.8, MASK).conflict);
    }
}

// ── Safe-spot resolver ────────────────────────────────────────────────────────

#[cfg(test)]
mod resolver {
    use std::collections::HashSet;
    use std::sync::Arc;

    use relo_core::{ObstacleKind, ObstacleMask, RelocationConfig, Vec3};
    use crate::resolver::ShellOffsets;
    use crate::{ObstacleFieldBuilder, SafeSpotResolver, ShellResolver, SpatialProbe};

    use super::helpers::{approx, single_obstacle};

    const MASK: ObstacleMask = ObstacleMask::RELOCATION;

    #[test]
    fn clear_point_is_its_own_safe_spot() {
        let field = single_obstacle(1.0);
        let resolver = ShellResolver::new(&field, 0.8, MASK, 0.2);
        let p = Vec3::new(0.0, 0.0, 0.0);
        assert_eq!(resolver.resolve(p, 5.0), Some(p));
    }

    #[test]
    fn nearest_clear_lattice_point() {
        // Clearance needs centre distance ≥ 0.8 + 0.9 = 1.7 m.  The nearest
        // lattice ring is i² + j² = 73 (1.709 m); (8, 3) has the smallest
        // angle on that ring.
        let field = single_obstacle(0.9);
        let resolver = ShellResolver::new(&field, 0.8, MASK, 0.2);
        let target = Vec3::new(10.0, 0.0, 10.0);

        let spot = resolver.resolve(target, 5.0).expect("space available");
        assert!(approx(spot, Vec3::new(11.6, 0.0, 10.6)), "got {spot}");
        assert!(!field.query(spot, 0.8, MASK).conflict);
        assert!(spot.distance(target) <= 5.0);
        assert_eq!(spot.y, target.y);
    }

    #[test]
    fn deterministic_across_calls() {
        let field = single_obstacle(0.9);
        let resolver = ShellResolver::new(&field, 0.8, MASK, 0.2);
        let target = Vec3::new(10.0, 0.0, 10.0);
        assert_eq!(resolver.resolve(target, 5.0), resolver.resolve(target, 5.0));
    }

    #[test]
    fn exhausted_search_returns_none() {
        let field = single_obstacle(10.0);
        let resolver = ShellResolver::new(&field, 0.8, MASK, 0.2);
        assert_eq!(resolver.resolve(Vec3::new(10.0, 0.0, 10.0), 5.0), None);
    }

    #[test]
    fn invalid_inputs_return_none() {
        let field = single_obstacle(1.0);
        let resolver = ShellResolver::new(&field, 0.8, MASK, 0.2);
        assert_eq!(resolver.resolve(Vec3::new(f32::NAN, 0.0, 0.0), 5.0), None);
        assert_eq!(resolver.resolve(Vec3::ZERO, f32::INFINITY), None);
        assert_eq!(resolver.resolve(Vec3::ZERO, -1.0), None);

        let zero_step = ShellResolver::new(&field, 0.8, MASK, 0.0);
        assert_eq!(zero_step.resolve(Vec3::ZERO, 5.0), None);
    }

    #[test]
    fn ignores_categories_outside_mask() {
        let mut b = ObstacleFieldBuilder::new();
        b.add_sphere(Vec3::ZERO, 2.0, ObstacleKind::Trigger);
        let field = b.build();
        let resolver = ShellResolver::new(&field, 0.8, MASK, 0.2);
        assert_eq!(resolver.resolve(Vec3::ZERO, 5.0), Some(Vec3::ZERO));
    }

    #[test]
    fn from_config_and_shared_probe() {
        let field = Arc::new(single_obstacle(0.9));
        let resolver = ShellResolver::from_config(Arc::clone(&field), &RelocationConfig::default());
        assert_eq!(resolver.step(), 0.2);
        let spot = resolver.resolve(Vec3::new(10.0, 0.0, 10.0), 5.0).expect("space available");
        assert!(!field.query(spot, 0.8, MASK).conflict);
    }

    #[test]
    fn first_rings_walk_counter_clockwise() {
        let first: Vec<(i32, i32)> = ShellOffsets::new(2.0).take(9).collect();
        assert_eq!(
            first,
            vec![(0, 0), (1, 0), (0, 1), (-1, 0), (0, -1), (1, 1), (-1, 1), (-1, -1), (1, -1)]
        );
    }

    #[test]
    fn lattice_walk_covers_disc_once_in_shell_order() {
        let cells = 6.0f32;
        let walk: Vec<(i32, i32)> = ShellOffsets::new(cells).collect();

        let disc = (-6..=6)
            .flat_map(|i| (-6..=6).map(move |j| (i, j)))
            .filter(|&(i, j)| i * i + j * j <= 36)
            .count();
        assert_eq!(walk.len(), disc);

        let unique: HashSet<(i32, i32)> = walk.iter().copied().collect();
        assert_eq!(unique.len(), walk.len());

        let angle = |(i, j): (i32, i32)| f64::from(j).atan2(f64::from(i)).rem_euclid(std::f64::consts::TAU);
        for pair in walk.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            let (da, db) = (a.0 * a.0 + a.1 * a.1, b.0 * b.0 + b.1 * b.1);
            assert!(da < db || (da == db && angle(a) < angle(b)), "{a:?} before {b:?}");
        }
    }

    #[test]
    fn too_fine_lattice_gives_up() {
        let field = single_obstacle(1.0);
        let resolver = ShellResolver::new(&field, 0.8, MASK, 0.001);
        assert_eq!(resolver.resolve(Vec3::new(10.0, 0.0, 10.0), 50.0), None);
    }

    #[test]
    fn fine_lattice_stops_at_first_clear_ring() {
        let field = single_obstacle(0.9);
        let resolver = ShellResolver::new(&field, 0.8, MASK, 0.01);
        let target = Vec3::new(10.0, 0.0, 10.0);

        let spot = resolver.resolve(target, 5.0).expect("space available");
        assert!(!field.query(spot, 0.8, MASK).conflict);
        assert!(spot.distance(target) < 1.72, "got {spot}");
    }

    /// Seeded random fields: the resolver must return the clear lattice point
    /// with the smallest lattice distance, or `None` exactly when no lattice
    /// point within the radius is clear.
    #[test]
    fn never_skips_a_nearer_clear_point() {
        use rand::rngs::SmallRng;
        use rand::{Rng, SeedableRng};

        const STEP: f32 = 0.25;
        const MAX_RADIUS: f32 = 3.0;

        for seed in 0..40u64 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let mut b = ObstacleFieldBuilder::new();
            for _ in 0..rng.gen_range(5..40) {
                let c = Vec3::new(rng.gen_range(-4.0f32..4.0), 0.0, rng.gen_range(-4.0f32..4.0));
                b.add_sphere(c, rng.gen_range(0.2f32..1.2), ObstacleKind::Solid);
            }
            let field = b.build();
            let resolver = ShellResolver::new(&field, 0.5, MASK, STEP);

            let n = (MAX_RADIUS / STEP) as i32;
            let max_cells = MAX_RADIUS / STEP + 1e-4;
            let mut best: Option<i32> = None;
            for i in -n..=n {
                for j in -n..=n {
                    let d2 = i * i + j * j;
                    if d2 as f32 > max_cells * max_cells {
                        continue;
                    }
                    let p = Vec3::new(i as f32 * STEP, 0.0, j as f32 * STEP);
                    if !field.query(p, 0.5, MASK).conflict {
                        best = Some(best.map_or(d2, |b| b.min(d2)));
                    }
                }
            }

            match (resolver.resolve(Vec3::ZERO, MAX_RADIUS), best) {
                (None, None) => {}
                (Some(p), Some(best_d2)) => {
                    assert!(!field.query(p, 0.5, MASK).conflict, "seed {seed}: {p} occupied");
                    let i = (p.x / STEP).round() as i32;
                    let j = (p.z / STEP).round() as i32;
                    assert_eq!(i * i + j * j, best_d2, "seed {seed}: skipped a nearer point");
                }
                (got, want) => panic!("seed {seed}: resolver {got:?}, brute force {want:?}"),
            }
        }
    }
}

// ── CSV loader ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod loader {
    use std::io::{Cursor, Write};

    use relo_core::{ObstacleId, ObstacleKind, ObstacleMask, Vec3};
    use crate::{load_obstacles_csv, load_obstacles_reader, SpatialError, SpatialProbe};

    const CSV: &str = "\
x,y,z,radius,kind
10.0,0.0,10.0,1.5,solid
14.0,0.0,8.0,3.0,liquid
0.0,0.0,0.0,1.0,trigger
";

    #[test]
    fn loads_rows_in_order() {
        let field = load_obstacles_reader(Cursor::new(CSV)).unwrap();
        assert_eq!(field.len(), 3);
        let water = field.get(ObstacleId(1)).unwrap();
        assert_eq!(water.kind, ObstacleKind::Liquid);
        assert_eq!(water.center, Vec3::new(14.0, 0.0, 8.0));
        assert!(field.query(Vec3::new(14.0, 0.0, 8.0), 0.8, ObstacleMask::RELOCATION).conflict);
    }

    #[test]
    fn unknown_kind_rejected() {
        let csv = "x,y,z,radius,kind\n0,0,0,1,lava\n";
        match load_obstacles_reader(Cursor::new(csv)) {
            Err(SpatialError::InvalidObstacle { row, .. }) => assert_eq!(row, 2),
            other => panic!("expected InvalidObstacle, got {:?}", other.map(|f| f.len())),
        }
    }

    #[test]
    fn non_positive_radius_rejected() {
        let csv = "x,y,z,radius,kind\n0,0,0,1,solid\n0,0,0,0,solid\n";
        assert!(matches!(
            load_obstacles_reader(Cursor::new(csv)),
            Err(SpatialError::InvalidObstacle { row: 3, .. })
        ));
    }

    #[test]
    fn malformed_row_is_parse_error() {
        let csv = "x,y,z,radius,kind\nten,0,0,1,solid\n";
        assert!(matches!(load_obstacles_reader(Cursor::new(csv)), Err(SpatialError::Parse(_))));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(CSV.as_bytes()).unwrap();
        let field = load_obstacles_csv(file.path()).unwrap();
        assert_eq!(field.len(), 3);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_obstacles_csv(std::path::Path::new("/nonexistent/obstacles.csv"));
        assert!(matches!(err, Err(SpatialError::Io(_))));
    }
}
