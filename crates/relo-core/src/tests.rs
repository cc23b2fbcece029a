//! Unit tests for relo-core primitives.

#[cfg(test)]
mod ids {
    use crate::{EntityId, ObstacleId, PrincipalId};

    #[test]
    fn index_roundtrip() {
        let id = EntityId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(EntityId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn invalid_sentinels_are_max() {
        assert_eq!(EntityId::INVALID.0, u32::MAX);
        assert_eq!(ObstacleId::default(), ObstacleId::INVALID);
    }

    #[test]
    fn display() {
        assert_eq!(EntityId(7).to_string(), "EntityId(7)");
    }

    #[test]
    fn principal_equality_is_exact() {
        let a = PrincipalId::from("customer-A");
        assert_eq!(a, PrincipalId::new("customer-A".to_string()));
        assert_ne!(a, PrincipalId::from("customer-a"));
        assert_ne!(a, PrincipalId::from("customer-A "));
        assert_ne!(a, PrincipalId::from("customer-"));
    }
}

#[cfg(test)]
mod geo {
    use crate::{Quat, Vec3};

    #[test]
    fn distance() {
        let a = Vec3::new(0.0, 0.0, 0.0);
        let b = Vec3::new(3.0, 0.0, 4.0);
        assert!((a.distance(b) - 5.0).abs() < 1e-6);
        assert!((a.distance_squared(b) - 25.0).abs() < 1e-6);
    }

    #[test]
    fn arithmetic() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(a + a, Vec3::new(2.0, 4.0, 6.0));
        assert_eq!(a - a, Vec3::ZERO);
        assert_eq!(a * 2.0, Vec3::new(2.0, 4.0, 6.0));
        assert_eq!(-a, Vec3::new(-1.0, -2.0, -3.0));
    }

    #[test]
    fn finiteness() {
        assert!(Vec3::new(1.0, 2.0, 3.0).is_finite());
        assert!(!Vec3::new(f32::NAN, 0.0, 0.0).is_finite());
        assert!(!Vec3::new(0.0, f32::INFINITY, 0.0).is_finite());
        assert!(Quat::IDENTITY.is_finite());
    }

    #[test]
    fn yaw_roundtrip() {
        let q = Quat::from_yaw(1.0);
        assert!((q.yaw() - 1.0).abs() < 1e-5);
        assert_eq!(Quat::default(), Quat::IDENTITY);
    }

    #[test]
    fn display() {
        assert_eq!(Vec3::new(10.0, 0.0, 10.25).to_string(), "(10.000, 0.000, 10.250)");
    }
}

#[cfg(test)]
mod mask {
    use crate::{ObstacleKind, ObstacleMask};

    #[test]
    fn relocation_mask_is_solid_and_liquid() {
        let m = ObstacleMask::RELOCATION;
        assert!(m.contains(ObstacleMask::SOLID));
        assert!(m.contains(ObstacleMask::LIQUID));
        assert!(!m.intersects(ObstacleMask::DYNAMIC));
        assert!(!m.intersects(ObstacleMask::TRIGGER));
        assert_eq!(m, ObstacleMask::SOLID | ObstacleMask::LIQUID);
    }

    #[test]
    fn kind_bits_are_disjoint() {
        let kinds = [
            ObstacleKind::Solid,
            ObstacleKind::Liquid,
            ObstacleKind::Dynamic,
            ObstacleKind::Trigger,
        ];
        for (i, a) in kinds.iter().enumerate() {
            for b in &kinds[i + 1..] {
                assert!((a.mask() & b.mask()).is_empty(), "{a} and {b} overlap");
            }
        }
    }

    #[test]
    fn kind_parse_roundtrip() {
        for kind in [ObstacleKind::Solid, ObstacleKind::Liquid, ObstacleKind::Dynamic, ObstacleKind::Trigger] {
            assert_eq!(ObstacleKind::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(ObstacleKind::parse(" liquid "), Some(ObstacleKind::Liquid));
        assert_eq!(ObstacleKind::parse("lava"), None);
    }
}

#[cfg(test)]
mod readiness {
    use crate::Readiness;

    #[test]
    fn terminal_states() {
        assert!(Readiness::Delivered.is_terminal());
        assert!(Readiness::Cancelled.is_terminal());
        assert!(!Readiness::Ready.is_terminal());
        assert!(!Readiness::InTransit.is_terminal());
    }

    #[test]
    fn display() {
        assert_eq!(Readiness::Ready.to_string(), "ready");
        assert_eq!(Readiness::InTransit.to_string(), "in_transit");
    }
}

#[cfg(test)]
mod config {
    use std::time::Duration;

    use crate::{ObstacleMask, Readiness, RelocationConfig};

    #[test]
    fn defaults() {
        let cfg = RelocationConfig::default();
        assert_eq!(cfg.lock_timeout(), Duration::from_millis(500));
        assert_eq!(cfg.probe_radius_m, 0.8);
        assert_eq!(cfg.max_search_radius_m, 5.0);
        assert_eq!(cfg.probe_mask, ObstacleMask::SOLID | ObstacleMask::LIQUID);
        assert_eq!(cfg.accepted_readiness, Readiness::Ready);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn zero_timeout_rejected() {
        let cfg = RelocationConfig { lock_timeout_ms: 0, ..Default::default() };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn non_finite_radius_rejected() {
        let cfg = RelocationConfig { probe_radius_m: f32::NAN, ..Default::default() };
        assert!(cfg.validate().is_err());
        let cfg = RelocationConfig { max_search_radius_m: -1.0, ..Default::default() };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn step_larger_than_radius_rejected() {
        let cfg = RelocationConfig { search_step_m: 6.0, ..Default::default() };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn search_lattice_is_bounded() {
        let fine = RelocationConfig { search_step_m: 0.001, max_search_radius_m: 50.0, ..Default::default() };
        assert!(fine.validate().is_err());

        let at_limit = RelocationConfig { search_step_m: 1.0, max_search_radius_m: 1_000.0, ..Default::default() };
        assert!(at_limit.validate().is_ok());
    }

    #[test]
    fn max_jump_checked_when_set() {
        let cfg = RelocationConfig { max_jump_m: Some(0.0), ..Default::default() };
        assert!(cfg.validate().is_err());
        let cfg = RelocationConfig { max_jump_m: Some(50.0), ..Default::default() };
        assert!(cfg.validate().is_ok());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn partial_json_fills_defaults() {
        let cfg: RelocationConfig = serde_json::from_str(r#"{ "lock_timeout_ms": 250 }"#).unwrap();
        assert_eq!(cfg.lock_timeout_ms, 250);
        assert_eq!(cfg.probe_radius_m, 0.8);
    }
}
