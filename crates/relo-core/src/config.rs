//! Relocation protocol configuration.
//!
//! Typically built with [`RelocationConfig::default`] and tweaked in code, or
//! loaded from a JSON file by the application crate (enable the `serde`
//! feature) and passed to the coordinator builder.

use std::time::Duration;

use crate::{ObstacleMask, Readiness, ReloError, ReloResult};

/// Tunables for one relocation coordinator.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RelocationConfig {
    /// Upper bound on waiting for the subject's entity lock.  Default: 500 ms.
    pub lock_timeout_ms: u64,

    /// Sphere radius used when probing a target for obstacles.  Default: 0.8 m.
    pub probe_radius_m: f32,

    /// Obstacle categories a target must be clear of.  Default: solid | liquid.
    pub probe_mask: ObstacleMask,

    /// How far from an occupied target the safe-spot search may go.
    /// Default: 5.0 m.
    pub max_search_radius_m: f32,

    /// Lattice spacing of the safe-spot search.  Default: 0.2 m.
    pub search_step_m: f32,

    /// The only readiness state a request may carry to be acted on.
    pub accepted_readiness: Readiness,

    /// Reject relocations longer than this.  `None` disables the check.
    pub max_jump_m: Option<f32>,
}

impl Default for RelocationConfig {
    fn default() -> Self {
        Self {
            lock_timeout_ms:     500,
            probe_radius_m:      0.8,
            probe_mask:          ObstacleMask::RELOCATION,
            max_search_radius_m: 5.0,
            search_step_m:       0.2,
            accepted_readiness:  Readiness::Ready,
            max_jump_m:          None,
        }
    }
}

impl RelocationConfig {
    /// Largest allowed `max_search_radius_m / search_step_m`.  The search
    /// probes up to about `π · cells²` lattice points.
    pub const MAX_SEARCH_CELLS: f32 = 1_000.0;

    #[inline]
    pub fn lock_timeout(&self) -> Duration {
        Duration::from_millis(self.lock_timeout_ms)
    }

    /// Reject values that would make the protocol unbounded or meaningless.
    pub fn validate(&self) -> ReloResult<()> {
        if self.lock_timeout_ms == 0 {
            return Err(ReloError::Config("lock_timeout_ms must be positive".into()));
        }
        positive("probe_radius_m", self.probe_radius_m)?;
        positive("max_search_radius_m", self.max_search_radius_m)?;
        positive("search_step_m", self.search_step_m)?;
        if self.search_step_m > self.max_search_radius_m {
            return Err(ReloError::Config(format!(
                "search_step_m ({}) exceeds max_search_radius_m ({})",
                self.search_step_m, self.max_search_radius_m
            )));
        }
        let cells = self.max_search_radius_m / self.search_step_m;
        if cells > Self::MAX_SEARCH_CELLS {
            return Err(ReloError::Config(format!(
                "search lattice of {cells:.0} cells per axis exceeds {}: raise search_step_m or lower max_search_radius_m",
                Self::MAX_SEARCH_CELLS
            )));
        }
        if let Some(max_jump) = self.max_jump_m {
            positive("max_jump_m", max_jump)?;
        }
        Ok(())
    }
}

fn positive(name: &str, value: f32) -> ReloResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ReloError::Config(format!("{name} must be finite and positive, got {value}")))
    }
}
