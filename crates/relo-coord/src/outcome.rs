//! Result values of a relocation attempt.

use std::fmt;

use relo_core::{Readiness, Vec3};
use relo_exec::RejectReason;

/// Why an event was dropped without touching any entity.
#[derive(Clone, Debug, PartialEq)]
pub enum IgnoreReason {
    /// Principal, subject, or target missing.
    Incomplete,
    /// Principal is not the one this coordinator acts for.
    Unauthorized,
    /// The order is not in the accepted readiness state.
    NotReady(Readiness),
    NonFiniteTarget,
    /// Subject is not in this coordinator's entity table.
    UnknownEntity,
}

impl IgnoreReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            IgnoreReason::Incomplete      => "incomplete",
            IgnoreReason::Unauthorized    => "unauthorized",
            IgnoreReason::NotReady(_)     => "not_ready",
            IgnoreReason::NonFiniteTarget => "non_finite_target",
            IgnoreReason::UnknownEntity   => "unknown_entity",
        }
    }
}

/// How one relocation request ended.
#[derive(Clone, Debug, PartialEq)]
pub enum RelocationOutcome {
    /// The body is at `destination` and at rest.  `corrected` is `true`
    /// when `destination` came from the safe-spot search.
    Success { destination: Vec3, corrected: bool },
    /// The executor refused; the body is unchanged.
    Rejected(RejectReason),
    LockTimeout,
    NoSafeSpotFound,
    Ignored(IgnoreReason),
}

impl RelocationOutcome {
    #[inline]
    pub fn is_success(&self) -> bool {
        matches!(self, RelocationOutcome::Success { .. })
    }

    #[inline]
    pub fn is_ignored(&self) -> bool {
        matches!(self, RelocationOutcome::Ignored(_))
    }

    /// The final destination on success.
    pub fn destination(&self) -> Option<Vec3> {
        match self {
            RelocationOutcome::Success { destination, .. } => Some(*destination),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RelocationOutcome::Success { .. } => "success",
            RelocationOutcome::Rejected(_)    => "rejected",
            RelocationOutcome::LockTimeout    => "lock_timeout",
            RelocationOutcome::NoSafeSpotFound => "no_safe_spot",
            RelocationOutcome::Ignored(_)     => "ignored",
        }
    }
}

impl fmt::Display for RelocationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelocationOutcome::Success { destination, corrected: true } => {
                write!(f, "success at {destination} (corrected)")
            }
            RelocationOutcome::Success { destination, corrected: false } => {
                write!(f, "success at {destination}")
            }
            RelocationOutcome::Rejected(reason) => write!(f, "rejected: {reason}"),
            RelocationOutcome::Ignored(reason)  => write!(f, "ignored: {}", reason.as_str()),
            other => f.write_str(other.as_str()),
        }
    }
}
