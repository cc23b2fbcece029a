//! Domain readiness state of a relocation subject.
//!
//! The order/courier domain model is external; the coordinator only sees the
//! state the event source reports and compares it against the single state
//! it accepts.

/// Where the subject is in its delivery lifecycle.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum Readiness {
    /// No order assigned.
    #[default]
    Idle,
    /// Order assigned, pickup not yet complete.
    Assigned,
    /// Pickup complete; the subject may be relocated to the drop-off.
    Ready,
    /// Already moving towards the drop-off.
    InTransit,
    /// Terminal: delivered.
    Delivered,
    /// Terminal: cancelled.
    Cancelled,
}

impl Readiness {
    /// `true` for states no further transition leaves.
    #[inline]
    pub fn is_terminal(self) -> bool {
        matches!(self, Readiness::Delivered | Readiness::Cancelled)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Readiness::Idle      => "idle",
            Readiness::Assigned  => "assigned",
            Readiness::Ready     => "ready",
            Readiness::InTransit => "in_transit",
            Readiness::Delivered => "delivered",
            Readiness::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for Readiness {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
