//! The relocation trigger.

use relo_core::{EntityId, PrincipalId, Readiness, Vec3};

/// An order-assignment event asking for `subject` to be moved to `target`.
///
/// Fields are optional because producers may publish partial records;
/// a request missing any of them is ignored downstream.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RelocationRequest {
    /// Identity the order was issued for.
    pub principal: Option<PrincipalId>,
    /// Courier to relocate.
    pub subject:   Option<EntityId>,
    /// Drop-off point.
    pub target:    Option<Vec3>,
    pub readiness: Readiness,
}

impl RelocationRequest {
    /// A complete request.
    pub fn new(
        principal: impl Into<PrincipalId>,
        subject:   EntityId,
        target:    Vec3,
        readiness: Readiness,
    ) -> Self {
        Self {
            principal: Some(principal.into()),
            subject:   Some(subject),
            target:    Some(target),
            readiness,
        }
    }

    /// A complete request for a courier that has picked up its parcel.
    pub fn ready(principal: impl Into<PrincipalId>, subject: EntityId, target: Vec3) -> Self {
        Self::new(principal, subject, target, Readiness::Ready)
    }

    /// `true` when principal, subject, and target are all present.
    pub fn is_complete(&self) -> bool {
        self.principal.is_some() && self.subject.is_some() && self.target.is_some()
    }
}
