//! Physical state of one simulated entity.

use relo_core::{Quat, Vec3};

/// Rigid-body state of a courier (or any mobile entity).
///
/// `Body` is `Copy` so a full before/after comparison is a plain `==`.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Body {
    pub position:         Vec3,
    pub orientation:      Quat,
    /// Metres per second.
    pub linear_velocity:  Vec3,
    /// Radians per second about each axis.
    pub angular_velocity: Vec3,
}

impl Body {
    /// A body at rest at `position`, facing the identity orientation.
    pub fn at(position: Vec3) -> Self {
        Self { position, ..Self::default() }
    }

    pub fn with_orientation(mut self, orientation: Quat) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn with_velocity(mut self, linear: Vec3, angular: Vec3) -> Self {
        self.linear_velocity = linear;
        self.angular_velocity = angular;
        self
    }

    /// `true` when both linear and angular velocity are exactly zero.
    #[inline]
    pub fn is_at_rest(&self) -> bool {
        self.linear_velocity == Vec3::ZERO && self.angular_velocity == Vec3::ZERO
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.position.is_finite()
            && self.orientation.is_finite()
            && self.linear_velocity.is_finite()
            && self.angular_velocity.is_finite()
    }
}
