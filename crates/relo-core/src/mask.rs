//! Obstacle categories and the bit mask used to filter collision queries.
//!
//! Every obstacle carries exactly one [`ObstacleKind`]; queries pass an
//! [`ObstacleMask`] and only obstacles whose kind bit intersects the mask are
//! reported.

use std::fmt;

/// Bit set of obstacle categories.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObstacleMask(pub u32);

impl ObstacleMask {
    /// Matches nothing.
    pub const NONE: Self = Self(0);

    /// Static world geometry: walls, kerbs, parked vehicles.
    pub const SOLID: Self = Self(1 << 0);

    /// Water and other liquid volumes a body must not be dropped into.
    pub const LIQUID: Self = Self(1 << 1);

    /// Other moving bodies currently registered as obstacles.
    pub const DYNAMIC: Self = Self(1 << 2);

    /// Trigger volumes; passable, ignored by relocation by default.
    pub const TRIGGER: Self = Self(1 << 3);

    /// Mask used when checking relocation targets.
    pub const RELOCATION: Self = Self(Self::SOLID.0 | Self::LIQUID.0);

    pub const ALL: Self = Self(Self::SOLID.0 | Self::LIQUID.0 | Self::DYNAMIC.0 | Self::TRIGGER.0);

    #[inline]
    pub fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }

    #[inline]
    pub fn intersects(self, other: Self) -> bool {
        (self.0 & other.0) != 0
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl std::ops::BitOr for ObstacleMask {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl std::ops::BitAnd for ObstacleMask {
    type Output = Self;
    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

/// The category of a single obstacle.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ObstacleKind {
    #[default]
    Solid,
    Liquid,
    Dynamic,
    Trigger,
}

impl ObstacleKind {
    /// The single mask bit for this kind.
    #[inline]
    pub fn mask(self) -> ObstacleMask {
        match self {
            ObstacleKind::Solid   => ObstacleMask::SOLID,
            ObstacleKind::Liquid  => ObstacleMask::LIQUID,
            ObstacleKind::Dynamic => ObstacleMask::DYNAMIC,
            ObstacleKind::Trigger => ObstacleMask::TRIGGER,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ObstacleKind::Solid   => "solid",
            ObstacleKind::Liquid  => "liquid",
            ObstacleKind::Dynamic => "dynamic",
            ObstacleKind::Trigger => "trigger",
        }
    }

    /// Parse the lower-case label produced by [`as_str`](Self::as_str).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "solid"   => Some(ObstacleKind::Solid),
            "liquid"  => Some(ObstacleKind::Liquid),
            "dynamic" => Some(ObstacleKind::Dynamic),
            "trigger" => Some(ObstacleKind::Trigger),
            _ => None,
        }
    }
}

impl fmt::Display for ObstacleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
