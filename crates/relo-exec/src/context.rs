use relo_core::Vec3;

/// Parameters of one relocation attempt.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RelocationContext {
    /// Position the caller observed under the lock.
    pub source:                 Vec3,
    pub destination:            Vec3,
    /// Zero linear and angular velocity as part of the commit.
    pub preserve_momentum_zero: bool,
    /// Keep the current orientation; otherwise reset to identity facing.
    pub preserve_orientation:   bool,
}

impl RelocationContext {
    /// Both flags set: the body arrives at rest, facing the way it faced.
    pub fn strict(source: Vec3, destination: Vec3) -> Self {
        Self {
            source,
            destination,
            preserve_momentum_zero: true,
            preserve_orientation:   true,
        }
    }

    /// Straight-line jump length in metres.
    #[inline]
    pub fn displacement(&self) -> f32 {
        self.source.distance(self.destination)
    }
}
