use relo_core::Vec3;
use thiserror::Error;

/// Why an executor refused to commit.  The body is untouched in every case.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum RejectReason {
    #[error("source {expected} does not match current position {actual}")]
    SourceMismatch { expected: Vec3, actual: Vec3 },

    #[error("destination {0} is not finite")]
    NonFinite(Vec3),

    #[error("destination {0} became occupied before commit")]
    DestinationOccupied(Vec3),

    #[error("jump of {distance:.3} m exceeds limit of {limit:.3} m")]
    OutOfRange { distance: f32, limit: f32 },

    #[error("engine rejected relocation: {0}")]
    Engine(String),
}

pub type ExecResult<T> = Result<T, RejectReason>;
