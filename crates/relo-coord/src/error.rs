use relo_core::ReloError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoordError {
    #[error("invalid relocation config: {0}")]
    Config(#[from] ReloError),

    #[error("authorised principal must not be empty")]
    EmptyPrincipal,

    #[error("start() must be called from within a tokio runtime")]
    NoRuntime,
}

pub type CoordResult<T> = Result<T, CoordError>;
