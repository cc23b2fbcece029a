use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EventError {
    #[error("no subscriber is listening")]
    NoSubscribers,

    #[error("event bus is closed")]
    Closed,
}

pub type EventResult<T> = Result<T, EventError>;
