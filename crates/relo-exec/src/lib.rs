//! `relo-exec` — the commit step of a relocation.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                  |
//! |--------------|-----------------------------------------------------------|
//! | [`context`]  | `RelocationContext` — source, destination, flags          |
//! | [`error`]    | `RejectReason`, `ExecResult<T>`                           |
//! | [`executor`] | `RelocationExecutor` trait, `PhysicsExecutor` default     |
//!
//! An executor is handed `&mut Body` taken from a live `EntityLockHandle`;
//! it either writes the whole next state in one assignment or returns a
//! [`RejectReason`] and leaves the body untouched.

pub mod context;
pub mod error;
pub mod executor;


pub use context::RelocationContext;
pub use error::{ExecResult, RejectReason};
pub use executor::{PhysicsExecutor, RelocationExecutor};
