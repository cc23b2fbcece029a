//! `relo-core` — foundational types for the `safe_relocate` workspace.
//!
//! This crate is a dependency of every other `relo-*` crate.  It has no
//! `relo-*` dependencies and only `thiserror` (plus optional `serde`) from
//! outside.
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `EntityId`, `ObstacleId`, `PrincipalId`               |
//! | [`geo`]         | `Vec3`, `Quat`                                        |
//! | [`mask`]        | `ObstacleMask` bit set, `ObstacleKind`                |
//! | [`readiness`]   | `Readiness` enum                                      |
//! | [`config`]      | `RelocationConfig`                                    |
//! | [`error`]       | `ReloError`, `ReloResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod mask;
pub mod readiness;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::RelocationConfig;
pub use error::{ReloError, ReloResult};
pub use geo::{Quat, Vec3};
pub use ids::{EntityId, ObstacleId, PrincipalId};
pub use mask::{ObstacleKind, ObstacleMask};
pub use readiness::Readiness;
