//! `relo-spatial` — obstacle field, collision probing, and safe-spot search.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                     |
//! |--------------|--------------------------------------------------------------|
//! | [`field`]    | `ObstacleField` (R-tree of spheres), `ObstacleFieldBuilder`  |
//! | [`probe`]    | `SpatialProbe` trait, `CollisionResult`, `ObstacleHit`       |
//! | [`resolver`] | `SafeSpotResolver` trait, `ShellResolver`                    |
//! | [`loader`]   | CSV obstacle loading                                         |
//! | [`error`]    | `SpatialError`, `SpatialResult<T>`                           |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on core types.             |

pub mod error;
pub mod field;
pub mod loader;
pub mod probe;
pub mod resolver;

#[cfg(test)]
mod tests;

pub use error::{SpatialError, SpatialResult};
pub use field::{Obstacle, ObstacleField, ObstacleFieldBuilder};
pub use loader::{load_obstacles_csv, load_obstacles_reader};
pub use probe::{CollisionResult, ObstacleHit, SpatialProbe};
pub use resolver::{SafeSpotResolver, ShellResolver};
