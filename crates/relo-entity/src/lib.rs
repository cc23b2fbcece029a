//! `relo-entity` — entity bodies and the per-entity mutation lock.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                      |
//! |-------------|---------------------------------------------------------------|
//! | [`body`]    | `Body` — position, orientation, linear/angular velocity       |
//! | [`lock`]    | `EntityLockHandle` (RAII token), `LockStats`                  |
//! | [`table`]   | `EntityTable` — the lock table: one async mutex per entity    |
//! | [`builder`] | `EntityTableBuilder` (fluent construction)                    |
//!
//! # Locking model
//!
//! Every body lives inside its own `tokio::sync::Mutex`.  The only way to
//! read or write a body is through an [`EntityLockHandle`], so no subsystem
//! can observe a body halfway through an update.  Acquisition is bounded by
//! a caller-supplied timeout and suspends the calling task cooperatively;
//! waiters are served in FIFO order.
//!
//! # Feature flags
//!
//! | Flag      | Effect                                                      |
//! |-----------|-------------------------------------------------------------|
//! | `fx-hash` | FxHash instead of SipHash for the lock table.               |
//! | `serde`   | Derives `Serialize`/`Deserialize` on `Body`.                |

pub mod body;
pub mod builder;
pub mod lock;
pub mod table;


pub use body::Body;
pub use builder::EntityTableBuilder;
pub use lock::{EntityLockHandle, LockStats};
pub use table::EntityTable;
