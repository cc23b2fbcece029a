//! `relo-coord` — the safe relocation coordinator.
//!
//! # Crate layout
//!
//! | Module           | Contents                                                   |
//! |------------------|------------------------------------------------------------|
//! | [`coordinator`]  | `RelocationCoordinator` — `handle`, `start`, `stop`        |
//! | [`builder`]      | `CoordinatorBuilder` — collaborator injection + defaults   |
//! | [`outcome`]      | `RelocationOutcome`, `IgnoreReason`                        |
//! | [`observer`]     | `OutcomeObserver` trait, `NoopObserver`                    |
//! | [`subscription`] | `Subscription` — listener task token, aborts on drop       |
//! | [`error`]        | `CoordError`, `CoordResult<T>`                             |
//!
//! # Request pipeline
//!
//! For each [`RelocationRequest`][relo_events::RelocationRequest]:
//!
//! 1. **Admit**: fields present, principal authorised, readiness accepted,
//!    target finite, subject registered.  Any failure is a silent
//!    [`RelocationOutcome::Ignored`]; no lock is touched.
//! 2. **Lock**: acquire the subject's `EntityLockHandle` within the
//!    configured timeout, else [`RelocationOutcome::LockTimeout`].
//! 3. **Resolve**: probe the target; on conflict ask the resolver for the
//!    nearest free spot, else [`RelocationOutcome::NoSafeSpotFound`].
//! 4. **Execute**: commit through the executor with momentum zeroing and
//!    orientation preservation, else [`RelocationOutcome::Rejected`].
//! 5. **Report**: zero linear velocity, release the lock, notify the sink.
//!
//! The lock handle is dropped on every exit path, including panics inside
//! injected collaborators.  Nothing in the pipeline returns an error; every
//! failure is an outcome value.

pub mod builder;
pub mod coordinator;
pub mod error;
pub mod observer;
pub mod outcome;
pub mod subscription;


pub use builder::CoordinatorBuilder;
pub use coordinator::RelocationCoordinator;
pub use error::{CoordError, CoordResult};
pub use observer::{NoopObserver, OutcomeObserver};
pub use outcome::{IgnoreReason, RelocationOutcome};
pub use subscription::Subscription;
