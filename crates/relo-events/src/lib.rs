//! `relo-events` — what triggers a relocation and who hears about it.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                        |
//! |-------------|-----------------------------------------------------------------|
//! | [`request`] | `RelocationRequest` — the order-assignment trigger              |
//! | [`source`]  | `EventSource` trait, `EventBus` (tokio `broadcast`)             |
//! | [`sink`]    | `Signal`, `NotificationSink`, `NoopSink`, `RecordingSink`       |
//! | [`error`]   | `EventError`, `EventResult<T>`                                  |
//!
//! # Design notes
//!
//! Requests carry every field as it arrived from the producer, including
//! missing ones.  Filtering is the coordinator's job; the bus only moves
//! values.  Each subscriber gets its own `broadcast::Receiver`, and a slow
//! subscriber observes `RecvError::Lagged` rather than blocking producers.

pub mod error;
pub mod request;
pub mod sink;
pub mod source;


pub use error::{EventError, EventResult};
pub use request::RelocationRequest;
pub use sink::{NoopSink, NotificationSink, RecordingSink, Signal};
pub use source::{EventBus, EventSource};
