//! # reset-key
//!
//! Press-duration classifier for a single active-low push-button, plus the
//! factory-reset sequence triggered by a long press.
//!
//! The crate is `no_std` and hardware-agnostic. The platform supplies:
//!
//! - an [`EdgeSource`]: consumer side of the queue an interrupt handler fills
//!   with one [`Edge`] per transition on the key pin
//! - an [`embedded_hal::digital::InputPin`] for the key level
//! - a monotonic [`Clock`]
//! - an [`EventSink`] receiving the resulting [`AppEvent`]s
//! - a [`ResetPlatform`] for the storage erase and restart calls
//!
//! ## Press timing
//!
//! | Held for (µs)                  | Kind     | Event                |
//! |--------------------------------|----------|----------------------|
//! | `d <= 1_000_000`               | Short    | `ActivateDevice`     |
//! | `1_000_000 < d <= 5_000_000`   | Medium   | `UpdateRouterConfig` |
//! | `d > 5_000_000`                | Long     | `FactoryReset`       |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use reset_key::{Builder, PressClassifier};
//!
//! let config = Builder::new().pin(0).build()?;
//! let mut classifier = PressClassifier::new(edges, key_pin, clock, config);
//!
//! // Returns only when the edge queue fails.
//! let err = classifier.run(&mut |event| {
//!     let _ = tx.send(event);
//! });
//! ```

#![cfg_attr(not(any(test, feature = "std")), no_std)]

pub mod classifier;
pub mod config;
pub mod edge;
pub mod error;
pub mod factory_reset;
pub mod press;

pub use classifier::{PressClassifier, PressState};
pub use config::{
    Builder, Config, DEFAULT_EDGE_QUEUE_CAPACITY, DEFAULT_LONG_PRESS_US, DEFAULT_MEDIUM_PRESS_US,
    Thresholds,
};
pub use edge::{Clock, Edge, EdgeSource};
pub use error::{BuilderError, Error};
pub use factory_reset::{PartitionRegion, ResetPlatform, factory_reset};
pub use press::{AppEvent, EventSink, PressKind, classify};
