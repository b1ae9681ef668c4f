//! Edge queue and clock abstractions
//!
//! The key is watched by an interrupt handler that pushes one [`Edge`] per
//! electrical transition into a small bounded queue. The scan task pops
//! edges through [`EdgeSource`] and timestamps them with a [`Clock`].
//!
//! ## Queue contract
//!
//! - Push happens in interrupt context. It never blocks and never allocates;
//!   when the queue is full the edge is dropped.
//! - Pop blocks the scan task until an edge arrives or the timeout elapses.
//! - Each pushed edge is seen by exactly one pop, in push order.
//!
//! The producer side lives with the platform (FreeRTOS queue on target).
//! Only the consumer side is needed by the classifier.

use core::fmt::Debug;
use core::time::Duration;

/// One electrical transition on a monitored pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    /// GPIO number that changed level
    pub pin: u32,
}

impl Edge {
    pub fn new(pin: u32) -> Self {
        Self { pin }
    }
}

/// Consumer side of the ISR edge queue
///
/// ## Implementing
///
/// `recv` with `None` waits forever. With `Some(timeout)` an implementation
/// returns an error once the timeout elapses with no edge; the scan loop
/// treats that the same way as any other receive failure.
pub trait EdgeSource {
    /// Error type for receive failures
    type Error: Debug;

    /// Block until the next edge arrives
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying queue fails or the timeout elapses.
    fn recv(&mut self, timeout: Option<Duration>) -> Result<Edge, Self::Error>;
}

/// Monotonic microsecond clock
pub trait Clock {
    /// Microseconds since an arbitrary fixed origin; never decreases
    fn now_us(&self) -> u64;
}

impl<T: EdgeSource + ?Sized> EdgeSource for &mut T {
    type Error = T::Error;

    fn recv(&mut self, timeout: Option<Duration>) -> Result<Edge, Self::Error> {
        T::recv(self, timeout)
    }
}

impl<T: Clock + ?Sized> Clock for &T {
    fn now_us(&self) -> u64 {
        T::now_us(self)
    }
}
